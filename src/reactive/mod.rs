//! Reactive primitives.
//!
//! This module contains the small event-stream toolkit the form screen is
//! wired with:
//! - `Subject`: a multicast stream that delivers values synchronously
//! - `Subscription` / `SubscriptionBag`: cancellable listener handles
//! - `UiExecutor` / `UiQueue`: marshaling of work onto the UI thread

mod executor;
mod subject;

pub use executor::{UiExecutor, UiQueue};
pub use subject::{Observable, Subject, Subscription, SubscriptionBag};
