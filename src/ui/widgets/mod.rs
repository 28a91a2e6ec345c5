//! Reusable UI widget components.
//!
//! This module contains styling helpers shared by cells and screen chrome.

pub mod styling;
