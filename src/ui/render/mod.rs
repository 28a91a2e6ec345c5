mod all;
mod banner;
mod footer;
mod log;

use self::log::log;
use super::*;
use banner::banner;
use footer::footer;

pub use all::all as render;
