//! Bookshelf application library
//!
//! Holds the application modules and the helpers they share.

pub mod modules;
pub mod utils;

pub use modules::*;
