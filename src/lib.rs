// Library exports for richpad

pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod richtext;
pub mod script;
pub mod session;

pub use error::{Error, Result};
