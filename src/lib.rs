pub mod config;
pub mod error;
pub mod git;
pub mod message;
pub mod ui;
pub mod version;

pub use error::{GitSvError, Result};
