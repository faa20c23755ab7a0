pub mod action;
pub mod config;
pub mod error;
pub mod example;
pub mod formatter;
pub mod generate;
pub mod io;
pub mod marker;
pub mod paths;
pub mod section;
pub mod table;

pub use error::{DocsError, Result};
