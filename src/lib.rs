pub mod cli;
pub mod erc20;
pub mod error;
pub mod format;
pub mod query;
pub mod reader;
pub mod resolver;
pub mod snapshot;

pub use error::{AsofError as Error, ErrorKind, Result};
