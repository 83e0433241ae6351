pub mod cache;
pub mod error;
pub mod library;
pub mod logging;
pub mod package;

pub use cache::LibraryCache;
pub use error::{LoadError, Result};
pub use library::ObjectLibrary;
