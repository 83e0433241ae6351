pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod resolver;
pub mod workspace;

// Re-export commonly used types
pub use config::NavigationConfig;
pub use error::{NavError, NavResult};
pub use models::{ObjectType, Position, SymbolInfo, SymbolLocation, TextRange};
pub use notify::{Notifier, NullNotifier};
pub use resolver::DefinitionResolver;
pub use workspace::{DocumentOpener, WorkspaceSurface};
