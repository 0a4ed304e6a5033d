//! Engine facade, configuration and logging for docsync.

pub mod config;
pub mod engine;
pub mod logging;

pub use config::EngineConfig;
pub use engine::{ClassReport, DocsyncEngine, DocsyncEngineBuilder};
pub use logging::{init_logging, init_logging_in};
