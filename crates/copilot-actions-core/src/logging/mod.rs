//! Logging abstractions for runtime-agnostic logging

mod traits;
mod noop;
mod console;
mod memory;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{MemoryLogger, LogLine};

pub use file_logger::{
    log, trace, debug, info, warn, error,
    log_file_path, clear_log, FileLogger, LogLevel,
};
