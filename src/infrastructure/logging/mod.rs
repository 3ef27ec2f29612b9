//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console output
//! - Optional rolling file output via tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
