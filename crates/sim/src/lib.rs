//! Headless replay of scripted skirmishes.
//!
//! Loads a scenario through `tactics-content`, feeds its scripted orders to the
//! planning writers one pass at a time and resolves each pass with the core
//! engine. Every pass ends with a state checksum so two runs can be compared.

pub mod config;
pub mod replay;
pub mod sink;

pub use config::SimConfig;
pub use replay::{PassOutcome, Replay};
pub use sink::{LogSink, describe};
