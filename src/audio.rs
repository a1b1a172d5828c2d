//! Audio output: the engine contract and its implementations.

mod engine;
mod sink;
mod types;

pub use engine::RodioEngine;
pub use types::{AudioEngine, EngineError, SilentEngine};

#[cfg(test)]
mod tests;
