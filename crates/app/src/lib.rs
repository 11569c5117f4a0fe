//! # rfxmqtt-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `FrameDecoder` — raw frame → decoded event
//!   - `Publisher` — topic/payload → message bus
//! - Own the in-memory **device registry** built from configuration
//! - Derive entities from events (`deriver`)
//! - Orchestrate the setup pass and per-event dispatch (`dispatcher`)
//!
//! ## Dependency rule
//! Depends on `rfxmqtt-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod deriver;
pub mod dispatcher;
pub mod ports;
pub mod registry;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;
