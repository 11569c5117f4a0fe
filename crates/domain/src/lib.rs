//! # rfxmqtt-domain
//!
//! Pure domain model for the rfxmqtt bridge.
//!
//! ## Responsibilities
//! - Foundational types: device identities, raw frames, error conventions
//! - Define **Events** (decoded measurement / control / status occurrences)
//! - Define **Domains** and the rules that classify an event into them
//! - Define **Entities** (one addressable value of a device under a domain)
//! - Hold the static value catalog: units, device classes, state transforms
//! - Build topics and discovery payloads
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod catalog;
pub mod classify;
pub mod device;
pub mod discovery;
pub mod entity;
pub mod event;
pub mod frame;
pub mod topic;
pub mod value;
