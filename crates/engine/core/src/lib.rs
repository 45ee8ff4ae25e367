//! Core types for Walkabout
//!
//! This crate holds the pieces that sit on either side of the movement
//! resolver: the input layer that turns held keys and pointer motion into a
//! per-tick [`MoveRequest`], and the [`AgentSnapshot`] published back out to
//! rendering and networking once a tick has been resolved.
//!
//! # Modules
//!
//! - [`input`]: Movement keys, pointer look and analog stick mapping
//! - [`agent`]: Animation labels and the published agent snapshot

pub mod agent;
pub mod input;

pub use agent::{AgentSnapshot, Animation};
pub use input::{AnalogStick, LookState, MoveRequest, MovementKeys};
