//! Walkabout testbed
//!
//! Drives a single agent through a procedural world without a renderer:
//! - [`config`]: config file resolution
//! - [`world`]: terrain strip and fence geometry
//! - [`session`]: scripted input, tick loop and session counters

pub mod config;
pub mod session;
pub mod world;

pub use session::{scripted_walk, Action, Phase, Session, SessionSummary};
