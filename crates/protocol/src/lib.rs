//! Shared-state protocol for Agarium.
//!
//! Defines the messages peers exchange through the shared key space, their
//! binary encoding, and an in-process hub that relays them.

pub mod codec;
pub mod hub;
pub mod messages;

pub use codec::*;
pub use hub::{HubClient, SharedStateHub};
pub use messages::*;
