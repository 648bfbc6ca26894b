//! Domain layer - Core types and pure logic.
//!
//! - `genie` - Conversation lifecycle states and answer rendering
//! - `slack` - Inbound request signature verification

pub mod genie;
pub mod slack;
