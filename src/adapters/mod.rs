//! Adapter implementations of the port traits.
//!
//! - `live`: real network, disk and clock.
//! - `recording`: wraps a live adapter and captures its traffic to a cassette.
//! - `replaying`: serves previously captured traffic from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
