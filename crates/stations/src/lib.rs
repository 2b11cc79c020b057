//! Client for the third-party charging-station listing feed.
//!
//! The feed is a plain HTTP `GET` returning every station the operator
//! network knows about. Only the per-station `Filter` bitmask matters to the
//! brand panel; location and name are parsed for logging.

pub mod api;
pub mod messages;

pub use api::{StationFeedClient, StationFeedError};
pub use messages::StationRecord;
