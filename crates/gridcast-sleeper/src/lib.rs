// Sleeper data access: REST client, projections feed normalization, and the
// league sources reports are built from.

pub mod client;
pub mod error;
pub mod feed;
pub mod source;

pub use client::SleeperClient;
pub use error::SleeperError;
pub use source::{FetchRequest, LeagueSource, SleeperSource, SnapshotFile};
