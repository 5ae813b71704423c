// Core league analysis: projections, ROS scoring, depth, simulation,
// recommendations, and report assembly. Pure and synchronous; all I/O lives
// in the fetch and app crates.

pub mod depth;
pub mod digest;
pub mod error;
pub mod model;
pub mod policy;
pub mod projections;
pub mod recommend;
pub mod ros;
pub mod simulator;

pub use error::ReportError;
