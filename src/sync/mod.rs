//! Pane synchronization: polling engine, timer task and selection follower

mod engine;
mod follower;
mod poller;

pub use engine::{PaneSync, SyncConfig, SyncOutcome};
pub use follower::PaneFollower;
pub use poller::PollTask;
