mod in_memory;

pub use self::in_memory::*;

use crate::event::Offset;
use anyhow::Result;
use std::sync::Arc;

pub type FollowerId = String;
pub type FollowerIdRef<'a> = &'a str;

/// Keeps track of the next ledger offset each follower should see
pub trait ProgressTracker {
    fn load(&self, id: FollowerIdRef) -> Result<Option<Offset>>;
    fn store(&self, id: FollowerIdRef, offset: Offset) -> Result<()>;
    fn forget(&self, id: FollowerIdRef) -> Result<()>;
}

pub type SharedProgressTracker = Arc<dyn ProgressTracker + Send + Sync + 'static>;
