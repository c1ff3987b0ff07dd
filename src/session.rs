//! Session context
//!
//! A `BidSession` is created once per page load and owns the ledger
//! for that session. Views get handles from it instead of reaching for
//! shared global state, and views that want to hear about new bids
//! register a [`BidFollower`], which is fed from the ledger by offset.
use crate::auction::{Amount, ProductIdRef};
use crate::clock::{SharedClock, SystemClock};
use crate::config::Config;
use crate::event::{LoggedBid, WithOffset};
use crate::ledger::{self, LedgerError, SharedReader, SharedRecorder};
use crate::progress::{self, FollowerId, FollowerIdRef, SharedProgressTracker};
use anyhow::Context;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How many bids a follower is handed per ledger read
const DISPATCH_BATCH: usize = 64;

/// A consumer of newly recorded bids
pub trait BidFollower: Send + Sync {
    fn get_follower_id(&self) -> FollowerId;

    fn handle_bid(&mut self, bid: &LoggedBid) -> anyhow::Result<()>;
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("follower `{0}` is already registered")]
    DuplicateFollower(FollowerId),
    #[error("follower `{id}` failed")]
    Follower {
        id: FollowerId,
        #[source]
        source: anyhow::Error,
    },
}

pub struct BidSession {
    config: Config,
    recorder: SharedRecorder,
    reader: SharedReader,
    progress: SharedProgressTracker,
    followers: Vec<Box<dyn BidFollower>>,
}

impl BidSession {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock::new_shared())
    }

    pub fn with_clock(config: Config, clock: SharedClock) -> Self {
        let (recorder, reader) = ledger::new_in_memory_shared(config.bid_policy, clock);
        info!(policy = ?config.bid_policy, "bid session started");
        Self {
            config,
            recorder,
            reader,
            progress: progress::InMemoryProgressTracker::new_shared(),
            followers: vec![],
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn recorder(&self) -> SharedRecorder {
        self.recorder.clone()
    }

    pub fn reader(&self) -> SharedReader {
        self.reader.clone()
    }

    pub fn place_bid(
        &self,
        product_id: ProductIdRef,
        amount: Amount,
    ) -> Result<LoggedBid, SessionError> {
        Ok(self.recorder.record_bid(product_id, amount)?)
    }

    pub fn highest_bid(&self, product_id: ProductIdRef) -> Amount {
        self.reader.highest_bid(product_id)
    }

    /// Start feeding `follower` on the next [`BidSession::dispatch`]
    ///
    /// A follower id seen before resumes where it left off, otherwise it
    /// starts from the beginning of the ledger.
    pub fn register_follower(
        &mut self,
        follower: impl BidFollower + 'static,
    ) -> Result<(), SessionError> {
        let id = follower.get_follower_id();
        if self.followers.iter().any(|f| f.get_follower_id() == id) {
            return Err(SessionError::DuplicateFollower(id));
        }
        debug!(%id, "follower registered");
        self.followers.push(Box::new(follower));
        Ok(())
    }

    /// Stop feeding the follower; its progress is kept
    pub fn unregister_follower(&mut self, id: FollowerIdRef) -> bool {
        let before = self.followers.len();
        self.followers.retain(|f| f.get_follower_id() != id);
        self.followers.len() != before
    }

    /// Make the follower see the whole ledger again on the next dispatch
    pub fn rewind_follower(&self, id: FollowerIdRef) -> anyhow::Result<()> {
        self.progress.forget(id)
    }

    /// Deliver every bid each follower has not seen yet
    ///
    /// A failing follower is left positioned at the bid it failed on;
    /// the rest are still served. The first failure is returned.
    pub fn dispatch(&mut self) -> Result<usize, SessionError> {
        let mut delivered = 0;
        let mut first_err = None;

        for follower in self.followers.iter_mut() {
            let id = follower.get_follower_id();
            match Self::catch_up(&self.reader, &self.progress, &id, follower.as_mut()) {
                Ok(n) => delivered += n,
                Err(e) => {
                    warn!(%id, error = ?e, "follower failed");
                    if first_err.is_none() {
                        first_err = Some(SessionError::Follower { id, source: e });
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(delivered),
        }
    }

    fn catch_up(
        reader: &SharedReader,
        progress: &SharedProgressTracker,
        id: FollowerIdRef,
        follower: &mut dyn BidFollower,
    ) -> anyhow::Result<usize> {
        let mut offset = match progress.load(id)? {
            Some(offset) => offset,
            None => reader.get_start_offset(),
        };
        let mut delivered = 0;

        loop {
            let WithOffset {
                offset: next,
                data: bids,
            } = reader.read(offset, DISPATCH_BATCH)?;

            if bids.is_empty() {
                return Ok(delivered);
            }

            for bid in &bids {
                follower
                    .handle_bid(bid)
                    .with_context(|| format!("handling bid at offset {}", bid.offset))?;
                progress.store(id, bid.offset + 1)?;
                delivered += 1;
            }
            offset = next;
        }
    }
}
