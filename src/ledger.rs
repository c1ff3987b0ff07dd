//! Bid ledger
//!
//! An append-only, session-scoped log of bid submissions. Entries are
//! never changed, reordered or removed once written, and nothing is
//! persisted: when the session goes away, so do the bids.
mod in_memory;

pub use self::in_memory::*;

use crate::auction::{Amount, InvalidArgument, ProductIdRef};
use crate::event::{LoggedBid, Offset, ProductSummary, WithOffset};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("offset {offset} is out of bounds (ledger length {len})")]
    OutOfBounds { offset: Offset, len: Offset },
}

/// Write side of the ledger
pub trait BidRecorder {
    /// Append a bid, stamped with the ledger's clock
    ///
    /// No check is made against the current highest bid, and
    /// recording the same amount twice yields two entries.
    fn record_bid(
        &self,
        product_id: ProductIdRef,
        amount: Amount,
    ) -> Result<LoggedBid, LedgerError>;
}

/// Read side of the ledger
pub trait BidReader {
    /// Highest amount bid on `product_id`, or `0` if there are no bids
    fn highest_bid(&self, product_id: ProductIdRef) -> Amount;

    fn bids_for(&self, product_id: ProductIdRef) -> Vec<LoggedBid>;

    /// Read up to `limit` entries starting at `offset`
    ///
    /// Reading at the end of the ledger returns an empty batch.
    fn read(
        &self,
        offset: Offset,
        limit: usize,
    ) -> Result<WithOffset<Vec<LoggedBid>>, LedgerError>;

    fn get_start_offset(&self) -> Offset {
        0
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-product highest bid and bid count, ordered by product id
    fn products(&self) -> Vec<ProductSummary>;
}

pub type SharedRecorder = Arc<dyn BidRecorder + Sync + Send + 'static>;
pub type SharedReader = Arc<dyn BidReader + Sync + Send + 'static>;
