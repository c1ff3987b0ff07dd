use crate::auction::{Amount, ProductId};
use crate::clock::Timestamp;
use serde::{Deserialize, Serialize};

pub type Offset = u64;

/// One bid submission as recorded by the ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidEvent {
    pub product_id: ProductId,
    pub amount: Amount,
    /// Assigned by the ledger, never by the caller
    pub submitted_at: Timestamp,
}

/// A [`BidEvent`] together with its position in the ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedBid {
    pub offset: Offset,
    #[serde(flatten)]
    pub event: BidEvent,
}

/// A batch of data and the offset to continue reading from
#[derive(Clone, Debug, PartialEq)]
pub struct WithOffset<T> {
    pub offset: Offset,
    pub data: T,
}

/// Aggregate view of the bids on one product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub highest_bid: Amount,
    pub bid_count: usize,
}
