use super::*;
use crate::auction::BidPolicy;
use crate::clock::{SharedClock, SystemClock};
use crate::event::BidEvent;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::BTreeMap;
use tracing::{debug, warn};

type InMemoryLedgerInner = Vec<BidEvent>;

pub struct InMemoryLedger {
    inner: RwLock<InMemoryLedgerInner>,
    clock: SharedClock,
    policy: BidPolicy,
}

impl InMemoryLedger {
    pub fn new(policy: BidPolicy, clock: SharedClock) -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> BidPolicy {
        self.policy
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, InMemoryLedgerInner> {
        self.inner.read()
    }
}

impl BidRecorder for InMemoryLedger {
    fn record_bid(
        &self,
        product_id: ProductIdRef,
        amount: Amount,
    ) -> Result<LoggedBid, LedgerError> {
        if let Err(e) = self.policy.check(product_id, amount) {
            warn!(product_id, amount, error = %e, "bid rejected");
            return Err(e.into());
        }

        let mut write = self.inner.write();

        // wall clock may step back; the log must not
        let now = self.clock.now();
        let submitted_at = match write.last() {
            Some(last) if last.submitted_at > now => last.submitted_at,
            _ => now,
        };

        let event = BidEvent {
            product_id: product_id.to_owned(),
            amount,
            submitted_at,
        };
        let offset = write.len() as Offset;
        write.push(event.clone());
        drop(write);

        debug!(offset, ?event, "bid recorded");
        Ok(LoggedBid { offset, event })
    }
}

impl BidReader for InMemoryLedger {
    fn highest_bid(&self, product_id: ProductIdRef) -> Amount {
        self.read_inner()
            .iter()
            .filter(|e| e.product_id == product_id)
            .map(|e| e.amount)
            .reduce(Amount::max)
            .unwrap_or(0.0)
    }

    fn bids_for(&self, product_id: ProductIdRef) -> Vec<LoggedBid> {
        self.read_inner()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.product_id == product_id)
            .map(|(i, e)| LoggedBid {
                offset: i as Offset,
                event: e.clone(),
            })
            .collect()
    }

    fn read(
        &self,
        offset: Offset,
        limit: usize,
    ) -> Result<WithOffset<Vec<LoggedBid>>, LedgerError> {
        let read = self.read_inner();
        let out_of_bounds = || LedgerError::OutOfBounds {
            offset,
            len: read.len() as Offset,
        };

        let offset_usize = usize::try_from(offset).map_err(|_| out_of_bounds())?;

        let res: Vec<_> = read
            .get(offset_usize..)
            .ok_or_else(out_of_bounds)?
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, e)| LoggedBid {
                offset: offset + i as Offset,
                event: e.clone(),
            })
            .collect();

        Ok(WithOffset {
            offset: offset + res.len() as Offset,
            data: res,
        })
    }

    fn len(&self) -> usize {
        self.read_inner().len()
    }

    fn products(&self) -> Vec<ProductSummary> {
        let read = self.read_inner();
        let mut by_product: BTreeMap<&str, ProductSummary> = BTreeMap::new();

        for e in read.iter() {
            by_product
                .entry(&e.product_id)
                .and_modify(|s| {
                    s.highest_bid = s.highest_bid.max(e.amount);
                    s.bid_count += 1;
                })
                .or_insert_with(|| ProductSummary {
                    product_id: e.product_id.clone(),
                    highest_bid: e.amount,
                    bid_count: 1,
                });
        }

        by_product.into_values().collect()
    }
}

/// A fresh ledger, handed out as a recorder and a reader over the same log
pub fn new_in_memory_shared(
    policy: BidPolicy,
    clock: SharedClock,
) -> (SharedRecorder, SharedReader) {
    let ledger = Arc::new(InMemoryLedger::new(policy, clock));
    let recorder: SharedRecorder = ledger.clone();
    let reader: SharedReader = ledger;
    (recorder, reader)
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(BidPolicy::default(), SystemClock::new_shared())
    }
}
