//! BidNet client core
//!
//! Session-scoped bid bookkeeping for the BidNet marketplace client,
//! plus the typed shapes of the remote API it talks to.
pub mod api;
pub mod auction;
pub mod clock;
pub mod config;
pub mod event;
pub mod ledger;
pub mod logging;
pub mod progress;
pub mod session;
pub mod timer;

pub use crate::{
    auction::{Amount, BidPolicy, InvalidArgument, ProductId, ProductIdRef},
    config::Config,
    event::{BidEvent, LoggedBid, Offset},
    ledger::{BidReader, BidRecorder, LedgerError},
    session::{BidFollower, BidSession, SessionError},
};

#[cfg(test)]
mod tests;
