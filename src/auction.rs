use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProductId = String;
pub type ProductIdRef<'s> = &'s str;
pub type Amount = f64;

/// Reasons a bid is refused before it reaches the ledger
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum InvalidArgument {
    #[error("product id is empty")]
    EmptyProductId,
    #[error("amount is not a finite number: {0}")]
    NonFiniteAmount(Amount),
    #[error("amount is negative: {0}")]
    NegativeAmount(Amount),
}

/// How strictly incoming bids are checked
///
/// `Lenient` keeps accepting negative amounts the way the web client
/// always did. Empty product ids and non-finite amounts are refused
/// either way, since `highest_bid` would be meaningless with them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidPolicy {
    #[default]
    Strict,
    Lenient,
}

impl BidPolicy {
    pub fn check(self, product_id: ProductIdRef, amount: Amount) -> Result<(), InvalidArgument> {
        use InvalidArgument::*;

        if product_id.trim().is_empty() {
            return Err(EmptyProductId);
        }
        check_finite(amount)?;
        if self == BidPolicy::Strict && amount < 0.0 {
            return Err(NegativeAmount(amount));
        }
        Ok(())
    }
}

pub fn check_finite(amount: Amount) -> Result<(), InvalidArgument> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(InvalidArgument::NonFiniteAmount(amount))
    }
}

/// A price anywhere in the marketplace: finite and not below zero
pub fn check_price(amount: Amount) -> Result<(), InvalidArgument> {
    check_finite(amount)?;
    if amount < 0.0 {
        return Err(InvalidArgument::NegativeAmount(amount));
    }
    Ok(())
}
