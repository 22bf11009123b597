use crate::domain::money::{Denomination, Money};
use std::fmt;

/// Why a sale with change was called off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The coin inventory has no rows at all.
    NoChangeLoaded,
    /// The coins held cannot make up the change, either in total or by the greedy pass.
    InsufficientChange,
}

/// Result of an `insert_money` call.
///
/// Short payments, missing selections and liquidity problems are all normal
/// outcomes here, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    NoSelection,
    Unsold {
        outstanding: Money,
    },
    Sold {
        product: String,
    },
    SoldWithChange {
        product: String,
        change: Money,
        coins: Vec<Denomination>,
    },
    Aborted {
        reason: AbortReason,
        refunded: Money,
    },
}

impl PurchaseOutcome {
    /// True when the product was dispensed.
    pub fn is_sale(&self) -> bool {
        matches!(
            self,
            PurchaseOutcome::Sold { .. } | PurchaseOutcome::SoldWithChange { .. }
        )
    }
}

impl fmt::Display for PurchaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseOutcome::NoSelection => {
                write!(f, "No product selected, please make a selection first")
            }
            PurchaseOutcome::Unsold { outstanding } => write!(
                f,
                "Insufficient funds, please insert at least {}",
                outstanding
            ),
            PurchaseOutcome::Sold { product } => {
                write!(f, "Exact funds inserted, dispensing {}", product)
            }
            PurchaseOutcome::SoldWithChange {
                product, change, ..
            } => write!(
                f,
                "Enough change in machine, dispensing {} and £{} being returned",
                product, change
            ),
            PurchaseOutcome::Aborted {
                reason: AbortReason::NoChangeLoaded,
                ..
            } => write!(
                f,
                "No change in the machine, please speak to admins. Coin being returned"
            ),
            PurchaseOutcome::Aborted {
                reason: AbortReason::InsufficientChange,
                ..
            } => write!(
                f,
                "Not enough change in machine, inserted coins being returned"
            ),
        }
    }
}
