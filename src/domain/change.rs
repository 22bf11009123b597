//! Greedy change-making over the machine's coin inventory.
//!
//! Denominations are visited largest first and each one is used as many times
//! as it fits and stock allows. There is no backtracking: an inventory that
//! could only pay out via a non-greedy combination is reported as a failure.

use super::coin::Coin;
use super::money::{Denomination, Money};

/// Works out which coins to hand back for `required`.
///
/// `inventory` must be ordered by descending denomination, as returned by
/// `CoinLedger::list_coins`. Returns the coins to dispense, one entry per
/// unit, or `None` when the greedy pass leaves a remainder. The inventory is
/// never modified.
pub fn compute_change(required: Money, inventory: &[Coin]) -> Option<Vec<Denomination>> {
    let mut remaining = required;
    let mut dispensed = Vec::new();

    for coin in inventory {
        let value = coin.denomination.value();
        let mut available = coin.quantity;
        while remaining >= value && available > 0 {
            dispensed.push(coin.denomination);
            available -= 1;
            remaining = remaining - value;
        }
    }

    if remaining.is_positive() {
        None
    } else {
        Some(dispensed)
    }
}
