use super::money::{Denomination, Money};
use serde::{Deserialize, Serialize};

/// One row of the coin inventory: how many coins of a denomination the machine holds.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Coin {
    pub denomination: Denomination,
    pub quantity: u32,
}

impl Coin {
    pub fn new(denomination: Denomination, quantity: u32) -> Self {
        Self {
            denomination,
            quantity,
        }
    }

    /// Face value of every coin in the row.
    pub fn total(&self) -> Money {
        self.denomination.value() * self.quantity
    }
}
