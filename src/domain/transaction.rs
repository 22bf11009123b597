use super::money::Money;
use super::product::Product;

/// Where the single transaction slot currently is.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransactionState {
    Idle,
    Selected,
}

/// The in-progress purchase. Never persisted.
///
/// Holds a snapshot of the selected product as it was in the stock ledger at
/// selection time, plus the money inserted so far.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Transaction {
    selection: Option<Product>,
    money: Money,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TransactionState {
        match self.selection {
            Some(_) => TransactionState::Selected,
            None => TransactionState::Idle,
        }
    }

    pub fn selection(&self) -> Option<&Product> {
        self.selection.as_ref()
    }

    pub fn money(&self) -> Money {
        self.money
    }

    /// Records `product` as the active selection. Accumulated money is left alone.
    pub fn select(&mut self, product: Product) -> Money {
        let cost = product.cost;
        self.selection = Some(product);
        cost
    }

    /// Adds `amount` to the running balance and returns the new balance.
    pub fn credit(&mut self, amount: Money) -> Money {
        self.money += amount;
        self.money
    }

    /// Hands the balance back, keeping the selection.
    pub fn refund(&mut self) -> Money {
        std::mem::take(&mut self.money)
    }

    /// Back to idle: no selection, no money.
    pub fn reset(&mut self) {
        self.selection = None;
        self.money = Money::ZERO;
    }
}
