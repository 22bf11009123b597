use super::coin::Coin;
use super::money::{Denomination, Money};
use super::product::Product;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Inserts the row, or replaces the existing row with the same code.
    async fn upsert_product(&self, product: Product) -> Result<()>;
    async fn get_product(&self, code: &str) -> Result<Option<Product>>;
    /// Fresh snapshot, ascending by selection code.
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn decrement_product(&self, code: &str) -> Result<()>;
}

#[async_trait]
pub trait CoinLedger: Send + Sync {
    /// Sets the quantity held for the denomination. Replaces, never adds.
    async fn upsert_coin(&self, coin: Coin) -> Result<()>;
    async fn get_coin(&self, denomination: Denomination) -> Result<Option<Coin>>;
    /// Fresh snapshot, descending by denomination.
    async fn list_coins(&self) -> Result<Vec<Coin>>;
    /// Sum of denomination x quantity, or `None` when no coin rows exist at all.
    async fn total_value(&self) -> Result<Option<Money>>;
    async fn decrement_coin(&self, denomination: Denomination) -> Result<()>;
}

/// A backend holding both ledgers that can apply a sale as one unit.
#[async_trait]
pub trait LedgerStore: StockLedger + CoinLedger {
    /// Applies every decrement in `batch` or none of them.
    async fn commit(&self, batch: SaleBatch) -> Result<()>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;

/// The ledger mutations for one completed sale: one unit of stock plus
/// one unit per coin handed back as change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleBatch {
    pub product: String,
    pub coins: Vec<Denomination>,
}

impl SaleBatch {
    pub fn new(product: impl Into<String>, coins: Vec<Denomination>) -> Self {
        Self {
            product: product.into(),
            coins,
        }
    }

    /// Units to take per denomination.
    pub fn coin_counts(&self) -> BTreeMap<Denomination, u32> {
        let mut counts = BTreeMap::new();
        for denomination in &self.coins {
            *counts.entry(*denomination).or_insert(0) += 1;
        }
        counts
    }
}
