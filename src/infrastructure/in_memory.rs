use crate::domain::coin::Coin;
use crate::domain::money::{Denomination, Money};
use crate::domain::ports::{CoinLedger, LedgerStore, SaleBatch, StockLedger};
use crate::domain::product::Product;
use crate::error::{Result, VendingError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Ledgers {
    stock: BTreeMap<String, Product>,
    coins: BTreeMap<Denomination, Coin>,
}

impl Ledgers {
    fn check(&self, batch: &SaleBatch) -> Result<()> {
        match self.stock.get(&batch.product) {
            Some(product) if product.is_in_stock() => {}
            Some(_) => return Err(VendingError::OutOfStock(batch.product.clone())),
            None => {
                return Err(VendingError::LedgerConflict(format!(
                    "No stock row for {}",
                    batch.product
                )));
            }
        }
        for (denomination, needed) in batch.coin_counts() {
            let held = self.coins.get(&denomination).map_or(0, |c| c.quantity);
            if held < needed {
                return Err(VendingError::LedgerConflict(format!(
                    "Need {} x £{} but only {} held",
                    needed, denomination, held
                )));
            }
        }
        Ok(())
    }
}

/// A thread-safe in-memory home for both ledgers.
///
/// Stock and coins sit behind a single `RwLock`, so a `SaleBatch` is checked
/// and applied under one write guard. Ideal for testing or a machine whose
/// ledgers are reloaded at start-up.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    ledgers: Arc<RwLock<Ledgers>>,
}

impl InMemoryLedgerStore {
    /// Creates a new store with empty stock and coin ledgers.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockLedger for InMemoryLedgerStore {
    async fn upsert_product(&self, product: Product) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        ledgers.stock.insert(product.code.clone(), product);
        Ok(())
    }

    async fn get_product(&self, code: &str) -> Result<Option<Product>> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.stock.get(code).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.stock.values().cloned().collect())
    }

    async fn decrement_product(&self, code: &str) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        let product = ledgers.stock.get_mut(code).ok_or_else(|| {
            VendingError::LedgerConflict(format!("No stock row for {}", code))
        })?;
        product.purchase()
    }
}

#[async_trait]
impl CoinLedger for InMemoryLedgerStore {
    async fn upsert_coin(&self, coin: Coin) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        ledgers.coins.insert(coin.denomination, coin);
        Ok(())
    }

    async fn get_coin(&self, denomination: Denomination) -> Result<Option<Coin>> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.coins.get(&denomination).copied())
    }

    async fn list_coins(&self) -> Result<Vec<Coin>> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.coins.values().rev().copied().collect())
    }

    async fn total_value(&self) -> Result<Option<Money>> {
        let ledgers = self.ledgers.read().await;
        if ledgers.coins.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            ledgers
                .coins
                .values()
                .fold(Money::ZERO, |sum, coin| sum + coin.total()),
        ))
    }

    async fn decrement_coin(&self, denomination: Denomination) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        match ledgers.coins.get_mut(&denomination) {
            Some(coin) if coin.quantity > 0 => {
                coin.quantity -= 1;
                Ok(())
            }
            _ => Err(VendingError::LedgerConflict(format!(
                "No £{} coins left",
                denomination
            ))),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn commit(&self, batch: SaleBatch) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        ledgers.check(&batch)?;

        if let Some(product) = ledgers.stock.get_mut(&batch.product) {
            product.purchase()?;
        }
        for (denomination, count) in batch.coin_counts() {
            if let Some(coin) = ledgers.coins.get_mut(&denomination) {
                coin.quantity -= count;
            }
        }
        debug!(product = %batch.product, coins = batch.coins.len(), "sale committed");
        Ok(())
    }
}
