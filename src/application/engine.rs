use super::outcome::{AbortReason, PurchaseOutcome};
use crate::domain::change::compute_change;
use crate::domain::coin::Coin;
use crate::domain::money::{Denomination, Money};
use crate::domain::ports::{CoinLedger, LedgerStore, LedgerStoreBox, SaleBatch, StockLedger};
use crate::domain::product::{Product, PurchaseStatus};
use crate::domain::transaction::Transaction;
use crate::error::{Result, VendingError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The transaction engine for one physical vending machine.
///
/// `VendingMachine` owns the ledger store and the single transaction slot.
/// The slot sits behind one `Mutex` that every mutating operation holds until
/// its ledger writes have finished, so two callers can never interleave a
/// selection with someone else's coins or both pass the change check against
/// the same coin units.
pub struct VendingMachine {
    name: String,
    store: LedgerStoreBox,
    transaction: Mutex<Transaction>,
}

impl VendingMachine {
    /// Creates a new `VendingMachine` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - Identifies the machine in logs.
    /// * `store` - Backend holding the stock and coin ledgers.
    pub fn new(name: impl Into<String>, store: LedgerStoreBox) -> Self {
        Self {
            name: name.into(),
            store,
            transaction: Mutex::new(Transaction::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stocks or replaces a product row.
    pub async fn stock_row(&self, product: Product) -> Result<String> {
        let _slot = self.transaction.lock().await;
        let code = product.code.clone();
        self.store.upsert_product(product).await?;
        info!(machine = %self.name, code = %code, "stock row updated");
        Ok(format!("Stock row {} updated", code))
    }

    /// Sets how many coins of one denomination the machine holds.
    pub async fn restock_change(&self, coin: Coin) -> Result<String> {
        let _slot = self.transaction.lock().await;
        self.store.upsert_coin(coin).await?;
        info!(machine = %self.name, denomination = %coin.denomination, quantity = coin.quantity, "coins restocked");
        Ok(format!(
            "Coin £{} topped up to {} coins",
            coin.denomination, coin.quantity
        ))
    }

    /// Stock ledger snapshot, ascending by selection code.
    pub async fn list_stock(&self) -> Result<Vec<Product>> {
        self.store.list_products().await
    }

    /// Coin inventory snapshot, largest denomination first.
    pub async fn list_change(&self) -> Result<Vec<Coin>> {
        self.store.list_coins().await
    }

    /// Chooses the product to buy and returns its cost.
    ///
    /// Money already inserted stays in the machine.
    pub async fn select_product(&self, code: &str) -> Result<Money> {
        let mut tx = self.transaction.lock().await;
        let product = self
            .store
            .get_product(code)
            .await?
            .ok_or_else(|| VendingError::InvalidSelectionCode(code.to_string()))?;
        if !product.is_in_stock() {
            return Err(VendingError::OutOfStock(product.code));
        }
        debug!(machine = %self.name, code = %product.code, cost = %product.cost, "product selected");
        Ok(tx.select(product))
    }

    /// Adds `coin` to the balance and completes the sale once it covers the cost.
    ///
    /// A sale only completes after its stock and coin decrements have been
    /// committed together. If the commit fails the error is returned and the
    /// transaction is left exactly as it was before this call.
    pub async fn insert_money(&self, coin: Denomination) -> Result<PurchaseOutcome> {
        let amount = coin.value();
        let mut tx = self.transaction.lock().await;
        let Some(product) = tx.selection().cloned() else {
            return Ok(PurchaseOutcome::NoSelection);
        };

        let balance = tx.money() + amount;
        let outcome = match product.try_purchase(balance) {
            PurchaseStatus::Unsold { outstanding } => {
                tx.credit(amount);
                return Ok(PurchaseOutcome::Unsold { outstanding });
            }
            PurchaseStatus::Sold => {
                self.store
                    .commit(SaleBatch::new(&product.code, Vec::new()))
                    .await?;
                PurchaseOutcome::Sold {
                    product: product.name.clone(),
                }
            }
            PurchaseStatus::Evaluate { change } => {
                self.dispense_change(&product, balance, change).await?
            }
        };

        tx.reset();
        match &outcome {
            PurchaseOutcome::Aborted { reason, refunded } => {
                warn!(machine = %self.name, code = %product.code, ?reason, refunded = %refunded, "sale aborted");
            }
            _ => info!(machine = %self.name, code = %product.code, "sale completed"),
        }
        Ok(outcome)
    }

    /// Availability, sufficiency, greedy pass, then one atomic commit.
    async fn dispense_change(
        &self,
        product: &Product,
        balance: Money,
        change: Money,
    ) -> Result<PurchaseOutcome> {
        let aborted = |reason| PurchaseOutcome::Aborted {
            reason,
            refunded: balance,
        };

        let Some(total) = self.store.total_value().await? else {
            return Ok(aborted(AbortReason::NoChangeLoaded));
        };
        if total < change {
            return Ok(aborted(AbortReason::InsufficientChange));
        }

        let inventory = self.store.list_coins().await?;
        let Some(coins) = compute_change(change, &inventory) else {
            debug!(machine = %self.name, change = %change, "greedy pass left a remainder");
            return Ok(aborted(AbortReason::InsufficientChange));
        };

        self.store
            .commit(SaleBatch::new(&product.code, coins.clone()))
            .await?;
        Ok(PurchaseOutcome::SoldWithChange {
            product: product.name.clone(),
            change,
            coins,
        })
    }

    /// Hands back the inserted money but keeps the selection.
    pub async fn return_money(&self) -> String {
        let mut tx = self.transaction.lock().await;
        if tx.refund().is_positive() {
            "Money inserted has been returned".to_string()
        } else {
            "No money to return".to_string()
        }
    }

    /// Drops the selection and returns any money. Always succeeds.
    pub async fn cancel_transaction(&self) -> String {
        let mut tx = self.transaction.lock().await;
        tx.reset();
        debug!(machine = %self.name, "transaction cancelled");
        "Any selection cancelled and any money returned".to_string()
    }

    /// Money inserted in the current transaction.
    pub async fn return_balance(&self) -> Money {
        self.transaction.lock().await.money()
    }

    /// A copy of the current transaction slot.
    pub async fn transaction(&self) -> Transaction {
        self.transaction.lock().await.clone()
    }
}
