use crate::domain::coin::Coin;
use crate::domain::money::{Denomination, Money};
use crate::domain::ports::{CoinLedger, LedgerStore, SaleBatch, StockLedger};
use crate::domain::product::Product;
use crate::error::{Result, VendingError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Column Family for the stock ledger, keyed by selection code.
pub const CF_STOCK: &str = "stock";
/// Column Family for the coin inventory, keyed by big-endian pence.
pub const CF_COINS: &str = "coins";

/// A persistent ledger store using RocksDB.
///
/// Stock and coins live in separate Column Families of one database, so a
/// `SaleBatch` touching both is written with a single atomic `WriteBatch`.
/// Stock keys are the raw code bytes, which makes forward iteration ascending
/// by code. Coin keys are the denomination in pence as a big-endian `u32`, so
/// reverse iteration yields the largest coin first.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "stock" and "coins" column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_stock = ColumnFamilyDescriptor::new(CF_STOCK, Options::default());
        let cf_coins = ColumnFamilyDescriptor::new(CF_COINS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_stock, cf_coins])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            VendingError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn read_product(&self, code: &str) -> Result<Option<Product>> {
        let cf = self.cf(CF_STOCK)?;
        self.db
            .get_cf(cf, code.as_bytes())?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn read_coin(&self, denomination: Denomination) -> Result<Option<Coin>> {
        let cf = self.cf(CF_COINS)?;
        self.db
            .get_cf(cf, coin_key(denomination))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn scan<T: DeserializeOwned>(&self, name: &str, mode: IteratorMode) -> Result<Vec<T>> {
        let cf = self.cf(name)?;
        let mut rows = Vec::new();
        for item in self.db.iterator_cf(cf, mode) {
            let (_key, value) = item?;
            rows.push(decode(&value)?);
        }
        Ok(rows)
    }
}

fn coin_key(denomination: Denomination) -> [u8; 4] {
    denomination.pence().to_be_bytes()
}

fn encode<T: Serialize>(row: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(row).map_err(|e| {
        VendingError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Serialization error: {}", e),
        )))
    })
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        VendingError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl StockLedger for RocksDBStore {
    async fn upsert_product(&self, product: Product) -> Result<()> {
        let cf = self.cf(CF_STOCK)?;
        self.db.put_cf(cf, product.code.as_bytes(), encode(&product)?)?;
        Ok(())
    }

    async fn get_product(&self, code: &str) -> Result<Option<Product>> {
        self.read_product(code)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.scan(CF_STOCK, IteratorMode::Start)
    }

    async fn decrement_product(&self, code: &str) -> Result<()> {
        let mut product = self.read_product(code)?.ok_or_else(|| {
            VendingError::LedgerConflict(format!("No stock row for {}", code))
        })?;
        product.purchase()?;
        let cf = self.cf(CF_STOCK)?;
        self.db.put_cf(cf, code.as_bytes(), encode(&product)?)?;
        Ok(())
    }
}

#[async_trait]
impl CoinLedger for RocksDBStore {
    async fn upsert_coin(&self, coin: Coin) -> Result<()> {
        let cf = self.cf(CF_COINS)?;
        self.db.put_cf(cf, coin_key(coin.denomination), encode(&coin)?)?;
        Ok(())
    }

    async fn get_coin(&self, denomination: Denomination) -> Result<Option<Coin>> {
        self.read_coin(denomination)
    }

    async fn list_coins(&self) -> Result<Vec<Coin>> {
        self.scan(CF_COINS, IteratorMode::End)
    }

    async fn total_value(&self) -> Result<Option<Money>> {
        let coins: Vec<Coin> = self.scan(CF_COINS, IteratorMode::Start)?;
        if coins.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            coins.iter().fold(Money::ZERO, |sum, coin| sum + coin.total()),
        ))
    }

    async fn decrement_coin(&self, denomination: Denomination) -> Result<()> {
        let mut coin = self
            .read_coin(denomination)?
            .filter(|c| c.quantity > 0)
            .ok_or_else(|| {
                VendingError::LedgerConflict(format!("No £{} coins left", denomination))
            })?;
        coin.quantity -= 1;
        let cf = self.cf(CF_COINS)?;
        self.db.put_cf(cf, coin_key(denomination), encode(&coin)?)?;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for RocksDBStore {
    async fn commit(&self, sale: SaleBatch) -> Result<()> {
        let cf_stock = self.cf(CF_STOCK)?;
        let cf_coins = self.cf(CF_COINS)?;
        let mut batch = WriteBatch::default();

        // Everything is read and checked before the batch is written.
        let mut product = self.read_product(&sale.product)?.ok_or_else(|| {
            VendingError::LedgerConflict(format!("No stock row for {}", sale.product))
        })?;
        product.purchase()?;
        batch.put_cf(cf_stock, product.code.as_bytes(), encode(&product)?);

        for (denomination, count) in sale.coin_counts() {
            let mut coin = self
                .read_coin(denomination)?
                .filter(|c| c.quantity >= count)
                .ok_or_else(|| {
                    VendingError::LedgerConflict(format!(
                        "Need {} x £{} but not enough held",
                        count, denomination
                    ))
                })?;
            coin.quantity -= count;
            batch.put_cf(cf_coins, coin_key(denomination), encode(&coin)?);
        }

        self.db.write(batch)?;
        debug!(product = %sale.product, coins = sale.coins.len(), "sale committed");
        Ok(())
    }
}
