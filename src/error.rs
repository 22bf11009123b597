use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("Selected product code is not valid: {0}")]
    InvalidSelectionCode(String),
    #[error("Item {0} is out of stock")]
    OutOfStock(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Ledger conflict: {0}")]
    LedgerConflict(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl VendingError {
    /// True for the conditions a caller should treat as "not found":
    /// an unknown selection code or an empty product row.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VendingError::InvalidSelectionCode(_) | VendingError::OutOfStock(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VendingError>;
