//! Domain model: money, ledger rows, the transaction slot, the change
//! calculator and the storage ports the application layer depends on.

pub mod change;
pub mod coin;
pub mod money;
pub mod ports;
pub mod product;
pub mod transaction;
