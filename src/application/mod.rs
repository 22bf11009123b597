//! Application layer containing the transaction engine.
//!
//! `VendingMachine` is the primary entry point: it drives selection, money
//! insertion, change dispensing and cancellation against the ledger store,
//! holding the single transaction slot under a `tokio` mutex.

pub mod engine;
pub mod outcome;
