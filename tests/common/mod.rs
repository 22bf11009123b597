use std::io::{Error, Write};
use tempfile::NamedTempFile;
use vending_engine::application::engine::VendingMachine;
use vending_engine::domain::coin::Coin;
use vending_engine::domain::money::Money;
use vending_engine::domain::product::Product;
use vending_engine::infrastructure::in_memory::InMemoryLedgerStore;

/// Writes `lines` (header first) to a temporary CSV file.
pub fn csv_file(lines: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()?;
    Ok(file)
}

/// A machine over a fresh in-memory store, with the given rows already loaded.
pub async fn machine(products: &[(&str, &str, &str, u32)], coins: &[Coin]) -> VendingMachine {
    let machine = VendingMachine::new("test_machine", Box::new(InMemoryLedgerStore::new()));
    for (code, name, cost, quantity) in products {
        let cost: Money = cost.parse().expect("Invalid cost in fixture");
        machine
            .stock_row(Product::new(*code, *name, cost, *quantity))
            .await
            .expect("Failed to stock row");
    }
    for coin in coins {
        machine
            .restock_change(*coin)
            .await
            .expect("Failed to restock coins");
    }
    machine
}

pub async fn quantity(machine: &VendingMachine, code: &str) -> u32 {
    machine
        .list_stock()
        .await
        .expect("Failed to list stock")
        .into_iter()
        .find(|p| p.code == code)
        .map_or(0, |p| p.quantity)
}
