use crate::domain::coin::Coin;
use crate::domain::product::Product;
use crate::error::Result;
use std::io::Write;

/// Writes ledger snapshots as CSV.
pub struct LedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_products(&mut self, products: impl IntoIterator<Item = Product>) -> Result<()> {
        for product in products {
            self.writer.serialize(product)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_coins(&mut self, coins: impl IntoIterator<Item = Coin>) -> Result<()> {
        for coin in coins {
            self.writer.serialize(coin)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::{Denomination, Money};
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_products() {
        let mut out = Vec::new();
        LedgerWriter::new(&mut out)
            .write_products(vec![Product::new("A1", "Crisps", Money::new(dec!(2)), 10)])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "code,name,cost,quantity\nA1,Crisps,2.00,10\n");
    }

    #[test]
    fn test_write_coins() {
        let mut out = Vec::new();
        LedgerWriter::new(&mut out)
            .write_coins(vec![
                Coin::new(Denomination::OnePound, 4),
                Coin::new(Denomination::FivePence, 0),
            ])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "denomination,quantity\n1.00,4\n0.05,0\n");
    }
}
