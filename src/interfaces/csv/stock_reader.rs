use crate::domain::product::Product;
use crate::error::{Result, VendingError};
use std::io::Read;

/// Reads stock rows (`code, name, cost, quantity`) from a CSV source.
///
/// Rows whose cost is not positive are rejected here, before they can reach
/// the stock ledger. A quantity of 0 is accepted: it marks a row as
/// deliberately out of stock.
pub struct StockReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> StockReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    /// Returns an iterator that lazily reads and validates stock rows.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader.into_deserialize().map(|result| {
            let product: Product = result?;
            if !product.cost.is_positive() {
                return Err(VendingError::ValidationError(format!(
                    "Cost for {} must be positive, got {}",
                    product.code, product.cost
                )));
            }
            Ok(product)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "code, name, cost, quantity\nA1, Crisps, 1.99, 10\nA2, Cola, 1.2, 0";
        let results: Vec<Result<Product>> = StockReader::new(data.as_bytes()).products().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first, &Product::new("A1", "Crisps", Money::new(dec!(1.99)), 10));
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.cost.to_string(), "1.20");
        assert_eq!(second.quantity, 0);
    }

    #[test]
    fn test_reader_rejects_non_positive_cost() {
        let data = "code, name, cost, quantity\nA1, Crisps, 0, 10\nA2, Cola, -1.00, 1";
        let results: Vec<Result<Product>> = StockReader::new(data.as_bytes()).products().collect();

        assert!(matches!(results[0], Err(VendingError::ValidationError(_))));
        assert!(matches!(results[1], Err(VendingError::ValidationError(_))));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "code, name, cost, quantity\nA1, Crisps, 1.99, -3";
        let results: Vec<Result<Product>> = StockReader::new(data.as_bytes()).products().collect();

        assert!(matches!(results[0], Err(VendingError::CsvError(_))));
    }
}
