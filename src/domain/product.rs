use super::money::Money;
use crate::error::{Result, VendingError};
use serde::{Deserialize, Serialize};

/// How the money inserted so far compares with a product's cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    /// Not enough yet; `outstanding` is what is still owed.
    Unsold { outstanding: Money },
    /// Exact funds.
    Sold,
    /// Too much; `change` has to come out of the coin inventory.
    Evaluate { change: Money },
}

/// One row of the stock ledger.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Product {
    /// Selection code the customer keys in (primary key).
    pub code: String,
    pub name: String,
    pub cost: Money,
    pub quantity: u32,
}

impl Product {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        cost: Money,
        quantity: u32,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            cost,
            quantity,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Classifies an inserted balance against this product's cost.
    pub fn try_purchase(&self, money_inserted: Money) -> PurchaseStatus {
        if money_inserted < self.cost {
            PurchaseStatus::Unsold {
                outstanding: self.cost - money_inserted,
            }
        } else if money_inserted == self.cost {
            PurchaseStatus::Sold
        } else {
            PurchaseStatus::Evaluate {
                change: money_inserted - self.cost,
            }
        }
    }

    /// Takes one unit out of the row.
    pub fn purchase(&mut self) -> Result<()> {
        if self.quantity == 0 {
            return Err(VendingError::OutOfStock(self.code.clone()));
        }
        self.quantity -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn crisps() -> Product {
        Product::new("A1", "Crisps", Money::new(dec!(1.99)), 10)
    }

    #[test]
    fn test_try_purchase_unsold_quotes_shortfall() {
        let status = crisps().try_purchase(Money::new(dec!(1.50)));
        assert_eq!(
            status,
            PurchaseStatus::Unsold {
                outstanding: Money::new(dec!(0.49))
            }
        );
    }

    #[test]
    fn test_try_purchase_exact() {
        assert_eq!(
            crisps().try_purchase(Money::new(dec!(1.99))),
            PurchaseStatus::Sold
        );
    }

    #[test]
    fn test_try_purchase_excess() {
        assert_eq!(
            crisps().try_purchase(Money::new(dec!(2.00))),
            PurchaseStatus::Evaluate {
                change: Money::new(dec!(0.01))
            }
        );
    }

    #[test]
    fn test_purchase_decrements() {
        let mut product = crisps();
        product.purchase().unwrap();
        assert_eq!(product.quantity, 9);
    }

    #[test]
    fn test_purchase_empty_row() {
        let mut product = Product::new("B2", "Gum", Money::new(dec!(0.50)), 0);
        assert!(!product.is_in_stock());
        assert!(matches!(product.purchase(), Err(VendingError::OutOfStock(_))));
        assert_eq!(product.quantity, 0);
    }
}
