use crate::error::VendingError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// Number of decimal places every monetary value is held at.
pub const SCALE: u32 = 2;

/// A monetary value with exactly 2 decimal places.
///
/// Wraps `rust_decimal::Decimal`. Every constructor and every subtraction
/// rounds back to 2 places (banker's rounding), so change arithmetic never
/// drifts the way binary floats do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        let mut rounded = value.round_dp(SCALE);
        rounded.rescale(SCALE);
        Self(rounded)
    }

    /// Builds a value from a whole number of pence.
    pub fn from_pence(pence: i64) -> Self {
        Self(Decimal::new(pence, SCALE))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = VendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self::new)
            .map_err(|e| VendingError::ValidationError(format!("Invalid amount '{}': {}", s, e)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

// Rounded after every subtraction; the greedy change pass depends on it.
impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;
    fn mul(self, rhs: u32) -> Self::Output {
        Self::new(self.0 * Decimal::from(rhs))
    }
}

/// The closed set of coins the machine accepts and dispenses.
///
/// Variants are declared smallest first so the derived `Ord` follows face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum Denomination {
    OnePence,
    TwoPence,
    FivePence,
    TenPence,
    TwentyPence,
    FiftyPence,
    OnePound,
    TwoPounds,
}

impl Denomination {
    pub const ALL: [Denomination; 8] = [
        Denomination::OnePence,
        Denomination::TwoPence,
        Denomination::FivePence,
        Denomination::TenPence,
        Denomination::TwentyPence,
        Denomination::FiftyPence,
        Denomination::OnePound,
        Denomination::TwoPounds,
    ];

    pub fn pence(self) -> u32 {
        match self {
            Denomination::OnePence => 1,
            Denomination::TwoPence => 2,
            Denomination::FivePence => 5,
            Denomination::TenPence => 10,
            Denomination::TwentyPence => 20,
            Denomination::FiftyPence => 50,
            Denomination::OnePound => 100,
            Denomination::TwoPounds => 200,
        }
    }

    pub fn from_pence(pence: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.pence() == pence)
    }

    pub fn value(self) -> Money {
        Money::from_pence(i64::from(self.pence()))
    }
}

impl TryFrom<Decimal> for Denomination {
    type Error = VendingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .filter(|pence| pence.fract().is_zero())
            .and_then(|pence| pence.to_u32())
            .and_then(Self::from_pence)
            .ok_or_else(|| {
                VendingError::ValidationError(format!("{} is not a legal coin denomination", value))
            })
    }
}

impl TryFrom<Money> for Denomination {
    type Error = VendingError;

    fn try_from(value: Money) -> Result<Self, Self::Error> {
        Self::try_from(value.value())
    }
}

impl From<Denomination> for Decimal {
    fn from(denomination: Denomination) -> Self {
        denomination.value().value()
    }
}

impl From<Denomination> for Money {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

impl FromStr for Denomination {
    type Err = VendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|e| {
            VendingError::ValidationError(format!("Invalid denomination '{}': {}", s, e))
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}
