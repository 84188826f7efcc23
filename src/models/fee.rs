//! Exact fee amounts
//!
//! Every base fee and surcharge has at most one decimal place, so fees are
//! kept as whole tenths of a currency unit and summed without rounding.

use std::fmt;
use std::ops::Add;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fee {
    tenths: u32,
}

impl Fee {
    pub const ZERO: Fee = Fee { tenths: 0 };

    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// Human-readable amount with currency, e.g. `4.5 €`
    #[must_use]
    pub fn display_with_currency(self) -> String {
        format!("{self} €")
    }
}

impl Add for Fee {
    type Output = Fee;

    fn add(self, rhs: Fee) -> Fee {
        Fee::from_tenths(self.tenths + rhs.tenths)
    }
}

impl std::iter::Sum for Fee {
    fn sum<I: Iterator<Item = Fee>>(iter: I) -> Fee {
        iter.fold(Fee::ZERO, Add::add)
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl Serialize for Fee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}
