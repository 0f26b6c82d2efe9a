use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const LBP_CURRENCY_CODE: &str = "LBP";
pub const LBP_CURRENCY_CODE_LOWER: &str = "lbp";

//--------------------------------------        Lbp        -----------------------------------------------------------
/// An amount of Lebanese pounds, stored as a count of the smallest currency unit. All ledger arithmetic is exact
/// integer arithmetic on this type; there is no floating point anywhere in the money path.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Lbp(i64);

op!(binary Lbp, Add, add);
op!(binary Lbp, Sub, sub);
op!(inplace Lbp, AddAssign, add_assign);
op!(inplace Lbp, SubAssign, sub_assign);
op!(unary Lbp, Neg, neg);

impl Mul<i64> for Lbp {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Lbp {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in LBP: {0}")]
pub struct LbpConversionError(String);

impl From<i64> for Lbp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Lbp {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Lbp {}

impl TryFrom<u64> for Lbp {
    type Error = LbpConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(LbpConversionError(format!("Value {value} is too large to convert to Lbp")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Lbp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();
        let mut groups = Vec::new();
        let bytes = digits.as_bytes();
        let mut i = bytes.len();
        while i > 3 {
            groups.push(&digits[i - 3..i]);
            i -= 3;
        }
        groups.push(&digits[..i]);
        let grouped = groups.iter().rev().copied().collect::<Vec<_>>().join(",");
        if negative {
            write!(f, "-{grouped}")
        } else {
            write!(f, "{grouped}")
        }
    }
}

impl Lbp {
    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::Lbp;

    #[test]
    fn arithmetic_is_exact() {
        let balance = Lbp::from(1_000_000);
        let price = Lbp::from(870_000);
        assert_eq!(balance - price, Lbp::from(130_000));
        assert_eq!(Lbp::from(100) * 3, Lbp::from(300));
        assert_eq!(-Lbp::from(5), Lbp::from(-5));
        let total: Lbp = [Lbp::from(1), Lbp::from(2), Lbp::from(3)].into_iter().sum();
        assert_eq!(total, Lbp::from(6));
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Lbp::from(0).to_string(), "0");
        assert_eq!(Lbp::from(999).to_string(), "999");
        assert_eq!(Lbp::from(1_000).to_string(), "1,000");
        assert_eq!(Lbp::from(870_000).to_string(), "870,000");
        assert_eq!(Lbp::from(2_280_000).to_string(), "2,280,000");
        assert_eq!(Lbp::from(-1_450_000).to_string(), "-1,450,000");
    }
}
