//! Generic types used across package

use std::fmt::{Display, Formatter};
use std::ops::{Add, Deref};

///Defines a set of base types that are used by multiple components.

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct CashValue(f64);

impl Deref for CashValue {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for CashValue {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<CashValue> for f64 {
    fn from(v: CashValue) -> Self {
        v.0
    }
}

impl From<f64> for CashValue {
    fn from(v: f64) -> Self {
        CashValue(v)
    }
}

impl Add<CashValue> for CashValue {
    type Output = CashValue;

    fn add(self, rhs: CashValue) -> Self::Output {
        CashValue::from(*self + *rhs)
    }
}

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Deref for Price {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<Price> for f64 {
    fn from(v: Price) -> Self {
        v.0
    }
}

impl From<f64> for Price {
    fn from(v: f64) -> Self {
        Price(v)
    }
}

///Number of lots in a subscription application. Applications can only be made
///for lot counts present in an offering's lot table, or zero when the cash
///allocated cannot reach the smallest table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LotCount(u32);

impl Deref for LotCount {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<LotCount> for u32 {
    fn from(v: LotCount) -> Self {
        v.0
    }
}

impl From<u32> for LotCount {
    fn from(v: u32) -> Self {
        LotCount(v)
    }
}

///Single labelled amount within a cost or earnings trace. Calculations return
///these alongside their numeric result so callers can audit how a figure was
///reached without the calculation performing any output itself.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceLine {
    pub label: String,
    pub amount: f64,
}

impl TraceLine {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

impl Display for TraceLine {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.amount)
    }
}
