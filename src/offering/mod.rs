//! Immutable description of a fixed-price share offering.

use crate::types::{LotCount, Price};

///Admissible lot counts used when a client does not supply its own table.
pub const DEFAULT_LOT_TABLE: [u32; 31] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 16, 18, 20, 30, 40, 50, 60, 70, 80, 90, 100, 120, 140,
    160, 180, 200, 400, 600, 800,
];

/// Terms of a fixed-price share offering.
///
/// Constructed once from external configuration, never mutated, and shared
/// read-only across every component that prices a subscription. The winning
/// rate rises with the number of lots applied for: one lot wins with the base
/// rate, each further lot adds `winning_rate_growth`.
#[derive(Clone, Debug)]
pub struct Offering {
    name: String,
    price: Price,
    freeze_days: u32,
    growth_rate: f64,
    base_winning_rate: f64,
    winning_rate_growth: f64,
    lot_table: Vec<LotCount>,
}

impl Offering {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price.clone()
    }

    pub fn freeze_days(&self) -> u32 {
        self.freeze_days
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn base_winning_rate(&self) -> f64 {
        self.base_winning_rate
    }

    pub fn winning_rate_growth(&self) -> f64 {
        self.winning_rate_growth
    }

    pub fn lot_table(&self) -> &[LotCount] {
        &self.lot_table
    }

    /// Probability of winning an allotment for the given lot count.
    ///
    /// Undefined for zero lots, callers check for zero before querying. We
    /// still return the base rate rather than underflowing the lot count.
    pub fn winning_rate(&self, lots: LotCount) -> f64 {
        if *lots <= 1 {
            self.base_winning_rate
        } else {
            self.base_winning_rate + f64::from(*lots - 1) * self.winning_rate_growth
        }
    }

    /// Largest admissible lot count that is less than or equal to the request,
    /// zero when the request is below the smallest table entry.
    pub fn snap_lots(&self, requested: u32) -> LotCount {
        let mut snapped = 0;
        for entry in &self.lot_table {
            if **entry <= requested {
                snapped = **entry;
            } else {
                break;
            }
        }
        LotCount::from(snapped)
    }

    pub fn description(&self) -> String {
        format!(
            "{} price: {} freeze days: {} growth rate: {} base winning rate: {} winning rate growth: {}",
            self.name,
            *self.price,
            self.freeze_days,
            self.growth_rate,
            self.base_winning_rate,
            self.winning_rate_growth
        )
    }
}

/// Builds [Offering].
pub struct OfferingBuilder {
    name: String,
    price: Option<Price>,
    freeze_days: u32,
    growth_rate: f64,
    base_winning_rate: f64,
    winning_rate_growth: f64,
    lot_table: Vec<LotCount>,
}

impl OfferingBuilder {
    pub fn build(&mut self) -> Offering {
        if self.price.is_none() {
            panic!("Cannot build offering without price");
        }
        if self.lot_table.is_empty() {
            panic!("Cannot build offering with empty lot table");
        }
        if !self.lot_table.windows(2).all(|pair| pair[0] < pair[1]) {
            panic!("Cannot build offering with unsorted lot table");
        }

        let price = std::mem::take(&mut self.price).unwrap();

        Offering {
            name: self.name.clone(),
            price,
            freeze_days: self.freeze_days,
            growth_rate: self.growth_rate,
            base_winning_rate: self.base_winning_rate,
            winning_rate_growth: self.winning_rate_growth,
            lot_table: self.lot_table.clone(),
        }
    }

    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn with_price(&mut self, price: impl Into<Price>) -> &mut Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_freeze_days(&mut self, freeze_days: u32) -> &mut Self {
        self.freeze_days = freeze_days;
        self
    }

    pub fn with_growth_rate(&mut self, growth_rate: f64) -> &mut Self {
        self.growth_rate = growth_rate;
        self
    }

    pub fn with_base_winning_rate(&mut self, base_winning_rate: f64) -> &mut Self {
        self.base_winning_rate = base_winning_rate;
        self
    }

    pub fn with_winning_rate_growth(&mut self, winning_rate_growth: f64) -> &mut Self {
        self.winning_rate_growth = winning_rate_growth;
        self
    }

    pub fn with_lot_table(&mut self, lot_table: Vec<u32>) -> &mut Self {
        self.lot_table = lot_table.into_iter().map(LotCount::from).collect();
        self
    }

    pub fn new() -> Self {
        OfferingBuilder {
            name: String::new(),
            price: None,
            freeze_days: 3,
            growth_rate: 0.1,
            base_winning_rate: 0.03,
            winning_rate_growth: 0.007,
            lot_table: DEFAULT_LOT_TABLE.iter().map(|v| LotCount::from(*v)).collect(),
        }
    }
}

impl Default for OfferingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
