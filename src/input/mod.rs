//! Configuration sources that produce the offering, brokers and budget for a
//! search. The core never parses raw configuration itself, it consumes the
//! assembled value objects these sources produce.

use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use rand::distributions::{Distribution, Uniform};
use rand::thread_rng;
use serde::{Deserialize, Serialize};

use crate::broker::{Broker, BrokerBuilder};
use crate::offering::{Offering, OfferingBuilder};
use crate::types::CashValue;

fn default_fee() -> f64 {
    100.0
}

fn default_financing_rate() -> f64 {
    0.03
}

fn default_financing_multiple() -> f64 {
    10.0
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OfferingConfig {
    pub name: String,
    pub price: f64,
    pub freeze_days: u32,
    pub growth_rate: f64,
    pub base_winning_rate: f64,
    pub winning_rate_growth: f64,
    //Falls back to the built-in admissible lot table when omitted
    #[serde(default)]
    pub lot_table: Option<Vec<u32>>,
}

impl From<&OfferingConfig> for Offering {
    fn from(config: &OfferingConfig) -> Self {
        let mut builder = OfferingBuilder::new();
        builder
            .with_name(config.name.clone())
            .with_price(config.price)
            .with_freeze_days(config.freeze_days)
            .with_growth_rate(config.growth_rate)
            .with_base_winning_rate(config.base_winning_rate)
            .with_winning_rate_growth(config.winning_rate_growth);
        if let Some(lot_table) = &config.lot_table {
            builder.with_lot_table(lot_table.clone());
        }
        builder.build()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerConfig {
    pub name: String,
    #[serde(default = "default_fee")]
    pub cash_fee: f64,
    #[serde(default = "default_fee")]
    pub financing_fee: f64,
    #[serde(default = "default_financing_rate")]
    pub financing_rate: f64,
    #[serde(default = "default_financing_multiple")]
    pub financing_multiple: f64,
}

impl From<&BrokerConfig> for Broker {
    fn from(config: &BrokerConfig) -> Self {
        BrokerBuilder::new()
            .with_name(config.name.clone())
            .with_cash_fee(config.cash_fee)
            .with_financing_fee(config.financing_fee)
            .with_financing_rate(config.financing_rate)
            .with_financing_multiple(config.financing_multiple)
            .build()
    }
}

/// Full input for one search: the offering terms, the ordered broker list and
/// the budget to distribute.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArrangeConfig {
    pub offering: OfferingConfig,
    pub brokers: Vec<BrokerConfig>,
    pub budget: f64,
}

impl ArrangeConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let contents = read_to_string(path)?;
        Self::from_json(&contents).map_err(std::io::Error::from)
    }

    /// Assembled, shared value objects ready to hand to a search builder.
    pub fn assemble(&self) -> (Arc<Offering>, Vec<Arc<Broker>>, CashValue) {
        let offering = Arc::new(Offering::from(&self.offering));
        let brokers = self
            .brokers
            .iter()
            .map(|config| Arc::new(Broker::from(config)))
            .collect_vec();
        (offering, brokers, CashValue::from(self.budget))
    }
}

/// Built-in sample scenario: one offering, six brokers with mixed fee
/// schedules and a budget of roughly thirteen lots.
pub fn sample_arrange_config() -> ArrangeConfig {
    let offering = OfferingConfig {
        name: "ABC".to_string(),
        price: 10700.0,
        freeze_days: 5,
        growth_rate: 0.06,
        base_winning_rate: 0.05,
        winning_rate_growth: 0.007,
        lot_table: None,
    };

    let brokers = vec![
        BrokerConfig {
            name: "Tiger".to_string(),
            cash_fee: 100.0,
            financing_fee: 100.0,
            financing_rate: 0.03,
            financing_multiple: 10.0,
        },
        BrokerConfig {
            name: "Futu".to_string(),
            cash_fee: 50.0,
            financing_fee: 100.0,
            financing_rate: 0.03,
            financing_multiple: 10.0,
        },
        BrokerConfig {
            name: "Phillip".to_string(),
            cash_fee: 0.0,
            financing_fee: 0.0,
            financing_rate: 0.03,
            financing_multiple: 10.0,
        },
        BrokerConfig {
            name: "Huatai".to_string(),
            cash_fee: 0.0,
            financing_fee: 0.0,
            financing_rate: 0.03,
            financing_multiple: 10.0,
        },
        BrokerConfig {
            name: "Eddid".to_string(),
            cash_fee: 0.0,
            financing_fee: 100.0,
            financing_rate: 0.03,
            financing_multiple: 10.0,
        },
        BrokerConfig {
            name: "Bright Smart".to_string(),
            cash_fee: 0.0,
            financing_fee: 100.0,
            financing_rate: 0.03,
            financing_multiple: 10.0,
        },
    ];

    ArrangeConfig {
        offering,
        brokers,
        budget: 140_000.0,
    }
}

/// Generates a random configuration, useful for benchmarks and stress tests.
pub fn random_arrange_generator(broker_count: usize, budget_in_lots: u32) -> ArrangeConfig {
    let fee_dist = Uniform::new(0.0, 150.0);
    let rate_dist = Uniform::new(0.01, 0.05);
    let mut rng = thread_rng();

    let offering = OfferingConfig {
        name: "RND".to_string(),
        price: 10000.0,
        freeze_days: 5,
        growth_rate: 0.06,
        base_winning_rate: 0.05,
        winning_rate_growth: 0.007,
        lot_table: None,
    };

    let mut brokers = Vec::new();
    for index in 0..broker_count {
        brokers.push(BrokerConfig {
            name: format!("Broker{}", index),
            cash_fee: fee_dist.sample(&mut rng),
            financing_fee: fee_dist.sample(&mut rng),
            financing_rate: rate_dist.sample(&mut rng),
            financing_multiple: 10.0,
        });
    }

    ArrangeConfig {
        offering,
        brokers,
        budget: f64::from(budget_in_lots) * 10000.0,
    }
}
