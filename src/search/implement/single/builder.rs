use std::sync::Arc;

use crate::broker::Broker;
use crate::offering::Offering;
use crate::search::implement::single::SingleSearch;
use crate::types::CashValue;

/// Builds [SingleSearch].
pub struct SingleSearchBuilder {
    offering: Option<Arc<Offering>>,
    brokers: Vec<Arc<Broker>>,
    budget: CashValue,
}

impl SingleSearchBuilder {
    pub fn build(&mut self) -> SingleSearch {
        if self.offering.is_none() {
            panic!("Cannot build search without offering");
        }

        let offering = std::mem::take(&mut self.offering).unwrap();

        SingleSearch {
            offering,
            brokers: self.brokers.clone(),
            budget: self.budget.clone(),
        }
    }

    pub fn with_offering(&mut self, offering: Arc<Offering>) -> &mut Self {
        self.offering = Some(offering);
        self
    }

    pub fn with_broker(&mut self, broker: Arc<Broker>) -> &mut Self {
        self.brokers.push(broker);
        self
    }

    pub fn with_brokers(&mut self, brokers: Vec<Arc<Broker>>) -> &mut Self {
        self.brokers = brokers;
        self
    }

    pub fn with_budget(&mut self, budget: impl Into<CashValue>) -> &mut Self {
        self.budget = budget.into();
        self
    }

    pub fn new() -> Self {
        SingleSearchBuilder {
            offering: None,
            brokers: Vec::new(),
            budget: CashValue::default(),
        }
    }
}

impl Default for SingleSearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
