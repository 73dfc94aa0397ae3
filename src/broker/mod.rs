//! Fee and rate terms for a brokerage account.

use crate::types::CashValue;

/// Terms a brokerage offers for subscribing to an offering.
///
/// A cash application pays a flat fee. A financing application pays its own
/// flat fee plus interest on the borrowed portion of the leveraged position
/// for the freeze period. Immutable once constructed and shared read-only
/// across every search branch.
#[derive(Clone, Debug)]
pub struct Broker {
    name: String,
    cash_fee: CashValue,
    financing_fee: CashValue,
    financing_rate: f64,
    financing_multiple: f64,
}

impl Broker {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash_fee(&self) -> CashValue {
        self.cash_fee.clone()
    }

    pub fn financing_fee(&self) -> CashValue {
        self.financing_fee.clone()
    }

    pub fn financing_rate(&self) -> f64 {
        self.financing_rate
    }

    pub fn financing_multiple(&self) -> f64 {
        self.financing_multiple
    }

    pub fn description(&self) -> String {
        format!(
            "{} cash fee: {} financing fee: {} financing rate: {} financing multiple: {}",
            self.name, *self.cash_fee, *self.financing_fee, self.financing_rate, self.financing_multiple
        )
    }
}

/// Builds [Broker].
pub struct BrokerBuilder {
    name: Option<String>,
    cash_fee: CashValue,
    financing_fee: CashValue,
    financing_rate: f64,
    financing_multiple: f64,
}

impl BrokerBuilder {
    pub fn build(&mut self) -> Broker {
        if self.name.is_none() {
            panic!("Cannot build broker without name");
        }

        let name = std::mem::take(&mut self.name).unwrap();

        Broker {
            name,
            cash_fee: self.cash_fee.clone(),
            financing_fee: self.financing_fee.clone(),
            financing_rate: self.financing_rate,
            financing_multiple: self.financing_multiple,
        }
    }

    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cash_fee(&mut self, cash_fee: impl Into<CashValue>) -> &mut Self {
        self.cash_fee = cash_fee.into();
        self
    }

    pub fn with_financing_fee(&mut self, financing_fee: impl Into<CashValue>) -> &mut Self {
        self.financing_fee = financing_fee.into();
        self
    }

    pub fn with_financing_rate(&mut self, financing_rate: f64) -> &mut Self {
        self.financing_rate = financing_rate;
        self
    }

    pub fn with_financing_multiple(&mut self, financing_multiple: f64) -> &mut Self {
        self.financing_multiple = financing_multiple;
        self
    }

    pub fn new() -> Self {
        BrokerBuilder {
            name: None,
            cash_fee: CashValue::from(100.0),
            financing_fee: CashValue::from(100.0),
            financing_rate: 0.03,
            financing_multiple: 10.0,
        }
    }
}

impl Default for BrokerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::BrokerBuilder;

    #[test]
    fn test_that_builder_applies_defaults() {
        let broker = BrokerBuilder::new().with_name("Tiger").build();
        assert_eq!(broker.name(), "Tiger");
        assert_eq!(*broker.cash_fee(), 100.0);
        assert_eq!(*broker.financing_fee(), 100.0);
        assert_eq!(broker.financing_rate(), 0.03);
        assert_eq!(broker.financing_multiple(), 10.0);
    }

    #[test]
    #[should_panic]
    fn test_that_builder_panics_without_name() {
        BrokerBuilder::new().build();
    }
}
