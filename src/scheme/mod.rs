//! One broker's participation in a subscription plan and the cost/earnings
//! calculations behind it.

use std::sync::Arc;

use crate::broker::Broker;
use crate::offering::Offering;
use crate::types::{CashValue, LotCount, TraceLine};

/// Groups the calculations that price a single subscription. These are not
/// bound into any other implementation and operate on the offering and broker
/// terms directly.
pub struct SubscriptionCalculations;

impl SubscriptionCalculations {
    /// Total cost of one subscription plus the line items behind it.
    ///
    /// A cash application costs the broker's flat cash fee regardless of the
    /// amount applied. A financing application borrows
    /// `(multiple - 1) / multiple` of the leveraged position, the account's
    /// own cash supplies the rest, so only the borrowed portion accrues
    /// interest for the freeze period.
    pub fn subscription_cost(
        offering: &Offering,
        broker: &Broker,
        financing_lots: LotCount,
        use_financing: bool,
    ) -> (CashValue, Vec<TraceLine>) {
        if !use_financing {
            let fee = broker.cash_fee();
            let lines = vec![TraceLine::new("cash subscription fee", *fee)];
            return (fee, lines);
        }

        let multiple = broker.financing_multiple();
        let pure_financing_lots = f64::from(*financing_lots) * (multiple - 1.0) / multiple;
        let pure_financing_money = pure_financing_lots * *offering.price();
        let financing_cost = pure_financing_money
            * broker.financing_rate()
            * f64::from(offering.freeze_days())
            / 365.0;
        let total = financing_cost + *broker.financing_fee();

        let lines = vec![
            TraceLine::new("pure financing lots", pure_financing_lots),
            TraceLine::new("financed amount", pure_financing_money),
            TraceLine::new("financing cost", financing_cost),
            TraceLine::new("financing subscription fee", *broker.financing_fee()),
        ];
        (CashValue::from(total), lines)
    }

    /// Expected earnings of one subscription plus the intermediate values.
    ///
    /// Zero lots means the cash allocated could not reach the smallest table
    /// entry; the subscription cannot win anything so earnings are zero and
    /// the winning-rate curve is never queried.
    pub fn expected_earnings(offering: &Offering, lots: LotCount) -> (CashValue, Vec<TraceLine>) {
        if *lots == 0 {
            let lines = vec![TraceLine::new("total lots", 0.0)];
            return (CashValue::default(), lines);
        }

        let winning_rate = offering.winning_rate(lots);
        let earnings = *offering.price() * winning_rate * offering.growth_rate();

        let lines = vec![
            TraceLine::new("total lots", f64::from(*lots)),
            TraceLine::new("winning rate", winning_rate),
            TraceLine::new("price per lot", *offering.price()),
            TraceLine::new("growth rate", offering.growth_rate()),
        ];
        (CashValue::from(earnings), lines)
    }
}

/// A single broker's participation within one allocation: an amount of cash
/// placed with one broker in either cash or financing mode.
///
/// Holds shared references to the offering and broker terms, both outlive the
/// subscription. The lot counts for both modes are derived at construction by
/// snapping the affordable lot count down to the offering's table.
#[derive(Clone, Debug)]
pub struct Subscription {
    offering: Arc<Offering>,
    broker: Arc<Broker>,
    cash: CashValue,
    use_financing: bool,
    cash_lots: LotCount,
    financing_lots: LotCount,
}

impl Subscription {
    pub fn new(
        offering: Arc<Offering>,
        broker: Arc<Broker>,
        cash: impl Into<CashValue>,
        use_financing: bool,
    ) -> Self {
        let cash = cash.into();
        let cash_lots = offering.snap_lots((*cash / *offering.price()).floor() as u32);
        let financing_lots = offering
            .snap_lots((*cash * broker.financing_multiple() / *offering.price()).floor() as u32);
        Self {
            offering,
            broker,
            cash,
            use_financing,
            cash_lots,
            financing_lots,
        }
    }

    pub fn offering(&self) -> &Arc<Offering> {
        &self.offering
    }

    pub fn broker(&self) -> &Arc<Broker> {
        &self.broker
    }

    pub fn cash(&self) -> CashValue {
        self.cash.clone()
    }

    pub fn use_financing(&self) -> bool {
        self.use_financing
    }

    pub fn cash_lots(&self) -> LotCount {
        self.cash_lots
    }

    pub fn financing_lots(&self) -> LotCount {
        self.financing_lots
    }

    /// Lot count actually applied for under the chosen mode.
    pub fn subscribed_lots(&self) -> LotCount {
        if self.use_financing {
            self.financing_lots
        } else {
            self.cash_lots
        }
    }

    /// Expected profit of this subscription plus the full trace.
    ///
    /// Recomputed on every call, never cached, so the trace is regenerated
    /// alongside the numeric result each time.
    pub fn profit(&self) -> (CashValue, Vec<TraceLine>) {
        let mut lines = Vec::new();
        let mode = if self.use_financing {
            "financing subscription"
        } else {
            "cash subscription"
        };
        lines.push(TraceLine::new(mode, *self.cash));

        let (cost, cost_lines) = SubscriptionCalculations::subscription_cost(
            &self.offering,
            &self.broker,
            self.financing_lots,
            self.use_financing,
        );
        lines.push(TraceLine::new("cost", *cost));
        lines.extend(cost_lines);

        let (earnings, earnings_lines) =
            SubscriptionCalculations::expected_earnings(&self.offering, self.subscribed_lots());
        lines.push(TraceLine::new("earnings", *earnings));
        lines.extend(earnings_lines);

        let profit = CashValue::from(*earnings - *cost);
        lines.push(TraceLine::new("profit", *profit));
        (profit, lines)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Subscription, SubscriptionCalculations};
    use crate::broker::{Broker, BrokerBuilder};
    use crate::offering::{Offering, OfferingBuilder};

    fn setup() -> (Arc<Offering>, Arc<Broker>) {
        let offering = OfferingBuilder::new()
            .with_name("ABC")
            .with_price(10700.0)
            .with_freeze_days(5)
            .with_growth_rate(0.06)
            .with_base_winning_rate(0.05)
            .with_winning_rate_growth(0.007)
            .build();
        let broker = BrokerBuilder::new()
            .with_name("Tiger")
            .with_cash_fee(0.0)
            .with_financing_fee(0.0)
            .with_financing_rate(0.03)
            .with_financing_multiple(10.0)
            .build();
        (Arc::new(offering), Arc::new(broker))
    }

    #[test]
    fn test_that_cash_cost_is_flat_fee() {
        let (offering, _broker) = setup();
        let broker = BrokerBuilder::new().with_name("Futu").with_cash_fee(50.0).build();

        let (cost, lines) =
            SubscriptionCalculations::subscription_cost(&offering, &broker, 0.into(), false);
        assert_eq!(*cost, 50.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 50.0);
    }

    #[test]
    fn test_that_financing_cost_charges_interest_on_borrowed_portion() {
        let (offering, broker) = setup();

        let (cost, lines) =
            SubscriptionCalculations::subscription_cost(&offering, &broker, 10.into(), true);
        //10 lots at multiple 10: own cash covers 1 lot, 9 lots are borrowed
        let expected = 9.0 * 10700.0 * 0.03 * 5.0 / 365.0;
        assert!((*cost - expected).abs() < 1e-9);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].amount, 9.0);
        assert_eq!(lines[1].amount, 96300.0);
    }

    #[test]
    fn test_that_earnings_are_zero_for_zero_lots() {
        let (offering, _broker) = setup();
        let (earnings, lines) = SubscriptionCalculations::expected_earnings(&offering, 0.into());
        assert_eq!(*earnings, 0.0);
        assert_eq!(lines[0].amount, 0.0);
    }

    #[test]
    fn test_that_one_lot_earnings_match_expected_value() {
        let (offering, _broker) = setup();
        let (earnings, _lines) = SubscriptionCalculations::expected_earnings(&offering, 1.into());
        assert!((*earnings - 32.1).abs() < 1e-9);
    }

    #[test]
    fn test_that_subscription_derives_lot_counts() {
        let (offering, broker) = setup();
        let subscription = Subscription::new(offering, broker, 10700.0, false);
        assert_eq!(*subscription.cash_lots(), 1);
        assert_eq!(*subscription.financing_lots(), 10);
        assert_eq!(*subscription.subscribed_lots(), 1);
    }

    #[test]
    fn test_that_profit_matches_trace_line_items() {
        let (offering, broker) = setup();
        let subscription = Subscription::new(offering, broker, 10700.0, true);
        let (profit, lines) = subscription.profit();

        let find = |label: &str| {
            lines
                .iter()
                .find(|line| line.label == label)
                .map(|line| line.amount)
                .unwrap()
        };
        //Recompute from the trace alone
        let cost = find("financing cost") + find("financing subscription fee");
        let earnings = find("price per lot") * find("winning rate") * find("growth rate");
        assert!((earnings - cost - *profit).abs() < 1e-9);
        assert_eq!(find("cost"), find("financing cost") + find("financing subscription fee"));
        assert_eq!(find("profit"), *profit);
    }

    #[test]
    fn test_that_profit_is_recomputed_identically_on_each_call() {
        let (offering, broker) = setup();
        let subscription = Subscription::new(offering, broker, 21400.0, false);
        let (first, first_lines) = subscription.profit();
        let (second, second_lines) = subscription.profit();
        assert_eq!(first, second);
        assert_eq!(first_lines, second_lines);
    }
}
