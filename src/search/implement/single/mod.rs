//! Single-threaded implementation of the allocation search.

mod builder;

pub use builder::SingleSearchBuilder;

use std::sync::Arc;

use log::info;

use crate::broker::Broker;
use crate::offering::Offering;
use crate::search::{
    best_allocation, into_result, validate, walk, Allocation, AllocationSearch,
    InvalidParameterError, SearchResult,
};
use crate::types::CashValue;

/// Synchronous recursive search over every feasible split of the budget.
///
/// The recursion distributes the budget across the ordered broker list by
/// stepping each broker's contribution in lot-price increments, trying the
/// skip, cash and financing branches at every step. All state lives within a
/// single invocation so the search can be re-run freely.
pub struct SingleSearch {
    pub(crate) offering: Arc<Offering>,
    pub(crate) brokers: Vec<Arc<Broker>>,
    pub(crate) budget: CashValue,
}

impl SingleSearch {
    //Full leaf enumeration, also used by tests that assert properties over
    //every allocation explored rather than just the winner.
    pub(crate) fn enumerate(&self) -> Vec<Allocation> {
        let mut partial = Vec::new();
        let mut leaves = Vec::new();
        walk(
            &self.offering,
            &self.brokers,
            *self.budget,
            &mut partial,
            0,
            &mut leaves,
        );
        leaves
    }
}

impl AllocationSearch for SingleSearch {
    fn find_best(&self) -> Result<SearchResult, InvalidParameterError> {
        validate(&self.offering, &self.budget, &self.brokers)?;
        info!(
            "SEARCH: Starting enumeration over {} brokers with budget {}",
            self.brokers.len(),
            *self.budget
        );

        let leaves = self.enumerate();
        info!("SEARCH: Enumerated {} candidate allocations", leaves.len());

        //Enumeration always yields at least the all-skip leaf once inputs
        //have been validated
        let (allocation, total_profit) =
            best_allocation(leaves).expect("enumeration yielded no allocations");
        info!(
            "SEARCH: Selected allocation with expected profit {}",
            *total_profit
        );
        Ok(into_result(allocation))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SingleSearchBuilder;
    use crate::broker::{Broker, BrokerBuilder};
    use crate::offering::{Offering, OfferingBuilder};
    use crate::search::{AllocationSearch, InvalidParameterError};

    fn sample_offering() -> Arc<Offering> {
        Arc::new(
            OfferingBuilder::new()
                .with_name("ABC")
                .with_price(10700.0)
                .with_freeze_days(5)
                .with_growth_rate(0.06)
                .with_base_winning_rate(0.05)
                .with_winning_rate_growth(0.007)
                .build(),
        )
    }

    fn free_broker(name: &str) -> Arc<Broker> {
        Arc::new(
            BrokerBuilder::new()
                .with_name(name)
                .with_cash_fee(0.0)
                .with_financing_fee(0.0)
                .with_financing_rate(0.03)
                .with_financing_multiple(10.0)
                .build(),
        )
    }

    #[test]
    fn test_that_single_broker_one_lot_budget_finds_best_mode() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(free_broker("Tiger"))
            .with_budget(10700.0)
            .build();

        let result = search.find_best().unwrap();
        assert_eq!(result.allocation.subscriptions().len(), 1);

        let subscription = &result.allocation.subscriptions()[0];
        assert_eq!(*subscription.cash(), 10700.0);
        assert_eq!(*subscription.cash_lots(), 1);
        assert_eq!(*subscription.financing_lots(), 10);

        //The cash-mode candidate earns price * base rate * growth with zero
        //cost; the financing-mode candidate at the same cash controls ten
        //lots and beats it after interest, so the search picks financing
        let cash_profit: f64 = 10700.0 * 0.05 * 0.06;
        assert!((cash_profit - 32.1).abs() < 1e-9);

        let financing_earnings = 10700.0 * (0.05 + 9.0 * 0.007) * 0.06;
        let financing_cost = 9.0 * 10700.0 * 0.03 * 5.0 / 365.0;
        let financing_profit = financing_earnings - financing_cost;
        assert!(financing_profit > cash_profit);

        assert!(subscription.use_financing());
        assert!((*result.total_profit - financing_profit).abs() < 1e-9);
    }

    #[test]
    fn test_that_cash_mode_wins_when_financing_interest_dominates() {
        let broker = Arc::new(
            BrokerBuilder::new()
                .with_name("Tiger")
                .with_cash_fee(0.0)
                .with_financing_fee(0.0)
                .with_financing_rate(5.0)
                .with_financing_multiple(10.0)
                .build(),
        );
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(broker)
            .with_budget(10700.0)
            .build();

        let result = search.find_best().unwrap();
        let subscription = &result.allocation.subscriptions()[0];
        assert!(!subscription.use_financing());
        assert!((*result.total_profit - 32.1).abs() < 1e-9);
    }

    #[test]
    fn test_that_zero_budget_returns_empty_allocation() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(free_broker("Tiger"))
            .with_budget(0.0)
            .build();

        let result = search.find_best().unwrap();
        assert!(result.allocation.is_empty());
        assert_eq!(*result.total_profit, 0.0);
        assert!(result.trace.is_empty());
    }

    #[test]
    fn test_that_budget_below_one_lot_returns_empty_allocation() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(free_broker("Tiger"))
            .with_budget(5000.0)
            .build();

        let result = search.find_best().unwrap();
        assert!(result.allocation.is_empty());
        assert_eq!(*result.total_profit, 0.0);
    }

    #[test]
    fn test_that_two_brokers_one_lot_budget_funds_exactly_one() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_brokers(vec![free_broker("Tiger"), free_broker("Futu")])
            .with_budget(10700.0)
            .build();

        let result = search.find_best().unwrap();
        assert_eq!(result.allocation.subscriptions().len(), 1);
        assert_eq!(*result.allocation.total_cash(), 10700.0);

        let subscription = &result.allocation.subscriptions()[0];
        let (profit, _trace) = subscription.profit();
        assert_eq!(*result.total_profit, *profit);
    }

    #[test]
    fn test_that_explored_allocations_respect_budget() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_brokers(vec![free_broker("Tiger"), free_broker("Futu")])
            .with_budget(32100.0)
            .build();

        let leaves = search.enumerate();
        assert!(!leaves.is_empty());
        for allocation in &leaves {
            assert!(*allocation.total_cash() <= 32100.0);
        }
    }

    #[test]
    fn test_that_selected_profit_dominates_every_explored_allocation() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_brokers(vec![free_broker("Tiger"), free_broker("Futu")])
            .with_budget(21400.0)
            .build();

        let best = search.find_best().unwrap();
        for allocation in search.enumerate() {
            let (profit, _trace) = allocation.total_profit();
            assert!(*best.total_profit >= *profit);
        }
    }

    #[test]
    fn test_that_leftover_budget_is_accepted() {
        //Budget is one and a half lots so every complete allocation leaves
        //cash unspent
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(free_broker("Tiger"))
            .with_budget(16050.0)
            .build();

        let result = search.find_best().unwrap();
        assert_eq!(result.allocation.subscriptions().len(), 1);
        assert_eq!(*result.allocation.total_cash(), 10700.0);
    }

    #[test]
    fn test_that_enumeration_covers_all_branches() {
        //One broker, two lot-steps of budget: all-skip, cash/financing at one
        //lot, cash/financing at two lots
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(free_broker("Tiger"))
            .with_budget(21400.0)
            .build();

        assert_eq!(search.enumerate().len(), 5);
    }

    #[test]
    fn test_that_negative_budget_is_rejected() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(free_broker("Tiger"))
            .with_budget(-1.0)
            .build();

        let err = search.find_best().unwrap_err();
        assert!(matches!(err, InvalidParameterError::Budget(_)));
    }

    #[test]
    fn test_that_non_positive_price_is_rejected() {
        let offering = Arc::new(
            OfferingBuilder::new()
                .with_name("ABC")
                .with_price(0.0)
                .build(),
        );
        let search = SingleSearchBuilder::new()
            .with_offering(offering)
            .with_broker(free_broker("Tiger"))
            .with_budget(10700.0)
            .build();

        let err = search.find_best().unwrap_err();
        assert!(matches!(err, InvalidParameterError::Price(_)));
    }

    #[test]
    fn test_that_empty_broker_list_is_rejected() {
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_budget(10700.0)
            .build();

        let err = search.find_best().unwrap_err();
        assert!(matches!(err, InvalidParameterError::EmptyBrokerList));
    }

    #[test]
    fn test_that_sub_one_financing_multiple_is_rejected() {
        let broker = Arc::new(
            BrokerBuilder::new()
                .with_name("Tiger")
                .with_financing_multiple(0.5)
                .build(),
        );
        let search = SingleSearchBuilder::new()
            .with_offering(sample_offering())
            .with_broker(broker)
            .with_budget(10700.0)
            .build();

        let err = search.find_best().unwrap_err();
        assert!(matches!(
            err,
            InvalidParameterError::FinancingMultiple(_, _)
        ));
    }
}
