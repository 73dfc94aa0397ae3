//! Enumerates every feasible split of a budget across brokers and selects the
//! most profitable plan.

pub mod implement;

pub use implement::multi::{ConcurrentSearch, ConcurrentSearchBuilder};
pub use implement::single::{SingleSearch, SingleSearchBuilder};

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use async_trait::async_trait;

use crate::broker::Broker;
use crate::offering::Offering;
use crate::scheme::Subscription;
use crate::types::{CashValue, TraceLine};

/// A complete subscription plan: one entry per broker that actually receives
/// cash, in broker input order. Brokers contributing nothing are omitted
/// rather than carried as zero-cash entries.
#[derive(Clone, Debug, Default)]
pub struct Allocation {
    subscriptions: Vec<Subscription>,
}

impl Allocation {
    pub fn new(subscriptions: Vec<Subscription>) -> Self {
        Self { subscriptions }
    }

    pub fn empty() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn total_cash(&self) -> CashValue {
        let mut total = 0.0;
        for subscription in &self.subscriptions {
            total += *subscription.cash();
        }
        CashValue::from(total)
    }

    /// Total expected profit plus the concatenated trace of every
    /// subscription in the plan. Each subscription contributes a header line
    /// carrying its broker name and cash before its own cost/earnings lines.
    pub fn total_profit(&self) -> (CashValue, Vec<TraceLine>) {
        let mut total = 0.0;
        let mut trace = Vec::new();
        for subscription in &self.subscriptions {
            trace.push(TraceLine::new(
                subscription.broker().name(),
                *subscription.cash(),
            ));
            let (profit, lines) = subscription.profit();
            total += *profit;
            trace.extend(lines);
        }
        (CashValue::from(total), trace)
    }
}

/// Winning allocation together with its total profit and full trace, as
/// returned to the caller for presentation.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub allocation: Allocation,
    pub total_profit: CashValue,
    pub trace: Vec<TraceLine>,
}

/// Search can produce the most profitable feasible allocation.
pub trait AllocationSearch {
    fn find_best(&self) -> Result<SearchResult, InvalidParameterError>;
}

/// Search can produce the most profitable feasible allocation without
/// blocking the caller's task.
#[async_trait]
pub trait AllocationSearchAsync {
    async fn find_best(&self) -> Result<SearchResult, InvalidParameterError>;
}

/// Search invocation rejected before enumeration began. Carries the offending
/// field so the caller can report it; no partial results are produced.
#[derive(Clone, Debug)]
pub enum InvalidParameterError {
    Price(f64),
    Budget(f64),
    FinancingMultiple(String, f64),
    EmptyBrokerList,
}

impl Error for InvalidParameterError {}

impl Display for InvalidParameterError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            InvalidParameterError::Price(price) => {
                write!(f, "Offering price must be positive, got {}", price)
            }
            InvalidParameterError::Budget(budget) => {
                write!(f, "Total budget cannot be negative, got {}", budget)
            }
            InvalidParameterError::FinancingMultiple(name, multiple) => {
                write!(
                    f,
                    "Broker {} has financing multiple below one: {}",
                    name, multiple
                )
            }
            InvalidParameterError::EmptyBrokerList => {
                write!(f, "Broker list is empty")
            }
        }
    }
}

//All validation happens here, before recursion begins. Every recursive step
//then operates on already-validated inputs so no error can arise mid-search.
pub(crate) fn validate(
    offering: &Offering,
    budget: &CashValue,
    brokers: &[Arc<Broker>],
) -> Result<(), InvalidParameterError> {
    if *offering.price() <= 0.0 {
        return Err(InvalidParameterError::Price(*offering.price()));
    }
    if **budget < 0.0 {
        return Err(InvalidParameterError::Budget(**budget));
    }
    if brokers.is_empty() {
        return Err(InvalidParameterError::EmptyBrokerList);
    }
    for broker in brokers {
        if broker.financing_multiple() < 1.0 {
            return Err(InvalidParameterError::FinancingMultiple(
                broker.name().to_string(),
                broker.financing_multiple(),
            ));
        }
    }
    Ok(())
}

//Depth-first walk over the broker list. The partial allocation is mutated in
//strict push-then-pop order by this single call chain; the leaf accumulator
//is owned by the invocation and never escapes it.
pub(crate) fn walk(
    offering: &Arc<Offering>,
    brokers: &[Arc<Broker>],
    budget: f64,
    partial: &mut Vec<Subscription>,
    layer: usize,
    leaves: &mut Vec<Allocation>,
) {
    let mut spent = 0.0;
    for subscription in partial.iter() {
        spent += *subscription.cash();
    }

    if spent > budget {
        //Infeasible branch
        return;
    }
    if spent == budget {
        //Budget exactly exhausted, no further brokers considered
        leaves.push(Allocation::new(partial.clone()));
        return;
    }
    if layer >= brokers.len() {
        //All brokers considered, leftover budget stays unallocated
        leaves.push(Allocation::new(partial.clone()));
        return;
    }

    let price = *offering.price();
    let mut contribution = 0.0;
    while spent + contribution <= budget {
        if contribution == 0.0 {
            walk(offering, brokers, budget, partial, layer + 1, leaves);
        } else {
            for use_financing in [false, true] {
                partial.push(Subscription::new(
                    Arc::clone(offering),
                    Arc::clone(&brokers[layer]),
                    contribution,
                    use_financing,
                ));
                walk(offering, brokers, budget, partial, layer + 1, leaves);
                partial.pop();
            }
        }
        contribution += price;
    }
}

//First allocation in generation order wins on exact profit ties, later ties
//never overwrite it.
pub(crate) fn best_allocation(leaves: Vec<Allocation>) -> Option<(Allocation, CashValue)> {
    let mut best: Option<(Allocation, CashValue)> = None;
    for allocation in leaves {
        let (profit, _trace) = allocation.total_profit();
        let replace = match &best {
            Some((_, best_profit)) => *profit > **best_profit,
            None => true,
        };
        if replace {
            best = Some((allocation, profit));
        }
    }
    best
}

pub(crate) fn into_result(allocation: Allocation) -> SearchResult {
    let (total_profit, trace) = allocation.total_profit();
    SearchResult {
        allocation,
        total_profit,
        trace,
    }
}
