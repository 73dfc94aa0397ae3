//! Multi-threaded implementation of the allocation search.

mod builder;

pub use builder::ConcurrentSearchBuilder;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::info;

use crate::broker::Broker;
use crate::offering::Offering;
use crate::scheme::Subscription;
use crate::search::{
    best_allocation, into_result, validate, walk, Allocation, AllocationSearchAsync,
    InvalidParameterError, SearchResult,
};
use crate::types::CashValue;

/// Concurrent allocation search.
///
/// Each choice for the first broker is an independent subtree so the search
/// fans one task out per top-level branch. Every task walks its subtree with
/// its own partial-allocation stack and reports a local best; the local bests
/// are merged in branch generation order so the result, including the
/// first-found rule on profit ties, is identical to [SingleSearch].
///
/// Offering and broker terms are read-only and shared across tasks without
/// locking.
///
/// [SingleSearch]: crate::search::SingleSearch
pub struct ConcurrentSearch {
    pub(crate) offering: Arc<Offering>,
    pub(crate) brokers: Vec<Arc<Broker>>,
    pub(crate) budget: CashValue,
}

impl ConcurrentSearch {
    //Top-level branches in generation order: the skip branch first, then for
    //each contribution step the cash branch before the financing branch.
    fn top_level_branches(&self) -> Vec<Option<Subscription>> {
        let mut branches: Vec<Option<Subscription>> = vec![None];
        let price = *self.offering.price();
        let budget = *self.budget;

        let mut contribution = price;
        while contribution <= budget {
            for use_financing in [false, true] {
                branches.push(Some(Subscription::new(
                    Arc::clone(&self.offering),
                    Arc::clone(&self.brokers[0]),
                    contribution,
                    use_financing,
                )));
            }
            contribution += price;
        }
        branches
    }
}

#[async_trait]
impl AllocationSearchAsync for ConcurrentSearch {
    async fn find_best(&self) -> Result<SearchResult, InvalidParameterError> {
        validate(&self.offering, &self.budget, &self.brokers)?;

        let branches = self.top_level_branches();
        info!(
            "SEARCH: Fanning out {} top-level branches over {} brokers with budget {}",
            branches.len(),
            self.brokers.len(),
            *self.budget
        );

        let mut handles = Vec::new();
        for branch in branches {
            let offering = Arc::clone(&self.offering);
            let brokers = self.brokers.clone();
            let budget = *self.budget;
            handles.push(tokio::spawn(async move {
                let mut partial = match branch {
                    Some(subscription) => vec![subscription],
                    None => Vec::new(),
                };
                let mut leaves = Vec::new();
                walk(&offering, &brokers, budget, &mut partial, 1, &mut leaves);
                best_allocation(leaves)
            }));
        }

        //Joining in spawn order keeps the merge aligned with generation
        //order, so the first branch to reach a given profit keeps it
        let mut best: Option<(Allocation, CashValue)> = None;
        for joined in join_all(handles).await {
            //Tasks run pure calculations over validated inputs
            let local = joined.expect("search task panicked");
            if let Some((allocation, profit)) = local {
                let replace = match &best {
                    Some((_, best_profit)) => *profit > **best_profit,
                    None => true,
                };
                if replace {
                    best = Some((allocation, profit));
                }
            }
        }

        let (allocation, total_profit) =
            best.expect("enumeration yielded no allocations");
        info!(
            "SEARCH: Selected allocation with expected profit {}",
            *total_profit
        );
        Ok(into_result(allocation))
    }
}
