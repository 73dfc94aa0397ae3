//! # How does Primula work?
//!
//! The development goal is to provide a simple library for working out how to
//! split a fixed budget across brokerage accounts when subscribing to a
//! fixed-price share offering, where every account can apply with cash or
//! with margin financing and each route has its own fee and cost structure.
//!
//! A search is composed of three kinds of component: an `Offering`, a list of
//! `Broker`s, and a search implementation. The offering describes the terms
//! of the security (price per lot, freeze period, the winning-rate curve and
//! the admissible lot table), a broker describes one account's fee and rate
//! terms, and the search enumerates every feasible way of splitting the
//! budget across the brokers, prices each candidate plan and returns the most
//! profitable one together with a full audit trace.
//!
//! ## Enumeration
//!
//! The search walks the broker list depth-first. At every broker it tries
//! skipping the broker, then each contribution in lot-price steps, in cash
//! mode and in financing mode, until the budget is exhausted. A plan is
//! complete when the budget is spent exactly or when the broker list runs out
//! with budget left over, the remainder simply stays unallocated. The number
//! of leaves grows combinatorially with broker count and with the ratio of
//! budget to lot price, so callers should keep both small; the library makes
//! no attempt to prune beyond discarding overspent branches.
//!
//! Two implementations are provided. [SingleSearch] runs the whole
//! enumeration on the calling thread. [ConcurrentSearch] fans each top-level
//! branch out as its own task and merges the per-task results; both return
//! identical winners, including on exact profit ties, where the first plan in
//! generation order is kept.
//!
//! ## Example
//!
//! ```
//!     use std::sync::Arc;
//!
//!     use primula::broker::BrokerBuilder;
//!     use primula::offering::OfferingBuilder;
//!     use primula::search::{AllocationSearch, SingleSearchBuilder};
//!
//!     let offering = Arc::new(
//!         OfferingBuilder::new()
//!             .with_name("ABC")
//!             .with_price(10700.0)
//!             .with_freeze_days(5)
//!             .with_growth_rate(0.06)
//!             .with_base_winning_rate(0.05)
//!             .with_winning_rate_growth(0.007)
//!             .build(),
//!     );
//!     let broker = Arc::new(BrokerBuilder::new().with_name("Tiger").build());
//!
//!     let result = SingleSearchBuilder::new()
//!         .with_offering(offering)
//!         .with_broker(broker)
//!         .with_budget(21_400.0)
//!         .build()
//!         .find_best()
//!         .unwrap();
//!
//!     for subscription in result.allocation.subscriptions() {
//!         println!(
//!             "{} {} financing: {}",
//!             subscription.broker().name(),
//!             *subscription.cash(),
//!             subscription.use_financing()
//!         );
//!     }
//!     println!("total profit: {}", *result.total_profit);
//! ```
//!
//! ## Configuration
//!
//! The search consumes fully-assembled value objects. The [input] module is
//! the configuration collaborator: it deserializes offering and broker terms
//! from JSON and assembles them into the shared, read-only objects the search
//! builders expect. Presentation is equally out of scope for the core, the
//! `arrange` binary shows a caller printing the returned trace.
//!
//! [SingleSearch]: crate::search::SingleSearch
//! [ConcurrentSearch]: crate::search::ConcurrentSearch
//! [input]: crate::input

pub mod broker;
pub mod input;
pub mod offering;
pub mod scheme;
pub mod search;
pub mod types;
