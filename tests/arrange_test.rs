use primula::input::sample_arrange_config;
use primula::search::{AllocationSearch, SingleSearchBuilder};

#[test]
fn arrange_integration_test() {
    env_logger::init();

    //Sample scenario with the budget trimmed to four lots to keep the
    //enumeration small
    let mut config = sample_arrange_config();
    config.budget = 42_800.0;

    let (offering, brokers, budget) = config.assemble();
    let broker_count = brokers.len();

    let result = SingleSearchBuilder::new()
        .with_offering(offering)
        .with_brokers(brokers)
        .with_budget(budget.clone())
        .build()
        .find_best()
        .unwrap();

    //The zero-fee brokers make at least one plan strictly profitable
    assert!(*result.total_profit > 0.0);
    assert!(*result.allocation.total_cash() <= *budget);
    assert!(result.allocation.subscriptions().len() <= broker_count);

    //The returned profit must equal the sum of the per-subscription profits
    let mut recomputed = 0.0;
    for subscription in result.allocation.subscriptions() {
        let (profit, _trace) = subscription.profit();
        recomputed += *profit;
    }
    assert_eq!(recomputed, *result.total_profit);

    //Every subscription in the winner contributes its own trace lines, led
    //by a header carrying the broker name and cash
    assert!(!result.trace.is_empty());
    let headers = result
        .trace
        .iter()
        .filter(|line| line.label == "cash subscription" || line.label == "financing subscription")
        .count();
    assert_eq!(headers, result.allocation.subscriptions().len());
}
