use std::env;
use std::path::Path;

use anyhow::Result;

use primula::input::{sample_arrange_config, ArrangeConfig};
use primula::search::{AllocationSearch, SingleSearchBuilder};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = if args.len() > 1 {
        ArrangeConfig::from_file(Path::new(&args[1]))?
    } else {
        sample_arrange_config()
    };

    let (offering, brokers, budget) = config.assemble();
    println!("{}", offering.description());
    for broker in &brokers {
        println!("{}", broker.description());
    }

    let result = SingleSearchBuilder::new()
        .with_offering(offering)
        .with_brokers(brokers)
        .with_budget(budget)
        .build()
        .find_best()?;

    for subscription in result.allocation.subscriptions() {
        let mode = if subscription.use_financing() {
            "financing"
        } else {
            "cash"
        };
        println!(
            "{} {} {}",
            subscription.broker().name(),
            *subscription.cash(),
            mode
        );
    }
    println!("total profit: {}", *result.total_profit);

    for line in &result.trace {
        println!("{}", line);
    }

    Ok(())
}
