pub mod aggregator;
pub mod legs;

pub use aggregator::{aggregate, aggregate_greeks, aggregate_with, AggregateConfig, NetGreeks};
pub use legs::{parse_legs, Action, LegSpec, StrategyLeg};
