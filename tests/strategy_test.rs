// tests/strategy_test.rs
use fast_greeks::analytics::bs_analytic::{Greeks, GreeksConfig, OptionType};
use fast_greeks::error::GreeksError;
use fast_greeks::strategy::{
    aggregate, aggregate_greeks, aggregate_with, Action, AggregateConfig, NetGreeks, StrategyLeg,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = 1e-9;

fn assert_net(net: &NetGreeks, expected: [f64; 4]) {
    let fields = [net.delta, net.gamma, net.theta, net.vega];
    for (i, (value, want)) in fields.iter().zip(expected.iter()).enumerate() {
        assert!(
            (value - want).abs() < TOL,
            "field {}: {} != {}",
            i,
            value,
            want
        );
    }
}

#[test]
fn test_net_delta_of_call_spread_from_leg_greeks() {
    let long_leg = Greeks {
        delta: 0.54,
        ..Default::default()
    };
    let short_leg = Greeks {
        delta: 0.30,
        ..Default::default()
    };
    let net = aggregate_greeks(
        &[(Action::Buy, 1, long_leg), (Action::Sell, 1, short_leg)],
        GreeksConfig::NET,
    )
    .unwrap();

    println!("\nNet Greeks (spread): {:?}", net);

    assert!((net.delta - 0.24).abs() < TOL);
    assert_eq!(net.legs, 2);
}

#[test]
fn test_long_straddle() {
    let legs = [
        StrategyLeg::new(150.0, 0.25, OptionType::Call, Action::Buy, 1),
        StrategyLeg::new(150.0, 0.25, OptionType::Put, Action::Buy, 1),
    ];
    let net = aggregate(&legs, 150.0).unwrap();

    assert_net(&net, [0.129, 0.042, -0.0815, 0.5906]);
    assert_eq!(net.rho, None);
}

#[test]
fn test_bull_call_spread() {
    let legs = [
        StrategyLeg::new(150.0, 0.25, OptionType::Call, Action::Buy, 1),
        StrategyLeg::new(160.0, 0.25, OptionType::Call, Action::Sell, 1),
    ];
    let net = aggregate(&legs, 150.0).unwrap();
    assert_net(&net, [0.2028, 0.001, -0.0056, 0.0142]);
}

#[test]
fn test_iron_condor_is_near_delta_neutral() {
    let legs = [
        StrategyLeg::new(90.0, 0.5, OptionType::Put, Action::Buy, 1),
        StrategyLeg::new(95.0, 0.5, OptionType::Put, Action::Sell, 1),
        StrategyLeg::new(105.0, 0.5, OptionType::Call, Action::Sell, 1),
        StrategyLeg::new(110.0, 0.5, OptionType::Call, Action::Buy, 1),
    ];
    let net = aggregate(&legs, 100.0).unwrap();

    assert_net(&net, [-0.0061, -0.0047, 0.0037, -0.0587]);
    assert!(net.theta > 0.0, "short condor collects decay");
}

#[test]
fn test_ratio_spread_with_leg_volatility_and_rho() {
    let legs = [
        StrategyLeg::new(100.0, 0.5, OptionType::Call, Action::Buy, 1).with_volatility(0.30),
        StrategyLeg::new(110.0, 0.5, OptionType::Call, Action::Sell, 2).with_volatility(0.28),
    ];
    let cfg = AggregateConfig {
        greeks: GreeksConfig::NET | GreeksConfig::RHO,
        risk_free_rate: 0.03,
        ..Default::default()
    };
    let net = aggregate_with(&legs, 100.0, &cfg).unwrap();

    assert_net(&net, [-0.189, -0.0199, 0.02, -0.2605]);
    let rho = net.rho.expect("rho requested");
    assert!((rho - (-0.0933)).abs() < TOL);
}

#[test]
fn test_expired_leg_contributes_payoff_delta_only() {
    let legs = [
        StrategyLeg::new(140.0, 0.0, OptionType::Call, Action::Buy, 3),
        StrategyLeg::new(150.0, 0.25, OptionType::Call, Action::Buy, 1),
    ];
    let net = aggregate(&legs, 150.0).unwrap();
    assert_net(&net, [3.5645, 0.021, -0.0509, 0.2953]);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(99);
    let legs: Vec<StrategyLeg> = (0..500)
        .map(|_| {
            let option_type = if rng.gen_bool(0.5) {
                OptionType::Call
            } else {
                OptionType::Put
            };
            let action = if rng.gen_bool(0.5) { Action::Buy } else { Action::Sell };
            StrategyLeg::new(
                rng.gen_range(80.0..120.0),
                rng.gen_range(0.05..2.0),
                option_type,
                action,
                rng.gen_range(1..10),
            )
            .with_volatility(rng.gen_range(0.1..0.6))
        })
        .collect();

    let sequential = AggregateConfig {
        parallel_threshold: usize::MAX,
        greeks: GreeksConfig::all(),
        ..Default::default()
    };
    let parallel = AggregateConfig {
        parallel_threshold: 1,
        ..sequential
    };

    let a = aggregate_with(&legs, 100.0, &sequential).unwrap();
    let b = aggregate_with(&legs, 100.0, &parallel).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.legs, 500);
}

#[test]
fn test_leg_order_does_not_matter() {
    let mut legs = vec![
        StrategyLeg::new(95.0, 0.3, OptionType::Put, Action::Sell, 2),
        StrategyLeg::new(100.0, 0.3, OptionType::Call, Action::Buy, 1),
        StrategyLeg::new(105.0, 0.6, OptionType::Call, Action::Sell, 4),
    ];
    let forward = aggregate(&legs, 100.0).unwrap();
    legs.reverse();
    let backward = aggregate(&legs, 100.0).unwrap();
    assert_net(&backward, [forward.delta, forward.gamma, forward.theta, forward.vega]);
}

#[test]
fn test_failing_leg_aborts_in_parallel_too() {
    let mut legs = vec![StrategyLeg::new(100.0, 0.5, OptionType::Call, Action::Buy, 1); 100];
    legs[57].strike_price = 0.0;
    let cfg = AggregateConfig {
        parallel_threshold: 1,
        ..Default::default()
    };
    assert!(aggregate_with(&legs, 100.0, &cfg).is_err());
}

#[test]
fn test_zero_quantity_legs_are_rejected() {
    let legs = [
        StrategyLeg::new(150.0, 0.25, OptionType::Call, Action::Buy, 0),
        StrategyLeg::new(150.0, 0.25, OptionType::Put, Action::Sell, 0),
    ];
    match aggregate(&legs, 150.0) {
        Err(GreeksError::InvalidInput { parameter, .. }) => assert_eq!(parameter, "quantity"),
        other => panic!("expected InvalidInput, got {:?}", other),
    }

    let greeks = Greeks {
        delta: 0.5,
        ..Default::default()
    };
    assert!(matches!(
        aggregate_greeks(&[(Action::Buy, 0, greeks)], GreeksConfig::NET),
        Err(GreeksError::InvalidInput { .. })
    ));
}

#[test]
fn test_empty_strategy_rejects_invalid_spot() {
    for spot in [0.0, -150.0, f64::NAN] {
        assert!(
            matches!(aggregate(&[], spot), Err(GreeksError::InvalidInput { .. })),
            "spot {} accepted",
            spot
        );
    }
    assert_eq!(aggregate(&[], 150.0).unwrap(), NetGreeks::default());
}
