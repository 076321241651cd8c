// demos/error_handling_demo.rs
use chrono::NaiveDate;
use fast_greeks::analytics::bs_analytic::{compute_greeks, OptionParameters, OptionType};
use fast_greeks::analyzer::OptionsAnalyzer;
use fast_greeks::config::EngineConfig;
use fast_greeks::error::GreeksError;
use fast_greeks::market::StaticMarketData;
use fast_greeks::strategy::parse_legs;

fn main() {
    println!("Error Handling Demo for fast-greeks");
    println!("===================================\n");

    // Test 1: Non-positive spot
    println!("1. Testing non-positive spot price...");
    let bad_spot = OptionParameters::new(-150.0, 150.0, 0.25, OptionType::Call);
    match compute_greeks(&bad_spot) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Zero volatility
    println!("\n2. Testing zero volatility...");
    let bad_vol = OptionParameters::new(150.0, 150.0, 0.25, OptionType::Put).with_volatility(0.0);
    match compute_greeks(&bad_vol) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Expired option is not an error
    println!("\n3. Testing an expired in-the-money call...");
    let expired = OptionParameters::new(160.0, 150.0, -0.01, OptionType::Call);
    match compute_greeks(&expired) {
        Ok(g) => println!("   ✓ Payoff Greeks: delta = {}, gamma = {}", g.delta, g.gamma),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 4: Malformed strategy legs
    println!("\n4. Testing malformed strategy legs...");
    match parse_legs(r#"[{"strike_price": 100, "option_type": "call"}]"#) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Invalid configuration
    println!("\n5. Testing invalid engine configuration...");
    match EngineConfig::from_toml_str("parallel_threshold = 0") {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Unknown symbol, matched by error type
    println!("\n6. Testing error type matching...");
    let analyzer = match OptionsAnalyzer::new(StaticMarketData::new(), EngineConfig::default()) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            println!("   Unexpected error: {}", e);
            return;
        }
    };
    let (Some(expiry), Some(today)) = (
        NaiveDate::from_ymd_opt(2025, 1, 17),
        NaiveDate::from_ymd_opt(2024, 12, 2),
    ) else {
        return;
    };
    match analyzer.calculate_option_greeks("NVDA", 120.0, expiry, OptionType::Call, None, today) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(GreeksError::MarketData { symbol, reason }) => {
            println!("   ✓ Caught MarketData: {} ({})", symbol, reason);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
}
