// demos/greeks_demo.rs
use chrono::Utc;
use fast_greeks::analytics::bs_analytic::{GreeksConfig, OptionType};
use fast_greeks::analyzer::OptionsAnalyzer;
use fast_greeks::config::EngineConfig;
use fast_greeks::error::GreeksResult;
use fast_greeks::expiry::parse_expiration;
use fast_greeks::market::{Quote, StaticMarketData};
use fast_greeks::output::{render_greeks_report, render_strategy_report, write_greeks_to_csv};
use fast_greeks::strategy::parse_legs;
use tracing::{error, info, Level};

const CONDOR: &str = r#"[
    {"strike_price": 170, "expiration_date": "EXPIRY", "option_type": "put",  "action": "buy"},
    {"strike_price": 180, "expiration_date": "EXPIRY", "option_type": "put",  "action": "sell"},
    {"strike_price": 200, "expiration_date": "EXPIRY", "option_type": "call", "action": "sell"},
    {"strike_price": 210, "expiration_date": "EXPIRY", "option_type": "call", "action": "buy"}
]"#;

fn run() -> GreeksResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let market = StaticMarketData::new()
        .with_quote("AAPL", Quote::new(190.0))?
        .with_quote("SPY", Quote::new(520.0).with_implied_volatility(0.16))?;
    let analyzer = OptionsAnalyzer::new(market, config)?;

    let today = Utc::now().date_naive();
    let expiry = today + chrono::Duration::days(45);
    info!(%today, %expiry, "pricing demo contracts");

    let mut rows = Vec::new();
    for (symbol, strike, option_type) in [
        ("AAPL", 190.0, OptionType::Call),
        ("AAPL", 190.0, OptionType::Put),
        ("SPY", 540.0, OptionType::Call),
    ] {
        let report =
            analyzer.calculate_option_greeks(symbol, strike, expiry, option_type, None, today)?;
        println!("{}\n", render_greeks_report(&report, GreeksConfig::all()));
        rows.push((format!("{} {} {}", symbol, strike, option_type), report.greeks));
    }

    let legs = parse_legs(&CONDOR.replace("EXPIRY", &expiry.to_string()))?;
    let condor = analyzer.analyze_strategy("iron_condor", "AAPL", &legs, today)?;
    println!("{}\n", render_strategy_report(&condor));

    // Expired contracts fall back to payoff Greeks
    let expired = parse_expiration("2020-01-17")?;
    let report =
        analyzer.calculate_option_greeks("AAPL", 150.0, expired, OptionType::Call, None, today)?;
    println!("{}\n", render_greeks_report(&report, GreeksConfig::DELTA));

    write_greeks_to_csv("greeks_demo.csv", &rows)?;
    info!(rows = rows.len(), "wrote greeks_demo.csv");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    if let Err(e) = run() {
        error!(%e, "demo failed");
        std::process::exit(1);
    }
}
