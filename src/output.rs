// src/output.rs
use crate::analytics::bs_analytic::{Greeks, GreeksConfig};
use crate::analyzer::{GreeksReport, StrategyReport};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Write};

/// Quote a CSV field containing a delimiter, quote or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn write_greeks_to_csv(filename: &str, rows: &[(String, Greeks)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "label,delta,gamma,theta,vega,rho,implied_volatility")?;
    for (label, g) in rows {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            csv_field(label),
            g.delta,
            g.gamma,
            g.theta,
            g.vega,
            g.rho,
            g.implied_volatility
        )?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", csv_field(key), csv_field(value))?;
    }
    Ok(())
}

/// Human-readable Greeks block; `fields` selects which sensitivities appear
pub fn render_greeks_report(report: &GreeksReport, fields: GreeksConfig) -> String {
    let g = &report.greeks;
    let mut out = format!(
        "Options Greeks for {} ${} {}:\n\n",
        report.symbol, report.strike_price, report.option_type
    );
    out.push_str(&format!("Current Stock Price: ${:.2}\n", report.spot_price));
    out.push_str(&format!(
        "Time to Expiry: {} days ({:.4} years)\n",
        report.time_to_expiry_days, report.time_to_expiry_years
    ));
    out.push_str(&format!("Expiration: {}\n\n", report.expiration_date));
    out.push_str("Greeks:\n");
    let lines = [
        (GreeksConfig::DELTA, "Delta", g.delta, "price sensitivity"),
        (GreeksConfig::GAMMA, "Gamma", g.gamma, "delta sensitivity"),
        (GreeksConfig::THETA, "Theta", g.theta, "time decay per day"),
        (GreeksConfig::VEGA, "Vega", g.vega, "volatility sensitivity"),
        (GreeksConfig::RHO, "Rho", g.rho, "interest rate sensitivity"),
    ];
    for (flag, name, value, meaning) in lines {
        if fields.contains(flag) {
            out.push_str(&format!("  {}: {:.4} ({})\n", name, value, meaning));
        }
    }
    out.push_str(&format!(
        "\nImplied Volatility: {:.1}%",
        g.implied_volatility * 100.0
    ));
    out
}

pub fn render_strategy_report(report: &StrategyReport) -> String {
    let net = &report.net;
    let mut lines = vec![
        format!(
            "Options Strategy Analysis: {}",
            report.strategy_type.to_uppercase()
        ),
        format!(
            "Symbol: {} (Current Price: ${:.2})\n",
            report.symbol, report.spot_price
        ),
        format!("Strategy Legs: {}", report.legs.len()),
        "Net Greeks:".to_string(),
        format!("  Delta: {:.4}", net.delta),
        format!("  Gamma: {:.4}", net.gamma),
        format!("  Theta: {:.4}", net.theta),
        format!("  Vega: {:.4}", net.vega),
    ];
    if let Some(rho) = net.rho {
        lines.push(format!("  Rho: {:.4}", rho));
    }
    lines.join("\n")
}
