// scripts/benchmark.rs
use fast_greeks::analytics::bs_analytic::{compute_greeks, OptionParameters, OptionType};
use fast_greeks::math_utils::Timer;
use fast_greeks::output::write_summary_to_csv;
use fast_greeks::strategy::{aggregate_with, Action, AggregateConfig, StrategyLeg};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::process::{self, Command};
use tracing::{error, info, Level};

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    checksum: f64,
}

impl BenchmarkResult {
    fn new(name: String, evaluations: usize, time_ms: f64, checksum: f64) -> Self {
        Self {
            name,
            evaluations,
            time_ms,
            throughput_per_sec: evaluations as f64 / (time_ms / 1000.0).max(1e-9),
            checksum,
        }
    }
}

fn random_leg(rng: &mut StdRng) -> StrategyLeg {
    let option_type = if rng.gen_bool(0.5) {
        OptionType::Call
    } else {
        OptionType::Put
    };
    let action = if rng.gen_bool(0.5) { Action::Buy } else { Action::Sell };
    StrategyLeg::new(
        rng.gen_range(50.0..150.0),
        rng.gen_range(0.02..2.0),
        option_type,
        action,
        rng.gen_range(1..20),
    )
    .with_volatility(rng.gen_range(0.1..0.8))
}

fn run_engine_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[10_000usize, 100_000, 1_000_000] {
        info!(evaluations = n, "benchmarking compute_greeks");

        let params: Vec<OptionParameters> = (0..n)
            .map(|_| {
                let leg = random_leg(&mut rng);
                OptionParameters::new(100.0, leg.strike_price, leg.time_to_expiry, leg.option_type)
                    .with_volatility(leg.volatility.unwrap_or(0.25))
            })
            .collect();

        let timer = Timer::new();
        let mut checksum = 0.0;
        for p in &params {
            match compute_greeks(p) {
                Ok(g) => checksum += g.delta + g.vega,
                Err(e) => error!(%e, "unexpected engine failure"),
            }
        }
        let time_ms = timer.elapsed_ms();

        results.push(BenchmarkResult::new(
            format!("compute_greeks ({}k)", n / 1000),
            n,
            time_ms,
            checksum,
        ));
    }

    results
}

fn run_aggregation_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(7);
    let legs: Vec<StrategyLeg> = (0..200_000).map(|_| random_leg(&mut rng)).collect();

    for (label, threshold) in [("sequential", usize::MAX), ("rayon", 1)] {
        info!(mode = label, legs = legs.len(), "benchmarking aggregation");
        let cfg = AggregateConfig {
            parallel_threshold: threshold,
            ..Default::default()
        };

        let timer = Timer::new();
        let checksum = match aggregate_with(&legs, 100.0, &cfg) {
            Ok(net) => net.delta,
            Err(e) => {
                error!(%e, "aggregation failed");
                f64::NAN
            }
        };
        let time_ms = timer.elapsed_ms();

        results.push(BenchmarkResult::new(
            format!("aggregate {} ({}k legs)", label, legs.len() / 1000),
            legs.len(),
            time_ms,
            checksum,
        ));
    }

    results
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    println!("fast-greeks Benchmark Suite");
    println!("===========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut all_results = run_engine_benchmarks();
    all_results.extend(run_aggregation_benchmarks());

    println!("\n{:=<80}", "");
    println!(
        "{:<36} {:>10} {:>12} {:>15} {:>12}",
        "Benchmark", "Count", "Time (ms)", "Throughput/s", "Checksum"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<36} {:>10} {:>12.2} {:>15.0} {:>12.4}",
            result.name,
            result.evaluations,
            result.time_ms,
            result.throughput_per_sec,
            result.checksum
        );
    }
    println!("{:=<80}", "");

    let cores = system_info.cpu_cores.to_string();
    let threads = system_info.rayon_threads.to_string();
    let rows: Vec<(String, String)> = all_results
        .iter()
        .map(|r| (r.name.clone(), format!("{:.2}", r.time_ms)))
        .collect();
    let mut summary: Vec<(&str, &str)> = vec![
        ("os", system_info.os.as_str()),
        ("cpu", system_info.cpu_model.as_str()),
        ("cpu_cores", cores.as_str()),
        ("rayon_threads", threads.as_str()),
        ("rust_version", system_info.rust_version.as_str()),
    ];
    summary.extend(rows.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let filename = format!(
        "benchmark_results_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    if let Err(e) = write_summary_to_csv(&filename, &summary) {
        error!(%e, file = %filename, "could not write benchmark summary");
        process::exit(1);
    }
    info!(file = %filename, "benchmark complete");
}
