use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runcount::{
    count_adaptive, count_linear, fit_linear, fit_operations, sample_operations, sweep, Counter,
    Distribution, SweepConfig, VerifyConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands};

/// Shortest sample drawn by `fit`.
const FIT_MIN_ELEMENTS: usize = 50;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }

    let mut rng = StdRng::seed_from_u64(cli.seed);
    if let Err(e) = run(cli.command, &mut rng) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level {:?}", level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stdout)
        .init();
    Ok(())
}

fn run(command: Commands, rng: &mut StdRng) -> Result<()> {
    match command {
        Commands::Verify {
            repeats,
            distribution,
        } => {
            let config = VerifyConfig {
                repeats,
                distribution,
                ..VerifyConfig::default()
            };
            let report = runcount::verify_equivalence(rng, &config)?;
            println!(
                "{} samples, {} elements: linear {} operations, adaptive {} operations",
                report.checks, report.elements, report.linear_operations, report.adaptive_operations
            );
        }
        Commands::Sweep {
            distribution,
            start,
            max_elements,
            repeats,
        } => {
            info!("Used distribution: {}", distribution);
            let config = SweepConfig {
                start,
                max: max_elements,
                repeats,
                distribution,
                ..SweepConfig::default()
            };
            for counter in [Counter::Linear, Counter::Adaptive] {
                run_sweep(rng, counter, &config)?;
            }
        }
        Commands::Fit {
            samples,
            max_elements,
            distribution,
        } => run_fit(rng, samples, max_elements, distribution)?,
        Commands::Count { text } => run_count(&text)?,
    }
    Ok(())
}

fn run_sweep(rng: &mut StdRng, counter: Counter, config: &SweepConfig) -> Result<()> {
    let points = sweep(rng, counter, config)
        .with_context(|| format!("sweep of {} failed", counter.title()))?;

    let xs: Vec<f64> = points.iter().map(|p| p.elements as f64 / 1e6).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.average_secs).collect();
    match fit_linear(&xs, &ys) {
        Ok(fit) => {
            info!("Comparison of \"Elements (m)\" versus \"Average (sec)\":");
            info!("\t{} Equation:", counter.title());
            info!(
                "\t\ttime = {:.3} x elements_millions + {:.3}",
                fit.slope, fit.intercept
            );
            info!("\t\tr squared: {:.3}", fit.r_squared);
        }
        Err(e) => info!("\tno fit for {}: {}", counter.title(), e),
    }
    info!("{}", "*".repeat(80));
    Ok(())
}

fn run_fit(
    rng: &mut StdRng,
    samples: usize,
    max_elements: usize,
    distribution: Distribution,
) -> Result<()> {
    let pairs = sample_operations(rng, samples, FIT_MIN_ELEMENTS, max_elements, distribution)?;
    let fit = fit_operations(&pairs)?;
    info!("Equation:");
    info!(
        "\titerations = {:.2} x log(n_elements) + {:.2}",
        fit.slope, fit.intercept
    );
    println!("elements\toperations");
    for (elements, operations) in &pairs {
        println!("{}\t{}", elements, operations);
    }
    println!("operations = {:.2} ln(n) + {:.2} (r² {:.3})", fit.slope, fit.intercept, fit.r_squared);
    Ok(())
}

fn run_count(text: &str) -> Result<()> {
    let mut data: Vec<char> = text.chars().collect();
    data.sort_unstable();

    let linear = count_linear(&data);
    let adaptive = count_adaptive(&data)?;
    runcount::compare_counts(&linear.counts, &adaptive.counts)?;

    println!("Element\tCount");
    for (value, count) in adaptive.counts.sorted() {
        println!("{}\t{}", value, count);
    }
    println!(
        "linear: {} operations, adaptive: {} operations",
        linear.operations, adaptive.operations
    );
    Ok(())
}
