use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use serde::Serialize;

use shallow_nn::train::{self, log_snapshot};
use shallow_nn::{rng, Network, Topology, TrainConfig, TrainingOutcome, DEFAULT_LEARNING_RATE};

/// Trains single-hidden-layer networks on XOR.
#[derive(Parser, Debug)]
#[command(name = "shallow-nn")]
#[command(about = "Train small sigmoid networks on XOR with online backpropagation")]
struct Cli {
    /// Network configuration as inputs-hidden-outputs
    #[arg(short = 'c', long = "config", default_value = "2-2-1")]
    topology: String,

    /// Number of training iterations
    #[arg(short, long, default_value_t = 131_072)]
    iterations: usize,

    /// Learning rate, must lie in (0, 1)
    #[arg(short = 'l', long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Number of neural networks to train
    #[arg(short = 'n', long, default_value_t = 1)]
    nets: usize,

    /// Display step (0 disables snapshots)
    #[arg(short = 'p', long, default_value_t = 1024)]
    print_every: usize,

    /// Train each network until it is successful or stagnates
    #[arg(short = 't', long)]
    train_until_success: bool,

    /// Base seed for reproducible runs; OS entropy when omitted
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON file overriding the until-success thresholds
    #[arg(long)]
    train_config: Option<std::path::PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum Report {
    Fixed {
        topology: Topology,
        learning_rate: f64,
        iterations: usize,
        nets: usize,
        mean_success_rate: f64,
    },
    UntilSuccess {
        topology: Topology,
        nets: usize,
        mean_success_rate: f64,
        mean_iterations: usize,
        outcomes: Vec<TrainingOutcome>,
    },
}

fn parse_topology(raw: &str) -> Topology {
    raw.parse().unwrap_or_else(|err| {
        warn!("{err}; falling back to {}", Topology::default());
        Topology::default()
    })
}

fn network_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(base) => rng::derive(base, index),
        None => rng::from_entropy(),
    }
}

fn build_network(cli: &Cli, topology: Topology, index: usize) -> Network {
    let mut net = Network::with_topology(topology, &mut network_rng(cli.seed, index));
    net.set_learning_rate(cli.learning_rate);
    info!("{topology} initialised with learning rate {}", net.learning_rate());
    net
}

fn run_fixed(cli: &Cli, topology: Topology) -> Result<Report> {
    let examples = train::xor();
    let mut success_rate = 0.0;

    for n in 0..cli.nets {
        let mut net = build_network(cli, topology, n);
        let summary = train::run_epoch_set(
            &mut net,
            &examples,
            cli.iterations,
            cli.print_every,
            log_snapshot,
        )
        .with_context(|| format!("training network {n} ({topology})"))?;
        info!("network {n}: mean error {:.5}", summary.mean_error);

        success_rate += train::evaluate(&mut net, &examples)
            .with_context(|| format!("evaluating network {n} ({topology})"))?;
    }

    Ok(Report::Fixed {
        topology,
        learning_rate: cli.learning_rate,
        iterations: cli.iterations,
        nets: cli.nets,
        mean_success_rate: success_rate / cli.nets as f64,
    })
}

fn run_until_success(cli: &Cli, topology: Topology, config: &TrainConfig) -> Result<Report> {
    let examples = train::xor();
    let mut outcomes = Vec::with_capacity(cli.nets);

    for n in 0..cli.nets {
        let mut net = build_network(cli, topology, n);
        let outcome = train::train_until_success(
            &mut net,
            &examples,
            cli.print_every,
            config,
            log_snapshot,
        )
        .with_context(|| format!("training network {n} ({topology})"))?;
        outcomes.push(outcome);
    }

    let converged: Vec<usize> = outcomes
        .iter()
        .filter(|o| o.is_converged())
        .map(TrainingOutcome::iterations)
        .collect();
    let mean_iterations = match converged.len() {
        0 => 0,
        len => converged.iter().sum::<usize>() / len,
    };

    Ok(Report::UntilSuccess {
        topology,
        nets: cli.nets,
        mean_success_rate: converged.len() as f64 / cli.nets as f64,
        mean_iterations,
        outcomes,
    })
}

fn print_report(report: &Report) {
    match report {
        Report::Fixed { topology, learning_rate, iterations, mean_success_rate, .. } => println!(
            "Average success rate for {topology} network with a = {learning_rate:0.3} over {iterations} iterations: {mean_success_rate:3.5}"
        ),
        Report::UntilSuccess { topology, mean_success_rate, mean_iterations, .. } => println!(
            "{topology}: mean success rate {mean_success_rate:5.3} with mean training time {mean_iterations} generations"
        ),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.nets > 0, "--nets must be at least 1");

    let topology = parse_topology(&cli.topology);
    let report = if cli.train_until_success {
        let config = match &cli.train_config {
            Some(path) => TrainConfig::load_json(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => TrainConfig::default(),
        };
        run_until_success(&cli, topology, &config)?
    } else {
        run_fixed(&cli, topology)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
