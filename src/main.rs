//! TSP Genetic Solver - Command Line Interface
//!
//! Reads a road network and prints the best route found by the genetic algorithm.

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tsp_genetic::benchmark::{Benchmark, BenchmarkConfig};
use tsp_genetic::genetic::{GaConfig, GeneticAlgorithm};
use tsp_genetic::instance::TspInstance;
use tsp_genetic::Result;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tsp-genetic")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "A genetic algorithm solver for the symmetric TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance and print the best route
    Solve {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        #[command(flatten)]
        ga: GaArgs,

        /// Random seed (drawn at random and logged when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the best length of every generation to a CSV file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,

        /// Fail if the best route uses a pair of cities with no road
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the solver several times with consecutive seeds
    Benchmark {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        #[command(flatten)]
        ga: GaArgs,

        /// Number of runs
        #[arg(short, long, default_value = "10")]
        runs: usize,

        /// Seed of the first run
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output CSV file with one line per run
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze an instance
    Analyze {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,
    },
}

#[derive(Args)]
struct GaArgs {
    /// Population size
    #[arg(short, long, default_value = "100")]
    population_size: usize,

    /// Number of generations
    #[arg(short, long, default_value = "1000")]
    generations: usize,

    /// Probability that a child is mutated
    #[arg(short, long, default_value = "0.01")]
    mutation_prob: f64,

    /// Parent selection method
    #[arg(long, value_enum, default_value = "roulette")]
    selection: Selection,

    /// Tournament size (tournament selection only)
    #[arg(long, default_value = "3")]
    tournament_size: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Selection {
    /// Fitness-proportionate on raw route length
    Roulette,
    /// Shortest route out of a random draw
    Tournament,
}

impl GaArgs {
    fn to_config(&self, seed: Option<u64>) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            generations: self.generations,
            mutation_prob: self.mutation_prob,
            selection_type: match self.selection {
                Selection::Roulette => tsp_genetic::genetic::SelectionType::Roulette,
                Selection::Tournament => tsp_genetic::genetic::SelectionType::Tournament,
            },
            tournament_size: self.tournament_size,
            seed,
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve { instance, ga, seed, output, history, progress, strict, verbose } => {
            solve_instance(&instance, ga.to_config(seed), output, history, progress, strict, verbose)
        }

        Commands::Benchmark { instance, ga, runs, seed, output } => {
            run_benchmark(&instance, ga.to_config(None), runs, seed, output)
        }

        Commands::Analyze { instance } => analyze_instance(&instance),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn progress_bar(len: usize, unit: &str) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let template = format!("{{bar:40.cyan/blue}} {{pos}}/{{len}} {}  {{msg}}", unit);
    bar.set_style(
        ProgressStyle::with_template(&template).unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn solve_instance(
    path: &Path,
    config: GaConfig,
    output: Option<PathBuf>,
    history: Option<PathBuf>,
    progress: bool,
    strict: bool,
    verbose: bool,
) -> Result<()> {
    log::info!("Loading instance from {:?}", path);
    let instance = TspInstance::from_file(path)?;

    if verbose {
        println!("{}", instance.statistics());
    }

    let bar = if progress {
        progress_bar(config.generations, "generations")
    } else {
        ProgressBar::hidden()
    };

    let mut ga = GeneticAlgorithm::from_instance(&instance, config)?;
    let solution = ga.run_with_observer(|generation, elite| {
        bar.set_position(generation as u64);
        bar.set_message(format!("best {:.2}", elite.fitness));
    })?;
    bar.finish_and_clear();

    if strict {
        solution.ensure_connected()?;
    } else if solution.missing_legs > 0 {
        log::warn!(
            "Route uses {} leg(s) with no road; they were counted as 0 km",
            solution.missing_legs
        );
    }

    if verbose {
        println!("{}", solution);
    }
    println!("{}", solution.route);

    if let Some(out_path) = output {
        solution.save_json(&out_path)?;
        log::info!("Solution saved to {:?}", out_path);
    }

    if let Some(history_path) = history {
        solution.export_history_csv(&history_path)?;
        log::info!("Convergence history saved to {:?}", history_path);
    }

    Ok(())
}

fn run_benchmark(
    path: &Path,
    ga: GaConfig,
    runs: usize,
    base_seed: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    let instance = TspInstance::from_file(path)?;

    let config = BenchmarkConfig {
        num_runs: runs,
        base_seed,
        ga,
    };
    let mut benchmark = Benchmark::new(config);

    let bar = progress_bar(runs, "runs");
    for run in 0..runs {
        let result = benchmark.run_single(&instance, run)?;
        bar.set_message(format!("last {:.2}", result.fitness));
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("{}", benchmark.generate_report());

    if let Some(out_path) = output {
        benchmark.export_to_csv(&out_path)?;
        println!("Results exported to {:?}", out_path);
    }

    Ok(())
}

fn analyze_instance(path: &Path) -> Result<()> {
    let instance = TspInstance::from_file(path)?;

    println!("========== Instance Analysis ==========\n");
    println!("{}", instance.statistics());

    let matrix = &instance.distance_matrix;
    let isolated: Vec<usize> = (1..=instance.num_cities)
        .filter(|&city| (1..=instance.num_cities).all(|other| !matrix.has_edge(city, other)))
        .collect();

    if !isolated.is_empty() {
        println!("Cities with no road: {:?}", isolated);
    }
    if matrix.missing_pairs() > 0 {
        println!(
            "Note: {} unconnected pair(s) are treated as 0 km by the solver",
            matrix.missing_pairs()
        );
    }

    Ok(())
}
