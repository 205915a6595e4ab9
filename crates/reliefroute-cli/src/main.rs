//! `reliefroute` - plan food distribution from a scenario file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use owo_colors::OwoColorize;

use reliefroute::{CenterStatus, DistributionPlanner, EngineConfig};

mod error;
mod formula;
mod report;
mod scenario;

use error::Result;
use formula::FormulaName;
use report::PlanOutput;
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "reliefroute", about = "Food distribution planning", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a scenario's history, then predict, allocate and route.
    Plan(PlanArgs),
    /// Evaluate a single formula.
    Formula(FormulaArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Scenario TOML file. The built-in demo runs when omitted.
    scenario: Option<PathBuf>,
    #[arg(long, help = "Engine configuration file (TOML or YAML)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Seed for reproducible weight initialization")]
    seed: Option<u64>,
    #[arg(long, action = ArgAction::SetTrue, help = "Print the plan as pretty JSON")]
    json: bool,
}

#[derive(Args)]
struct FormulaArgs {
    #[arg(value_enum)]
    name: FormulaName,
    #[arg(allow_negative_numbers = true, num_args = 1..)]
    args: Vec<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => run_plan(args),
        Commands::Formula(args) => run_formula(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let scenario = match &args.scenario {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::demo()?,
    };
    let prepared = scenario.prepare()?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => scenario.engine.clone().unwrap_or_default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_random_seed(seed);
    }

    if !args.json {
        reliefroute::console::init();
    }

    let mut planner = DistributionPlanner::new(config, prepared.areas)?;
    let training = planner.train(&prepared.history, &prepared.features)?;
    let plan = planner.plan(prepared.depot, &prepared.forecast, &prepared.inventory)?;

    let output = PlanOutput {
        training,
        centers: prepared
            .network
            .centers()
            .iter()
            .map(CenterStatus::from)
            .collect(),
        plan: &plan,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render(&output));
    }
    Ok(())
}

fn run_formula(args: FormulaArgs) -> Result<()> {
    let value = formula::evaluate(args.name, &args.args)?;
    println!("{value}");
    Ok(())
}
