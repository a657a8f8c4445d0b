//! Fever Triage - command line entry point

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use fever_triage::constants::{
    self, APP_NAME, APP_VERSION, DEFAULT_BACKGROUND_SIZE, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED,
    DEFAULT_TREE_COUNT,
};
use fever_triage::{train_and_persist_to, ForestConfig, Result, TrainingConfig, TriageEngine};

#[derive(Debug, Parser)]
#[command(
    name = "fever-triage",
    version,
    about = "Fever triage: rule score, probable diagnoses and recommendation",
    long_about = "fever-triage trains the diagnosis classifier on synthetic patients and \
        assesses patients against the installed model.\n\n\
        EXAMPLES:\n\
        \n  fever-triage train --seed 7                  Train and write the model\n\
        \n  fever-triage assess patient.json             Assess a patient from a file\n\
        \n  echo '{\"temperature\": 39.2, \"duration_days\": 3}' | fever-triage assess -"
)]
struct Cli {
    /// Model artifact path
    #[arg(long, global = true, env = "TRIAGE_MODEL_PATH")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train on synthetic patients and write the model artifact
    Train(TrainArgs),

    /// Assess one patient (JSON object) and print the result as JSON
    Assess {
        /// Patient JSON file, or `-` for stdin
        input: String,
    },

    /// Print engine status for the installed model
    Status,
}

#[derive(Debug, Args)]
struct TrainArgs {
    /// Synthetic patients to generate
    #[arg(long, env = "TRIAGE_SAMPLE_COUNT", default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Seed for every random draw
    #[arg(long, env = "TRIAGE_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Trees in the forest
    #[arg(long, env = "TRIAGE_TREE_COUNT", default_value_t = DEFAULT_TREE_COUNT)]
    trees: usize,

    /// Background vectors kept for attribution
    #[arg(long, env = "TRIAGE_BACKGROUND_SIZE", default_value_t = DEFAULT_BACKGROUND_SIZE)]
    background: usize,
}

impl TrainArgs {
    fn config(&self) -> TrainingConfig {
        TrainingConfig {
            sample_count: self.samples,
            seed: self.seed,
            background_size: self.background,
            forest: ForestConfig {
                n_estimators: self.trees,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl Cli {
    fn model_path(&self) -> PathBuf {
        self.model.clone().unwrap_or_else(constants::get_model_path)
    }
}

fn main() -> ExitCode {
    // Before parsing so `.env` values feed the `env` fallbacks
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Train(args) => run_train(args.config(), cli.model_path()),
        Command::Assess { input } => run_assess(input, cli.model_path()),
        Command::Status => run_status(cli.model_path()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_train(config: TrainingConfig, path: PathBuf) -> Result<()> {
    log::info!("Starting {} v{} training...", APP_NAME, APP_VERSION);
    let artifact = train_and_persist_to(&config, &path)?;

    println!("{}", serde_json::to_string_pretty(&artifact.report)?);
    Ok(())
}

fn run_assess(source: &str, path: PathBuf) -> Result<()> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let engine = TriageEngine::from_artifact_path(&path)?;
    let assessment = engine.assess_json(&value)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

fn run_status(path: PathBuf) -> Result<()> {
    let engine = if path.exists() {
        TriageEngine::from_artifact_path(&path)?
    } else {
        log::warn!("No model at {} - run `fever-triage train` first", path.display());
        TriageEngine::unloaded()
    };

    println!("{}", serde_json::to_string_pretty(&engine.status())?);
    Ok(())
}
