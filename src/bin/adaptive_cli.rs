use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adaptive_speed::config::AppConfig;
use adaptive_speed::replay::{discover_scripts, ReplayRunner, ReplayScript, DEFAULT_SCRIPT_ROOT};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "adaptive_cli",
    about = "Deterministic replay harness for the adaptive speed engine"
)]
struct Cli {
    /// Directory containing replay scripts (defaults to fixtures/)
    #[arg(long)]
    scripts_dir: Option<PathBuf>,
    /// JSON config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a replay script and print every frame's engine snapshot
    Simulate {
        #[arg(long)]
        script: String,
        #[arg(long)]
        initial_rate: Option<f64>,
        /// Adjust tempo instead of frequency
        #[arg(long)]
        no_adjust_pitch: bool,
    },
    /// Print the effective configuration
    DumpConfig,
    /// List available replay scripts
    ListScripts,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .as_ref()
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);
    let scripts_dir = cli
        .scripts_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_ROOT));

    match cli.command {
        Commands::Simulate {
            script,
            initial_rate,
            no_adjust_pitch,
        } => run_simulate(config, &scripts_dir, &script, initial_rate, no_adjust_pitch),
        Commands::DumpConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::from(0))
        }
        Commands::ListScripts => run_list(&scripts_dir),
    }
}

fn run_simulate(
    config: AppConfig,
    scripts_dir: &Path,
    script: &str,
    initial_rate: Option<f64>,
    no_adjust_pitch: bool,
) -> Result<ExitCode> {
    let mut settings = config.adaptive_speed;
    if let Some(rate) = initial_rate {
        settings.initial_rate = rate;
    }
    if no_adjust_pitch {
        settings.adjust_pitch = false;
    }

    let runner = ReplayRunner::new(settings).context("invalid adaptive speed settings")?;
    let data = ReplayScript::resolve(script, scripts_dir)?;
    let report = runner
        .run(&data)
        .with_context(|| format!("running replay {}", script))?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(expect) = &data.expect {
        if let Err(failures) = report.verify(expect) {
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "failures": failures }))?
            );
            return Ok(ExitCode::from(2));
        }
    }
    Ok(ExitCode::from(0))
}

fn run_list(scripts_dir: &Path) -> Result<ExitCode> {
    let scripts = discover_scripts(scripts_dir)?;
    if scripts.is_empty() {
        println!("No replay scripts found under {}", scripts_dir.display());
        return Ok(ExitCode::from(0));
    }

    for path in scripts {
        if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
            println!("{}", name);
        }
    }
    Ok(ExitCode::from(0))
}
