use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use formalizer::cli::{is_blank, render_examples, render_result, EMPTY_INPUT_WARNING};
use formalizer::{ExamplePair, ExampleRow, FormalizerConfig, EXAMPLES};

#[derive(Parser, Debug)]
#[command(name = "formalizer", version, about = "Rewrite casual text in a formal register")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Formalize TEXT, or stdin when TEXT is omitted
    Formalize {
        text: Option<String>,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
        #[arg(long, help = "Skip the generative model")]
        rules_only: bool,
        #[arg(long = "model", help = "Model id to try, in order (repeatable)")]
        models: Vec<String>,
        #[arg(long, help = "Inference endpoint base URL")]
        base_url: Option<String>,
        #[arg(long, help = "Request timeout in seconds")]
        timeout: Option<u64>,
        #[arg(long, help = "Sampling temperature")]
        temperature: Option<f64>,
        #[arg(long, help = "Beam search width")]
        beams: Option<u32>,
        #[arg(long, help = "Disable stochastic sampling")]
        no_sample: bool,
    },
    /// Show the example table
    Examples {
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Formalize {
            text,
            json,
            rules_only,
            models,
            base_url,
            timeout,
            temperature,
            beams,
            no_sample,
        } => {
            let input = read_input(text).await?;
            if is_blank(&input) {
                eprintln!("{}", EMPTY_INPUT_WARNING);
                std::process::exit(2);
            }

            let mut config = FormalizerConfig::from_env();
            if rules_only {
                config = config.with_generator_enabled(false);
            }
            if !models.is_empty() {
                config = config.with_models(models);
            }
            if let Some(url) = base_url {
                config.client = config.client.with_base_url(url);
            }
            if let Some(secs) = timeout {
                config.client = config.client.with_timeout(secs);
            }
            if let Some(temperature) = temperature {
                config.generation = config.generation.with_temperature(temperature);
            }
            if let Some(beams) = beams {
                config.generation = config.generation.with_beam_width(beams);
            }
            if no_sample {
                config.generation = config.generation.with_sampling(false);
            }

            let formalizer = config.build().await.context("invalid configuration")?;
            let result = formalizer.formalize(&input).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_result(&result));
            }
        }
        Commands::Examples { json } => {
            if json {
                let rows: Vec<ExampleRow> = EXAMPLES.iter().map(ExamplePair::to_row).collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_examples(EXAMPLES));
            }
        }
    }

    Ok(())
}
