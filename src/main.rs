use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seo_strategy::gemini::{GeminiClient, GeminiConfig};
use seo_strategy::request::template;
use seo_strategy::{Config, OutputFormat, StrategyRequest, prompt};

#[derive(Parser)]
#[command(name = "seo-strategy")]
#[command(about = "Generate SEO keyword strategies with Gemini and render them")]
struct Cli {
    /// Config file
    #[arg(short, long, default_value = "seo-strategy.toml", global = true)]
    config: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an empty request file
    Init,
    /// Print the prompt built from a request file
    Prompt {
        /// Request file (TOML)
        request: PathBuf,
    },
    /// Generate a strategy from a request file
    Generate {
        /// Request file (TOML)
        request: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render a saved model response
    Render {
        /// Response file (markdown)
        response: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the blocks parsed from a saved model response
    Blocks {
        /// Response file (markdown)
        response: PathBuf,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file (defaults to stdout, or the input name for PDF)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Command::Init => {
            print!("{}", template());
        }
        Command::Prompt { request } => {
            let request = load_request(&request)?;
            print!("{}", prompt::build_prompt(&request));
        }
        Command::Generate { request, output } => {
            let strategy = load_request(&request)?;
            let response = generate(&strategy, &config)
                .await
                .context("Failed to generate strategy")?;
            info!(company = %strategy.company_name, "strategy generated");

            write_or_keep_response(&response, &request, &output, &config)?;
        }
        Command::Render { response, output } => {
            let markdown = fs::read_to_string(&response)
                .with_context(|| format!("Error reading {}", response.display()))?;
            write_output(&markdown, &response, &output, &config)?;
        }
        Command::Blocks { response } => {
            let markdown = fs::read_to_string(&response)
                .with_context(|| format!("Error reading {}", response.display()))?;
            for block in seo_strategy::parse(&markdown) {
                println!("{:?}", block);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn generate(strategy: &StrategyRequest, config: &Config) -> seo_strategy::Result<String> {
    strategy.validate()?;
    let client = GeminiClient::new(GeminiConfig::from_config(&config.api)?)?;
    client.generate(&prompt::build_prompt(strategy)).await
}

/// Write the rendered response, saving the raw markdown as `<REQUEST>.md` if that fails.
fn write_or_keep_response(
    response: &str,
    request: &Path,
    args: &OutputArgs,
    config: &Config,
) -> Result<()> {
    let Err(e) = write_output(response, request, args, config) else {
        return Ok(());
    };

    let saved = request.with_extension(OutputFormat::Markdown.extension());
    fs::write(&saved, response).with_context(|| format!("Error writing {}", saved.display()))?;
    warn!(path = %saved.display(), "output failed, raw response saved");
    eprintln!("Saved raw response to {}", saved.display());
    Err(e)
}

fn load_request(path: &Path) -> Result<StrategyRequest> {
    StrategyRequest::load(path).with_context(|| format!("Error reading {}", path.display()))
}

fn write_output(markdown: &str, input: &Path, args: &OutputArgs, config: &Config) -> Result<()> {
    let format = args.format.unwrap_or(config.output.format);
    let bytes = seo_strategy::render(markdown, format, &config.output.title)?;

    // Binary output never goes to the terminal
    let output = match &args.output {
        Some(path) => Some(path.clone()),
        None if format.is_binary() => Some(input.with_extension(format.extension())),
        None => None,
    };

    match output {
        Some(path) => {
            fs::write(&path, bytes).with_context(|| format!("Error writing {}", path.display()))?;
            info!(path = %path.display(), "report written");
            println!("Created {}", path.display());
        }
        None => {
            io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}
