use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use omnistrat_core::{export, Action, BusinessModel, WizardState};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod remote;
mod render;
mod state;
mod suggestions;

#[derive(Parser, Debug)]
#[command(
    name = "omnistrat",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("OMNISTRAT_BUILD_SHA"), ")"),
    about = "Turn a one-line product idea into a strategy report"
)]
struct Cli {
    /// Debug-level logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive four-step wizard: idea, business model, generation, report
    Wizard {
        /// Directory exported reports go to (default: [export].dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Generate a report in one go
    Generate {
        /// One-line product idea
        #[arg(long)]
        idea: String,

        /// Business model: consumer, b2b or platform
        #[arg(long)]
        model: BusinessModel,

        /// Print the report document as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write <idea>-strategy-report.json
        #[arg(long)]
        export: bool,

        /// Directory for --export (default: [export].dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Render a previously exported report
    Show {
        file: PathBuf,
    },

    /// List built-in product ideas
    Suggest {
        /// Print a single random idea
        #[arg(long)]
        random: bool,
    },

    /// Manage ~/.omnistrat/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "omnistrat=debug,omnistrat_core=debug"
    } else {
        "omnistrat=warn,omnistrat_core=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Wizard { out_dir } => {
            let cfg = config::load_config()?;
            let synthesizer = cfg.synthesizer()?;
            let dir = out_dir.unwrap_or(cfg.export.dir);

            let stdin = io::stdin();
            let session = interactive::Session::new(stdin.lock(), io::stdout(), synthesizer.as_ref(), &dir);
            session.run()?;
        }

        Command::Generate {
            idea,
            model,
            json,
            export: write_file,
            out_dir,
        } => {
            let cfg = config::load_config()?;
            let dir = out_dir.unwrap_or_else(|| cfg.export.dir.clone());
            generate_once(&cfg, idea, model, json, write_file.then_some(dir))?;
        }

        Command::Show { file } => {
            let report = export::read_report(&file).with_context(|| format!("load {}", file.display()))?;
            print!("{}", render::render_report(&report));
        }

        Command::Suggest { random } => {
            if random {
                println!("{}", suggestions::random());
            } else {
                for (i, s) in suggestions::SUGGESTIONS.iter().enumerate() {
                    println!("{:>2}. {s}", i + 1);
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

/// Walk the wizard from idea to report without prompting.
fn generate_once(
    cfg: &config::Config,
    idea: String,
    model: BusinessModel,
    json: bool,
    export_dir: Option<PathBuf>,
) -> Result<()> {
    let synthesizer = cfg.synthesizer()?;

    let mut state = WizardState::new();
    for action in [
        Action::SetProductIdea(idea),
        Action::AdvanceToModel,
        Action::SelectBusinessModel(model),
        Action::AdvanceToGeneration,
    ] {
        if let Err(blocked) = state.check(&action) {
            bail!("{blocked}");
        }
        state = state.apply(action);
    }

    let state = state.generate(synthesizer.as_ref());
    if let Some(err) = state.last_error() {
        bail!("strategy generation failed: {err}");
    }
    let report = state.report().context("no report was produced")?;

    if json {
        println!("{}", export::to_document(report)?);
    } else {
        print!("{}", render::render_report(report));
    }

    if let Some(dir) = export_dir {
        let path = export::write_report(&dir, state.product_idea(), report)
            .context("export strategy report")?;
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
