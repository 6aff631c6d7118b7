use anyhow::Result;
use clap::{Parser, Subcommand};
use pagecheck_cli::{commands, RunOpts};

#[derive(Parser)]
#[command(name = "pagecheck")]
#[command(author, version)]
#[command(
    about = "Acceptance checks for a rendered single-page site",
    long_about = "Pagecheck drives a headless Chrome session against a served page and runs \
                  an ordered battery of layout, interaction, and content checks, collecting \
                  screenshots and a structured JSON report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full acceptance battery: console diagnostics, responsive
    /// layout, menu/modal/carousel/form interactions, desktop verification
    Audit {
        #[command(flatten)]
        opts: RunOpts,
    },

    /// Verify expected content phrases section by section
    Verify {
        #[command(flatten)]
        opts: RunOpts,
    },

    /// Capture full-page and per-section screenshots
    Shots {
        #[command(flatten)]
        opts: RunOpts,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Audit { opts } => commands::audit::execute(&opts).await?,
        Commands::Verify { opts } => commands::verify::execute(&opts).await?,
        Commands::Shots { opts } => commands::shots::execute(&opts).await?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pagecheck=debug,pagecheck_core=debug,pagecheck_browser=debug,pagecheck_checks=debug")
    } else {
        EnvFilter::new("pagecheck=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
