use clap::Parser;
use miette::Result;
use qrstyle::cli::{Cli, Commands};
use qrstyle::output::Printer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(verbose: bool) {
    let default = if verbose { "qrstyle=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let printer = Printer::new();

    match cli.command {
        Commands::Render(args) => qrstyle::cli::render::run(args, &printer).await?,
        Commands::Validate(args) => qrstyle::cli::validate::run(args, &printer).await?,
        Commands::List(args) => qrstyle::cli::list::run(args, &printer)?,
        Commands::Init(args) => qrstyle::cli::init::run(args, &printer)?,
        Commands::Completions(args) => qrstyle::cli::completions::run(args)?,
    }

    Ok(())
}
