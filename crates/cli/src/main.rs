//! stash CLI entry point

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    if let Err(error) = run().await {
        eprintln!("{error:?}");
        std::process::exit(1);
    }
}

async fn run() -> miette::Result<()> {
    let cli = cli::parse();
    logging::init_tracing(cli.log_level)?;
    commands::execute(cli.command).await
}
