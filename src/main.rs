use clap::Parser;
use mazesolve::app::{App, Cli, logging};

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init_file_logging(&cli.log_file, cli.log_level)?;
    tracing::info!("mazesolve started");

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::new(&cli).run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("Session ended with error: {}", e);
    }
    result
}
