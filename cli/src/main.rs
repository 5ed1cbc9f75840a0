use clap::Parser;
use ffc_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    if let Err(err) = ffc_cli::run(cli) {
        eprintln!("{}", ffc_cli::describe_error(&err));
        std::process::exit(1);
    }
}
