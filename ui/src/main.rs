use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_core::TodoClient;
use todo_ui::{App, UreqTransport};

/// Interactive terminal client for the todo server.
#[derive(Parser, Debug)]
#[command(name = "todo-ui", version, about)]
struct Args {
    /// Base URL of the todo server.
    #[arg(long, env = "TODO_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Log filter for diagnostics written to stderr.
    #[arg(long, env = "TODO_LOG", default_value = "warn")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::new(TodoClient::new(&args.url), UreqTransport::new());
    let stdin = std::io::stdin();
    app.run(stdin.lock(), std::io::stdout())?;
    Ok(())
}
