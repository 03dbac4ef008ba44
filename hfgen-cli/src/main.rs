use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{run_call, run_serve, run_tools};

#[derive(Parser, Debug)]
#[command(name = "hfgen", version)]
#[command(about = "hfgen - MCP server exposing HuggingFace text generation")]
struct Cli {
    /// Log output format (logs always go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    log_format: LogFormat,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Serve MCP on stdin/stdout (default)
    Serve,
    /// Print the tool catalog as JSON
    Tools,
    /// Invoke one tool and print its content
    Call {
        /// Tool name
        #[arg(long)]
        tool: String,
        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
}

fn init_logging(format: LogFormat, level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the MCP protocol
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level);

    let command = cli.command.unwrap_or(Commands::Serve);
    let result = match &command {
        Commands::Serve => run_serve().await,
        Commands::Tools => run_tools(&mut std::io::stdout().lock()),
        Commands::Call { tool, args } => run_call(tool, args, &mut std::io::stdout()).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, command = ?command, "hfgen failed");
        std::process::exit(1);
    }
}
