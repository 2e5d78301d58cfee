use anyhow::Context;
use binance_context_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments before touching stdout
    let args: Vec<String> = std::env::args().collect();
    parse_args(&args);

    // Initialize tracing/logging
    // stdout is reserved for MCP frames, so logs always go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = config.environment(),
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        "Starting Binance context server"
    );

    if config.has_credentials() {
        tracing::info!("API credentials found - account tools enabled");
    } else {
        tracing::warn!("API credentials not found - only public market data tools will work");
        tracing::warn!("Set BINANCE_API_KEY and BINANCE_API_SECRET for get_account_balance");
    }

    tokio::select! {
        result = run_stdio_server(&config) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            tracing::info!("Received shutdown signal (Ctrl+C)");
        }
    }

    Ok(())
}

/// Handles `--help` and `--version`; anything else is a usage error
fn parse_args(args: &[String]) {
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", arg);
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

/// Print usage information
fn print_usage() {
    println!("Binance Context Server - MCP server for Binance market data and account balances");
    println!();
    println!("USAGE:");
    println!("    binance-context-server [OPTIONS]");
    println!();
    println!("Speaks the Model Context Protocol over stdin/stdout.");
    println!();
    println!("OPTIONS:");
    println!("    --help, -h          Print this help message");
    println!("    --version, -V       Print version information");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    BINANCE_API_KEY       Binance API key (optional, enables account tools)");
    println!("    BINANCE_API_SECRET    Binance API secret (required together with the key)");
    println!("    BINANCE_TESTNET       Use https://testnet.binance.vision (default: false)");
    println!("    BINANCE_BASE_URL      Binance REST base URL override");
    println!("    BINANCE_TIMEOUT_SECS  Per-request timeout, 1 to 120 (default: 10)");
    println!("    RUST_LOG              Logging level (default: info)");
}

#[cfg(feature = "mcp_server")]
async fn run_stdio_server(config: &Config) -> anyhow::Result<()> {
    binance_context_server::transport::run_stdio_server(config).await
}

#[cfg(not(feature = "mcp_server"))]
async fn run_stdio_server(_config: &Config) -> anyhow::Result<()> {
    tracing::error!("stdio mode not available - compile with 'mcp_server' feature");
    anyhow::bail!("stdio mode not available")
}
