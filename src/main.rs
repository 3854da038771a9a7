use clap::Parser;
use stms_mcp::cli::{Cli, Commands};
use stms_mcp::types::config::Config;
use stms_mcp::StmsResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> StmsResult<()> {
    let cli = Cli::parse();

    // Configuration comes first; logging depends on it
    let config = Config::load_or_default(&cli.config)?
        .with_overrides(cli.staging_url.clone(), cli.cookie.clone());
    config.validate()?;

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("stms_mcp={}", log_level)
            .parse()
            .unwrap_or_else(|_| "stms_mcp=info".parse().expect("fallback directive is valid")),
    );

    // Stdout is reserved for MCP traffic
    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Init { path } => {
            stms_mcp::cli::commands::init(path).await?;
        }
        Commands::Serve => {
            stms_mcp::cli::commands::serve(&config).await?;
        }
        Commands::Tools => {
            stms_mcp::cli::commands::tools();
        }
        Commands::Call { tool, args } => {
            stms_mcp::cli::commands::call(&tool, &args, &config).await?;
        }
        Commands::Doctor => {
            stms_mcp::cli::commands::doctor(&config).await?;
        }
        Commands::Version => {
            stms_mcp::cli::commands::version();
        }
    }

    Ok(())
}
