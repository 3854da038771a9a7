//! CLI command implementations.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::catalog::Tool;
use crate::client::StagingApi;
use crate::types::config::{Config, DEFAULT_CONFIG_FILE};
use crate::{StmsError, StmsResult};

/// Writes a default configuration file into the target directory.
pub async fn init(path: Option<PathBuf>) -> StmsResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Set the session cookie: export STMS_STAGING_COOKIE='...'");
    println!("  2. Check connectivity: stms-mcp doctor");
    println!("  3. Register with your MCP client: stms-mcp serve");

    Ok(())
}

/// Runs the MCP server over stdio.
pub async fn serve(config: &Config) -> StmsResult<()> {
    use crate::mcp::McpServer;

    if !config.staging.cookie_configured() {
        tracing::warn!("No session cookie configured; authenticated endpoints will reject requests");
    }

    let mut server = McpServer::new(config.clone())?;
    server.run().await
}

/// Prints the tool catalog.
pub fn tools() {
    for tool in Tool::ALL {
        let summary = tool.description().lines().next().unwrap_or_default();
        println!("  {:<30} {}", tool.name(), summary);
    }
    println!();
    println!("{} tools", Tool::ALL.len());
}

/// Invokes a single tool and prints the envelope.
pub async fn call(tool_name: &str, args: &str, config: &Config) -> StmsResult<()> {
    let tool = Tool::from_name(tool_name)
        .ok_or_else(|| StmsError::UnknownTool(tool_name.to_string()))?;

    let arguments: Value = serde_json::from_str(args)
        .map_err(|e| StmsError::invalid_arguments(format!("--args is not valid JSON: {}", e)))?;

    let api = StagingApi::new(Arc::new(config.staging.clone()))?;
    let envelope = tool.call(&api, arguments).await?;

    println!("{}", serde_json::to_string_pretty(&envelope.to_value())?);
    Ok(())
}

/// Checks configuration and staging connectivity.
pub async fn doctor(config: &Config) -> StmsResult<()> {
    println!("Checking stms-mcp configuration...\n");

    let mut issues: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    println!("✓ Configuration loaded");
    println!("  staging url: {}", config.staging.base_url);
    println!("  timeout:     {}s", config.staging.timeout_secs);

    if config.staging.cookie_configured() {
        println!("✓ Session cookie configured");
    } else {
        warnings.push("No session cookie configured".to_string());
    }

    let api = StagingApi::new(Arc::new(config.staging.clone()))?;
    match Tool::HealthCheck.call(&api, Value::Null).await {
        Ok(envelope) => match envelope.status_code() {
            Some(status) if (200..300).contains(&status) => {
                println!("✓ Staging API reachable (HTTP {})", status);
            }
            Some(status) => warnings.push(format!("Health check returned HTTP {}", status)),
            None => warnings.push("Health check returned no status".to_string()),
        },
        Err(e) => issues.push(format!("Staging API unreachable: {}", e)),
    }

    println!();
    if issues.is_empty() && warnings.is_empty() {
        println!("✓ All good! stms-mcp is ready.");
    } else {
        if !warnings.is_empty() {
            println!("Warnings:");
            for warning in warnings {
                println!("  ⚠ {}", warning);
            }
        }
        if !issues.is_empty() {
            println!("Problems:");
            for issue in issues {
                println!("  ✗ {}", issue);
            }
        }
    }

    Ok(())
}

/// Shows version.
pub fn version() {
    println!("stms-mcp {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("MCP adapter for the STMS staging API");
}
