use anyhow::Result;
use colored::Colorize;
use reqlog_dash::config::Config;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration (defaults, file and environment merged)
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying effective configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary
pub fn validate(cfg: &Config, path: &Path) -> Result<()> {
    info!(path = %path.display(), "Configuration validation successful");

    let file_note = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "File".cyan(), file_note);
    println!("  {}: {}", "Endpoint".cyan(), cfg.source.endpoint);
    println!(
        "  {}: {} (backoff {}ms, max {}ms)",
        "Retries".cyan(),
        cfg.source.retry,
        cfg.source.retry_delay_ms,
        cfg.source.max_retry_delay_ms
    );
    println!("  {}: {}s", "Timeout".cyan(), cfg.source.timeout_seconds);
    println!(
        "  {}: {}",
        "On failure".cyan(),
        if cfg.source.fallback_on_error {
            "use sample data".yellow()
        } else {
            "show error".red()
        }
    );
    println!("  {}: {}", "Log Level".cyan(), cfg.logging.level);

    Ok(())
}
