use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;

use assistant_cost::config::Config;
use assistant_cost::pricing::BlendFraction;

/// Execute the config show command
///
/// Displays the effective configuration after defaults, file and environment
/// have been merged
pub fn show(cfg: &Config) -> Result<()> {
    info!("Loading configuration for display");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// `load_config` already rejected invalid values; this prints a summary
pub fn validate(path: &Path, cfg: &Config) {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, built-in defaults)", path.display())
    };

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Source".cyan(), source);
    println!(
        "  {}: {} logs at {}",
        "Logging".cyan(),
        cfg.logging.format,
        cfg.logging.level
    );
    println!(
        "  {}: {} messages/month, {} on premium",
        "Chat".cyan(),
        cfg.chat.usage.messages_per_month(),
        percent(cfg.chat.premium_fraction)
    );
    println!(
        "  {}: {} documents, {} on hi-res",
        "Documents".cyan(),
        cfg.documents.count,
        percent(cfg.documents.hires_fraction)
    );
    println!(
        "  {}: {} images, {} videos, {} captioned on premium",
        "Media".cyan(),
        cfg.images.count,
        cfg.videos.count,
        percent(cfg.captioning.premium_fraction)
    );

    if let Some(delta) = cfg.videos.profile.caption_total_mismatch() {
        println!(
            "  {}: descr_tokens_total differs from frames x per-frame captions by {:+.0} tokens (billed as given)",
            "Note".yellow(),
            delta
        );
    }

    info!("Configuration validation successful");
}

fn percent(fraction: f64) -> String {
    match BlendFraction::new("fraction", fraction) {
        Ok(f) => format!("{:.0}%", f.premium() * 100.0),
        Err(_) => "invalid".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.3), "30%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(1.5), "invalid");
    }
}
