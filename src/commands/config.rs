//! `config show|get|set`

use owo_colors::OwoColorize;
use serde_json::json;

use super::print_json;
use crate::config::Config;
use crate::error::Result;
use crate::paths::config_path;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(json: bool) -> Result<()> {
    let config = Config::load()?;
    let logged_in = config.access_token().is_some();

    if json {
        return print_json(&json!({
            "api_base_url": config.api_base_url.clone(),
            "request_timeout": config.request_timeout,
            "poll_interval": config.poll_interval,
            "page_size": config.page_size,
            "auto_refresh": config.auto_refresh,
            "auth": {
                "logged_in": logged_in,
                "email": config.auth.email.clone(),
            },
            "config_file": config_path().to_string_lossy(),
        }));
    }

    println!("{}\n", "Configuration:".cyan().bold());
    let base_url = match &config.api_base_url {
        Some(url) => url.clone(),
        None => "not configured".dimmed().to_string(),
    };
    println!("{}: {}", "api_base_url".cyan(), base_url);
    println!("{}: {}s", "request_timeout".cyan(), config.request_timeout);
    println!("{}: {}s", "poll_interval".cyan(), config.poll_interval);
    println!("{}: {}", "page_size".cyan(), config.page_size);
    println!("{}: {}", "auto_refresh".cyan(), config.auto_refresh);
    println!();

    println!("{}:", "auth".cyan());
    match (&config.auth.access_token, logged_in) {
        (Some(token), _) => println!("  token: {}", mask_sensitive_value(token).green()),
        (None, true) => println!("  token: {}", "from environment".green()),
        (None, false) => println!("  token: {}", "not logged in".dimmed()),
    }
    if let Some(email) = &config.auth.email {
        println!("  email: {email}");
    }
    println!();
    println!("{}: {}", "Config file".dimmed(), config_path().display());
    Ok(())
}

/// Print one configuration value
pub fn cmd_config_get(key: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;
    if json {
        print_json(&json!({ "key": key, "value": value }))
    } else {
        println!("{value}");
        Ok(())
    }
}

/// Validate and store one configuration value
pub fn cmd_config_set(key: &str, value: &str, json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    if json {
        print_json(&json!({ "key": key, "value": stored, "action": "config_set" }))
    } else {
        println!("Set {} = {}", key.cyan(), stored);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_sensitive_value() {
        assert_eq!(mask_sensitive_value("abcdefgh"), "ab...gh");
        assert_eq!(mask_sensitive_value("abcd"), "****");
    }
}
