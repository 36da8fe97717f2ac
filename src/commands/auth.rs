use owo_colors::OwoColorize;
use secrecy::SecretString;
use serde_json::json;

use super::interactive::prompt_text;
use super::print_json;
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{CentreError, Result};

/// Log in and persist the session token
pub async fn cmd_login(email: &str, password: Option<String>, json: bool) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CentreError::InvalidInput("email is required".to_string()));
    }

    let mut config = Config::load()?;
    let client = ApiClient::new(config.api_base_url()?, config.request_timeout())?;

    let password = match password {
        Some(p) => p,
        None => prompt_text("Password", None)?,
    };
    let password = SecretString::from(password);

    let token = match client.login(email, &password).await {
        Ok(token) => token,
        Err(CentreError::Unauthorized) => {
            return Err(CentreError::Rejected(
                "invalid email or password".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    config.set_session(email.to_string(), token);
    config.save()?;
    tracing::info!(email, "logged in");

    if json {
        print_json(&json!({ "logged_in": true, "email": email }))?;
    } else {
        println!("{} Logged in as {}", "✓".green(), email.cyan());
    }
    Ok(())
}

/// Forget the stored session token
pub fn cmd_logout(json: bool) -> Result<()> {
    let mut config = Config::load()?;
    let had_session = config.auth.access_token.is_some();
    config.clear_session();
    config.save()?;

    if json {
        print_json(&json!({ "logged_out": had_session }))?;
    } else if had_session {
        println!("Logged out");
    } else {
        println!("{}", "Not logged in".dimmed());
    }
    Ok(())
}
