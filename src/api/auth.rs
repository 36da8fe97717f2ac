//! Operator login

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::{CentreError, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    email_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    #[serde(default)]
    access_token: Option<AccessToken>,
}

#[derive(Debug, Default, Deserialize)]
struct AccessToken {
    #[serde(default)]
    access_token: Option<String>,
}

impl ApiClient {
    /// `POST /customers/action/ops-login`, returning the session token
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<String> {
        let body = LoginBody {
            email_id: email,
            password: password.expose_secret(),
        };
        let data: Option<LoginData> = self.post("/customers/action/ops-login", &body).await?;

        data.and_then(|d| d.access_token)
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CentreError::Rejected("Login failed!".to_string()))
    }
}
