//! User-pool client for sign-up and sign-in.
//!
//! Talks the Cognito-style `x-amz-json-1.1` wire shape over the configured
//! user-pool endpoint. Credential storage, confirmation mail, and every
//! other provisioning concern stay inside the provider.
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::AuthConfig;
use crate::error::{AppError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const TARGET_SIGN_UP: &str = "AWSCognitoIdentityProviderService.SignUp";
const TARGET_INITIATE_AUTH: &str = "AWSCognitoIdentityProviderService.InitiateAuth";

/// Tokens returned by a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub expires_in: u64,
}

/// Result of a sign-up request.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    /// False when the pool requires a confirmation step before login.
    pub confirmed: bool,
}

/// Sign-up/sign-in interface handlers depend on, so tests can substitute a
/// scripted implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SignUpOutcome>;

    async fn sign_in(&self, username: &str, password: &str) -> Result<AuthTokens>;
}

/// Client for the configured user pool.
#[derive(Debug, Clone)]
pub struct UserPoolClient {
    http: reqwest::Client,
    endpoint: String,
    client_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    #[serde(default)]
    user_confirmed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default, rename = "__type")]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl UserPoolClient {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.user_pool_endpoint.clone(),
            client_id: config.client_id.clone(),
        })
    }

    async fn call(&self, target: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/x-amz-json-1.1")
            .header("x-amz-target", target)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Malformed response (HTTP {status}): {e}")))?;

        if status.is_success() {
            Ok(raw)
        } else {
            Err(provider_error(raw, status.as_u16()))
        }
    }
}

/// Credential failures render as Unauthorized so the login page keeps the
/// user on the form; everything else is a transport-level failure.
fn provider_error(raw: serde_json::Value, http_status: u16) -> AppError {
    let parsed: ProviderError = serde_json::from_value(raw).unwrap_or(ProviderError {
        error_type: None,
        message: None,
    });

    let message = parsed
        .message
        .unwrap_or_else(|| format!("Identity provider returned HTTP {http_status}"));

    match parsed.error_type.as_deref() {
        Some(t)
            if t.ends_with("NotAuthorizedException")
                || t.ends_with("UserNotFoundException")
                || t.ends_with("UserNotConfirmedException") =>
        {
            AppError::Unauthorized(message)
        }
        Some(t) if t.ends_with("UsernameExistsException") || t.ends_with("InvalidPasswordException") => {
            AppError::Validation(message)
        }
        _ => AppError::Network(message),
    }
}

#[async_trait]
impl IdentityProvider for UserPoolClient {
    async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SignUpOutcome> {
        let raw = self
            .call(
                TARGET_SIGN_UP,
                json!({
                    "ClientId": self.client_id,
                    "Username": username,
                    "Password": password,
                    "UserAttributes": [
                        { "Name": "email", "Value": email }
                    ]
                }),
            )
            .await?;

        let parsed: SignUpResponse = serde_json::from_value(raw)?;
        Ok(SignUpOutcome {
            confirmed: parsed.user_confirmed,
        })
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<AuthTokens> {
        let raw = self
            .call(
                TARGET_INITIATE_AUTH,
                json!({
                    "ClientId": self.client_id,
                    "AuthFlow": "USER_PASSWORD_AUTH",
                    "AuthParameters": {
                        "USERNAME": username,
                        "PASSWORD": password
                    }
                }),
            )
            .await?;

        let parsed: InitiateAuthResponse = serde_json::from_value(raw)?;
        let result = parsed.authentication_result.ok_or_else(|| {
            AppError::Unauthorized("Sign-in requires a challenge this application does not support".into())
        })?;

        Ok(AuthTokens {
            access_token: result.access_token,
            expires_in: result.expires_in,
        })
    }
}
