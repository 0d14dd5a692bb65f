//! Login, sign-up, and logout.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use crate::auth::{clear_session, issue_session, IdentityProvider};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::render::{self, Notice};

use super::{html, see_other};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Please enter a username."))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Passwords must be at least 8 characters."))]
    pub password: String,
}

fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|list| list.iter())
        .filter_map(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .next()
        .unwrap_or_else(|| "Invalid input.".to_string())
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Set by the sign-up redirect to show the success notice once.
    #[serde(default)]
    pub registered: Option<u8>,
    #[serde(default)]
    pub confirm: Option<u8>,
}

/// GET `/login`.
pub async fn login_form(query: web::Query<LoginQuery>) -> HttpResponse {
    let notice = query.registered.is_some().then(|| {
        if query.confirm.is_some() {
            Notice::success("Account created. Confirm your email, then log in.")
        } else {
            Notice::success("Account created. Please log in.")
        }
    });
    html(render::login_page("", notice.as_ref()))
}

/// POST `/login`. Success sets the session cookie and navigates home;
/// failure stays on the form with the provider's message.
pub async fn login(
    form: web::Form<LoginForm>,
    provider: web::Data<dyn IdentityProvider>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    match provider.sign_in(&form.username, &form.password).await {
        Ok(tokens) => {
            // The session never outlives the provider token it carries.
            let ttl = if tokens.expires_in == 0 {
                config.auth.session_ttl_secs
            } else {
                config.auth.session_ttl_secs.min(tokens.expires_in)
            };
            let cookie = issue_session(
                &form.username,
                &tokens.access_token,
                &config.auth.session_secret,
                ttl,
                config.app.is_production(),
            )?;
            info!(username = %form.username, "User signed in");

            let mut response = see_other("/");
            response
                .add_cookie(&cookie)
                .map_err(|e| AppError::Internal(format!("Failed to set session cookie: {e}")))?;
            Ok(response)
        }
        Err(AppError::Unauthorized(message)) | Err(AppError::Validation(message)) => Ok(html(
            render::login_page(&form.username, Some(&Notice::error(message))),
        )),
        Err(err) => {
            error!(error = %err, "Sign-in request failed");
            Ok(html(render::login_page(
                &form.username,
                Some(&Notice::error(err.to_string())),
            )))
        }
    }
}

/// GET `/signup`.
pub async fn signup_form() -> HttpResponse {
    html(render::signup_page("", "", None))
}

/// POST `/signup`. A created account redirects to the login page so a
/// refresh cannot resubmit the form; constraint and provider failures stay
/// on the form.
pub async fn signup(
    form: web::Form<SignupForm>,
    provider: web::Data<dyn IdentityProvider>,
) -> Result<HttpResponse> {
    if let Err(errors) = form.validate() {
        return Ok(html(render::signup_page(
            &form.username,
            &form.email,
            Some(&Notice::error(first_message(&errors))),
        )));
    }

    match provider
        .sign_up(&form.username, &form.email, &form.password)
        .await
    {
        Ok(outcome) => {
            info!(username = %form.username, confirmed = outcome.confirmed, "User signed up");
            let location = if outcome.confirmed {
                "/login?registered=1"
            } else {
                "/login?registered=1&confirm=1"
            };
            Ok(see_other(location))
        }
        Err(err) => {
            error!(error = %err, "Sign-up request failed");
            Ok(html(render::signup_page(
                &form.username,
                &form.email,
                Some(&Notice::error(err.to_string())),
            )))
        }
    }
}

/// POST `/logout`.
pub async fn logout(config: web::Data<Config>) -> Result<HttpResponse> {
    let mut response = see_other("/");
    response
        .add_cookie(&clear_session(config.app.is_production()))
        .map_err(|e| AppError::Internal(format!("Failed to clear session cookie: {e}")))?;
    Ok(response)
}
