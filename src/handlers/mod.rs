/// HTTP handlers for Picx
///
/// - `home`: the feed page
/// - `create`: the compose form and submission
/// - `post_detail`: single post, comments, and votes
/// - `auth`: login, sign-up, and logout
/// - `health`: liveness endpoint
use actix_web::http::header::ContentType;
use actix_web::{http::header, HttpResponse};

pub mod auth;
pub mod create;
pub mod health;
pub mod home;
pub mod post_detail;

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}
