/// Picx
///
/// A small image-sharing web application: users sign up, authenticate,
/// create posts with optional images, browse a feed, and vote/comment on
/// posts. All persistence is delegated to a managed GraphQL API and an
/// S3-compatible object store; this crate is the server-rendered web tier.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for the page routes
/// - `services`: business logic driving the GraphQL and storage calls
/// - `graphql`: operation documents, typed results, and the API client
/// - `storage`: object-store client for image uploads
/// - `auth`: user-pool sign-up/sign-in and session cookies
/// - `render`: HTML page composition
/// - `error`: error types and handling
/// - `config`: configuration management
pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod render;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
