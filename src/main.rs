use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use picx::auth::{IdentityProvider, UserPoolClient};
use picx::graphql::{ApiClient, GraphApi};
use picx::handlers;
use picx::storage::{self, ObjectStore};
use picx::Config;

/// Picx
///
/// A server-rendered image-sharing application. All persistence lives
/// behind a managed GraphQL API, an S3-compatible object store, and a
/// user-pool identity provider; this binary is the stateless web tier.
///
/// # Routes
///
/// - `/` - the post feed
/// - `/create` - compose form and submission
/// - `/post/{id}` - single post, plus `/comment` and `/vote` actions
/// - `/login`, `/signup`, `/logout` - account flows
/// - `/health` - liveness endpoint

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting picx v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("GraphQL endpoint: {}", config.api.endpoint);

    let api_client = ApiClient::new(&config.api)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let object_store = storage::connect(&config.storage).await;
    // Image uploads will fail loudly per request; an unreachable bucket at
    // boot is only a warning so local work without storage stays possible.
    if let Err(e) = object_store.health_check().await {
        tracing::warn!("Object store health check failed: {}", e);
    }

    let user_pool = UserPoolClient::new(&config.auth)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let api_data: web::Data<dyn GraphApi> = web::Data::from(Arc::new(api_client) as Arc<dyn GraphApi>);
    let store_data: web::Data<dyn ObjectStore> =
        web::Data::from(Arc::new(object_store) as Arc<dyn ObjectStore>);
    let provider_data: web::Data<dyn IdentityProvider> =
        web::Data::from(Arc::new(user_pool) as Arc<dyn IdentityProvider>);
    let config_data = web::Data::new(config.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(api_data.clone())
            .app_data(store_data.clone())
            .app_data(provider_data.clone())
            .app_data(config_data.clone())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(handlers::health::health_check))
            .route("/", web::get().to(handlers::home::index))
            .route("/create", web::get().to(handlers::create::form))
            .route("/create", web::post().to(handlers::create::submit))
            .route("/post/{id}", web::get().to(handlers::post_detail::show))
            .route(
                "/post/{id}/comment",
                web::post().to(handlers::post_detail::comment),
            )
            .route(
                "/post/{id}/vote",
                web::post().to(handlers::post_detail::vote),
            )
            .route("/login", web::get().to(handlers::auth::login_form))
            .route("/login", web::post().to(handlers::auth::login))
            .route("/signup", web::get().to(handlers::auth::signup_form))
            .route("/signup", web::post().to(handlers::auth::signup))
            .route("/logout", web::post().to(handlers::auth::logout))
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
