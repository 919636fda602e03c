mod config;
mod errors;
mod handlers;
mod models;
mod services;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{config::Config, services::Store};

// API routes, shared between main and the router-level tests.
fn api_router() -> Router<Store> {
    Router::new()
        // Auth routes
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        // Task routes
        .route(
            "/api/tasks",
            get(handlers::list_all_tasks).post(handlers::create_task),
        )
        .route("/api/tasks/complete/:id", put(handlers::set_task_completion))
        .route(
            "/api/tasks/:id",
            get(handlers::list_user_tasks)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
}

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Connect to the relational store and make sure the schema exists
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    let store = Store::new(pool);
    store
        .init_schema()
        .await
        .expect("Failed to initialize schema");

    // Create router with all routes; anything outside /api falls through to
    // the static single-page client
    let app = api_router()
        .fallback_service(ServeDir::new(&config.client.dir))
        .layer(CorsLayer::permissive())
        .with_state(store);

    println!("Server running");
    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        config.server.host, config.server.port
    ))
    .await
    .expect("Failed to bind server");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
