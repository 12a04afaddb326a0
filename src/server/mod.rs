//! Planner development server
//!
//! An in-memory implementation of the planner REST surface, built with Axum,
//! so the client and CLI can run end to end without the production backend.
//! Nothing is persisted.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/auth/register` - Create an account
//! - `POST /api/auth/login` - Form login, returns a bearer token
//! - `GET /api/auth/me` - Current user
//!
//! ## Entities (bearer token required)
//! - `GET|POST /api/courses/`, `GET|PUT|DELETE /api/courses/:id`
//! - `GET|POST /api/assignments/`, `GET|PUT|DELETE /api/assignments/:id`
//! - `PATCH /api/assignments/:id/complete` - Flip completion
//! - `GET|POST /api/schedules/`, `GET|PUT|DELETE /api/schedules/:id`
//!
//! ## Chat
//! - `POST /api/chat/` - Planning assistant
//!
//! ## Health
//! - `GET /health`

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{ServerError, ServerResult};
pub use state::{AppState, CurrentUser};
pub use store::Store;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/me", get(routes::auth::me));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        // Courses
        .route(
            "/courses/",
            get(routes::courses::list_courses).post(routes::courses::create_course),
        )
        .route(
            "/courses/:id",
            get(routes::courses::get_course)
                .put(routes::courses::update_course)
                .delete(routes::courses::delete_course),
        )
        // Assignments
        .route(
            "/assignments/",
            get(routes::assignments::list_assignments)
                .post(routes::assignments::create_assignment),
        )
        .route(
            "/assignments/:id",
            get(routes::assignments::get_assignment)
                .put(routes::assignments::update_assignment)
                .delete(routes::assignments::delete_assignment),
        )
        .route(
            "/assignments/:id/complete",
            patch(routes::assignments::toggle_complete),
        )
        // Schedules
        .route(
            "/schedules/",
            get(routes::schedules::list_schedules).post(routes::schedules::create_schedule),
        )
        .route(
            "/schedules/:id",
            get(routes::schedules::get_schedule)
                .put(routes::schedules::update_schedule)
                .delete(routes::schedules::delete_schedule),
        )
        // Chat
        .route("/chat/", post(routes::chat::send_message));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind to the configured address and serve until Ctrl+C / SIGTERM
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Planner dev server listening on {}", addr);
    serve_on(listener, state, shutdown_signal()).await?;

    tracing::info!("Planner dev server shut down gracefully");
    Ok(())
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), ServerError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind an ephemeral local port and serve in the background.
///
/// Returns the bound address; the server runs until the runtime shuts down.
pub async fn spawn_local(state: AppState) -> Result<SocketAddr, ServerError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = serve_on(listener, state, std::future::pending()).await {
            tracing::error!(error = %e, "Dev server stopped");
        }
    });

    tracing::debug!(%addr, "Dev server spawned");
    Ok(addr)
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
