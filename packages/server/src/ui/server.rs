//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, usecase::UseCases};

use super::{
    handler::{
        create_room, get_recent_messages, get_room_detail, get_rooms, get_snapshot, health_check,
        place_pixel, post_message, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Shared canvas server
///
/// # Example
///
/// ```ignore
/// let usecases = UseCases::new(repository, message_pusher, clock, &config);
/// let server = Server::new(usecases, config);
/// server.run().await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(usecases: UseCases, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(AppState { usecases, config }),
        }
    }

    /// Build the router with all HTTP and WebSocket endpoints
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms).post(create_room))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .route("/api/rooms/{room_id}/snapshot", get(get_snapshot))
            .route("/api/rooms/{room_id}/pixels", post(place_pixel))
            .route(
                "/api/rooms/{room_id}/messages",
                get(get_recent_messages).post(post_message),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured host and port until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", self.state.config.host, self.state.config.port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("pixelroom server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/{{room_id}}?client_id=<id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
