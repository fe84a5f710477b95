//! pixelroom server.
//!
//! Hosts rooms of shared pixel canvases and pushes every committed pixel and
//! chat message to the viewers of the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pixelroom-server
//! cargo run --bin pixelroom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use pixelroom_server::{
    config::{
        DEFAULT_HOST, DEFAULT_MAX_RECENT_MESSAGES, DEFAULT_PORT,
        DEFAULT_SUBSCRIBER_QUEUE_CAPACITY, ServerConfig,
    },
    domain::{DEFAULT_PARTICIPANT_CAPACITY, DimensionLimits},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::UseCases,
};
use pixelroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "pixelroom-server")]
#[command(about = "Collaborative pixel canvas server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Smallest accepted canvas width/height
    #[arg(long, default_value_t = DimensionLimits::default().min)]
    min_dimension: u32,

    /// Largest accepted canvas width/height
    #[arg(long, default_value_t = DimensionLimits::default().max)]
    max_dimension: u32,

    /// Events buffered per subscriber before it is disconnected
    #[arg(long, default_value_t = DEFAULT_SUBSCRIBER_QUEUE_CAPACITY)]
    subscriber_queue_capacity: usize,

    /// Maximum number of participants per room
    #[arg(long, default_value_t = DEFAULT_PARTICIPANT_CAPACITY)]
    max_participants: usize,

    /// Upper bound for the number of messages returned by one query
    #[arg(long, default_value_t = DEFAULT_MAX_RECENT_MESSAGES)]
    max_recent_messages: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            dimension_limits: DimensionLimits {
                min: args.min_dimension,
                max: args.max_dimension,
            },
            subscriber_queue_capacity: args.subscriber_queue_capacity,
            max_participants: args.max_participants,
            max_recent_messages: args.max_recent_messages,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());
    if config.dimension_limits.min > config.dimension_limits.max {
        tracing::error!(
            "--min-dimension ({}) must not exceed --max-dimension ({})",
            config.dimension_limits.min,
            config.dimension_limits.max
        );
        std::process::exit(1);
    }

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server
    let repository = Arc::new(InMemoryRoomRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let usecases = UseCases::new(
        repository,
        message_pusher,
        Arc::new(SystemClock),
        &config,
    );

    let server = Server::new(usecases, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
