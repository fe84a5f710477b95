//! Terminal client for pixelroom.
//!
//! Lists and creates rooms over HTTP, and joins a room over WebSocket to
//! paint pixels and chat. Joined sessions reconnect automatically on
//! connection loss (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pixelroom-client -- rooms
//! cargo run --bin pixelroom-client -- create "Sketch" --width 64 --height 32
//! cargo run --bin pixelroom-client -- join <room-id> -c alice
//! ```

use clap::{Parser, Subcommand};

use pixelroom_client::{api::ApiClient, error::ClientError, formatter::MessageFormatter};
use pixelroom_shared::{logger::setup_logger, protocol::CreateRoomRequest};

#[derive(Parser, Debug)]
#[command(name = "pixelroom-client")]
#[command(about = "Terminal client for collaborative pixel canvases", long_about = None)]
struct Args {
    /// Server base URL
    #[arg(short = 's', long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List rooms, newest first
    Rooms,
    /// Create a room
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 64)]
        width: i64,
        #[arg(long, default_value_t = 64)]
        height: i64,
    },
    /// Join a room to paint and chat
    Join {
        room_id: String,
        /// Client ID (must be unique within the room)
        #[arg(short = 'c', long)]
        client_id: String,
    },
}

async fn run(args: Args) -> Result<(), ClientError> {
    let api = ApiClient::new(&args.server);

    match args.command {
        Command::Rooms => {
            let rooms = api.list_rooms().await?;
            print!("{}", MessageFormatter::format_room_list(&rooms));
        }
        Command::Create {
            name,
            description,
            width,
            height,
        } => {
            let room = api
                .create_room(&CreateRoomRequest {
                    name,
                    description,
                    width,
                    height,
                })
                .await?;
            print!("{}", MessageFormatter::format_room_created(&room));
        }
        Command::Join { room_id, client_id } => {
            pixelroom_client::run_client(&api, room_id, client_id).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
