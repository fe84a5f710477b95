//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use pixelroom_shared::protocol::{CLOSE_CODE_OVERLOADED, ClientMessage, ErrorKind, ServerMessage};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, Color, MessageContent, RoomId},
    ui::{error::ApiError, state::AppState},
    usecase::{DisconnectError, RoomConnection},
};

use super::parse_room_id;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub client_id: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = parse_room_id(room_id)?;

    // Convert String -> ClientId (Domain Model)
    let client_id = ClientId::try_from(query.client_id.clone()).map_err(|e| {
        tracing::warn!("Invalid client_id format: '{}'", query.client_id);
        ApiError::from(e)
    })?;

    // Bounded queue for this subscriber; the pusher drops it when full
    let (tx, rx) = mpsc::channel(state.config.queue_capacity());

    // register_client is called inside the UseCase
    let connection = state
        .usecases
        .connect_participant
        .execute(&room_id, client_id.clone(), tx)
        .await
        .map_err(|e| {
            tracing::warn!(
                "Rejecting connection of '{}' to room {}: {}",
                client_id.as_str(),
                room_id,
                e
            );
            ApiError::from(e)
        })?;

    let failed_state = state.clone();
    let failed_room_id = room_id.clone();
    let failed_client_id = client_id.clone();

    Ok(ws
        .on_failed_upgrade(move |e| {
            tracing::warn!("WebSocket upgrade failed: {}", e);
            tokio::spawn(async move {
                disconnect(&failed_state, &failed_room_id, &failed_client_id).await;
            });
        })
        .on_upgrade(move |socket| handle_socket(socket, state, room_id, client_id, rx, connection)))
}

/// Spawns a task that forwards the subscriber queue to the WebSocket.
///
/// The queue ends when the pusher drops this subscriber for falling behind;
/// the socket is then closed with `CLOSE_CODE_OVERLOADED`.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    client_id: ClientId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }

        tracing::warn!(
            "Closing connection of '{}': {}",
            client_id.as_str(),
            ErrorKind::SubscriberOverloaded
        );
        let frame = CloseFrame {
            code: CLOSE_CODE_OVERLOADED,
            reason: ErrorKind::SubscriberOverloaded.as_str().into(),
        };
        let _ = sender.send(Message::Close(Some(frame))).await;
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room_id: RoomId,
    client_id: ClientId,
    rx: mpsc::Receiver<String>,
    connection: RoomConnection,
) {
    let (mut sender, receiver) = socket.split();

    // room-connected goes out before anything queued since subscribing
    let room_connected = ServerMessage::RoomConnected {
        room: connection.room.into(),
        snapshot: connection.snapshot.into(),
        messages: connection.messages.into_iter().map(Into::into).collect(),
        participants: connection.participants.into_iter().map(Into::into).collect(),
    };
    let sent = match serde_json::to_string(&room_connected) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize room-connected: {}", e);
            false
        }
    };
    if !sent {
        tracing::error!("Failed to send room-connected to '{}'", client_id.as_str());
        disconnect(&state, &room_id, &client_id).await;
        return;
    }
    tracing::info!("Sent room-connected to '{}'", client_id.as_str());

    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        room_id.clone(),
        client_id.clone(),
    ));
    let mut send_task = pusher_loop(rx, sender, client_id.clone());

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    disconnect(&state, &room_id, &client_id).await;
}

async fn disconnect(state: &AppState, room_id: &RoomId, client_id: &ClientId) {
    match state
        .usecases
        .disconnect_participant
        .execute(room_id, client_id)
        .await
    {
        Ok(_) => {
            tracing::info!("Client '{}' disconnected", client_id.as_str());
        }
        Err(DisconnectError::NotConnected(_)) => {
            tracing::debug!("Client '{}' was already removed", client_id.as_str());
        }
        Err(e) => {
            tracing::warn!(
                "Failed to disconnect participant '{}': {}",
                client_id.as_str(),
                e
            );
        }
    }
}

/// Reads commands from the client until it closes the connection.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    room_id: RoomId,
    client_id: ClientId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", client_id.as_str(), text);

                let outcome = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(command) => handle_command(&state, &room_id, &client_id, command).await,
                    Err(e) => Err((ApiError::new(ErrorKind::InvalidRequest, e.to_string()), None)),
                };

                if let Err((error, cell)) = outcome {
                    reply_error(&state, &room_id, &client_id, error, cell).await;
                }
            }
            Message::Ping(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                tracing::debug!("Received ping");
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", client_id.as_str());
                break;
            }
            _ => {}
        }
    }
}

type CommandError = (ApiError, Option<(i64, i64)>);

async fn handle_command(
    state: &AppState,
    room_id: &RoomId,
    client_id: &ClientId,
    command: ClientMessage,
) -> Result<(), CommandError> {
    match command {
        ClientMessage::PlacePixel { x, y, color } => {
            let cell = Some((x, y));
            let color = Color::try_from(color).map_err(|e| (ApiError::from(e), cell))?;
            state
                .usecases
                .place_pixel
                .execute(room_id, x, y, color, client_id.clone())
                .await
                .map_err(|e| (ApiError::from(e), cell))?;
        }
        ClientMessage::Chat { content } => {
            let content =
                MessageContent::try_from(content).map_err(|e| (ApiError::from(e), None))?;
            state
                .usecases
                .post_message
                .execute(room_id, client_id.clone(), content)
                .await
                .map_err(|e| (ApiError::from(e), None))?;
        }
    }
    Ok(())
}

/// Sends an `error` event to one subscriber through its queue.
async fn reply_error(
    state: &AppState,
    room_id: &RoomId,
    client_id: &ClientId,
    error: ApiError,
    cell: Option<(i64, i64)>,
) {
    tracing::debug!(
        "Rejected command from '{}': {} ({})",
        client_id.as_str(),
        error.kind(),
        error.message()
    );

    let event = ServerMessage::Error(error.into_error_info(cell));
    let json = match serde_json::to_string(&event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize error event: {}", e);
            return;
        }
    };

    if let Err(e) = state
        .usecases
        .message_pusher
        .push_to(room_id, client_id, &json)
        .await
    {
        tracing::warn!("Failed to send error to '{}': {}", client_id.as_str(), e);
    }
}
