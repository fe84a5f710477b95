//! One WebSocket connection to a room.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use pixelroom_shared::protocol::{CLOSE_CODE_OVERLOADED, ClientMessage, ServerMessage};
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::CloseFrame, protocol::Message},
};

use crate::{
    command::{HELP, InputCommand, parse_input},
    domain::handshake_error,
    error::ClientError,
    formatter::MessageFormatter,
    session::Session,
    ui::redisplay_prompt,
};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run one connection until the user quits (`Ok`) or the connection ends (`Err`)
pub async fn run_room_connection(
    url: &str,
    room_id: &str,
    session: &Arc<Mutex<Session>>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let client_id = session.lock().await.client_id().to_string();

    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Http(response) => {
            handshake_error(response.status().as_u16(), room_id, &client_id)
        }
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to room '{}'", room_id);
    println!(
        "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
        client_id
    );

    let (mut write, mut read) = ws_stream.split();

    let result = loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let output = match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(event) => session.lock().await.handle_event(event),
                        Err(_) => Some(MessageFormatter::format_raw_message(&text)),
                    };
                    if let Some(output) = output {
                        print_event(session, &output).await;
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    print_event(session, &MessageFormatter::format_binary_message(data.len()))
                        .await;
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!("Server closed the connection");
                    break Err(close_error(frame));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                None => {
                    break Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
            },
            line = input_rx.recv() => match line {
                Some(line) => match handle_input(&line, session, &mut write).await {
                    Ok(InputOutcome::Continue) => {}
                    Ok(InputOutcome::Quit) => {
                        write.send(Message::Close(None)).await.ok();
                        break Ok(());
                    }
                    Err(e) => break Err(e),
                },
                // Readline ended (Ctrl+C or Ctrl+D)
                None => {
                    write.send(Message::Close(None)).await.ok();
                    break Ok(());
                }
            },
        }
    };

    session.lock().await.disconnect();
    result
}

async fn print_event(session: &Arc<Mutex<Session>>, output: &str) {
    print!("{}", output);
    redisplay_prompt(&session.lock().await.prompt());
}

fn close_error(frame: Option<CloseFrame>) -> ClientError {
    match frame {
        Some(frame) if u16::from(frame.code) == CLOSE_CODE_OVERLOADED => {
            ClientError::SubscriberOverloaded(frame.reason.as_str().to_string())
        }
        _ => ClientError::ConnectionError("Server closed the connection".to_string()),
    }
}

enum InputOutcome {
    Continue,
    Quit,
}

/// Execute one line of user input. Only send failures are returned as errors.
async fn handle_input(
    line: &str,
    session: &Arc<Mutex<Session>>,
    write: &mut WsSink,
) -> Result<InputOutcome, ClientError> {
    let command = match parse_input(line) {
        Ok(command) => command,
        Err(usage) => {
            println!("{}", usage);
            return Ok(InputOutcome::Continue);
        }
    };

    let mut session = session.lock().await;
    let outgoing = match command {
        InputCommand::Place { x, y, color } => session.place_pixel(x, y, color),
        InputCommand::Chat(content) => session.chat(content),
        InputCommand::Inspect { x, y } => {
            print_local(session.describe_pixel(x, y));
            return Ok(InputOutcome::Continue);
        }
        InputCommand::Who => {
            print_local(session.describe_participants());
            return Ok(InputOutcome::Continue);
        }
        InputCommand::Help => {
            println!("{}", HELP);
            return Ok(InputOutcome::Continue);
        }
        InputCommand::Quit => return Ok(InputOutcome::Quit),
    };
    drop(session);

    match outgoing {
        Ok(message) => send(write, &message).await?,
        Err(e) => println!("{}", e),
    }
    Ok(InputOutcome::Continue)
}

fn print_local(result: Result<String, ClientError>) {
    match result {
        Ok(text) => print!("{}", text),
        Err(e) => println!("{}", e),
    }
}

async fn send(write: &mut WsSink, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(format!("Failed to serialize command: {}", e)))?;

    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send command: {}", e);
        ClientError::ConnectionError("Connection lost".to_string())
    })
}
