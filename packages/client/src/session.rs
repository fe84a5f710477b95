//! Client session state machine.
//!
//! A session is `Disconnected` until the server's `room-connected` frame
//! arrives, then `Viewing` a room until the connection ends. Pixel
//! placements are applied to the local canvas optimistically and rolled
//! back if the server answers with an error for the same cell.

use pixelroom_shared::protocol::{
    ChatMessageInfo, ClientMessage, ErrorInfo, ParticipantInfo, RoomInfo, ServerMessage,
};

use crate::{canvas::LocalCanvas, error::ClientError, formatter::MessageFormatter, ui};

/// Everything known about the room being viewed
#[derive(Debug, Clone)]
pub struct RoomView {
    pub room: RoomInfo,
    pub canvas: LocalCanvas,
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Viewing(Box<RoomView>),
}

/// Session of one client id
#[derive(Debug)]
pub struct Session {
    client_id: String,
    state: SessionState,
}

impl Session {
    pub fn new(client_id: String) -> Self {
        Self {
            client_id,
            state: SessionState::Disconnected,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.state, SessionState::Viewing(_))
    }

    pub fn room_name(&self) -> Option<&str> {
        self.view().map(|view| view.room.name.as_str())
    }

    pub fn prompt(&self) -> String {
        ui::prompt(&self.client_id, self.room_name())
    }

    fn view(&self) -> Option<&RoomView> {
        match &self.state {
            SessionState::Viewing(view) => Some(view),
            SessionState::Disconnected => None,
        }
    }

    fn view_mut(&mut self) -> Option<&mut RoomView> {
        match &mut self.state {
            SessionState::Viewing(view) => Some(view),
            SessionState::Disconnected => None,
        }
    }

    /// Apply a server event and return the text to print, if any.
    ///
    /// Events other than `room-connected` are ignored while disconnected.
    pub fn handle_event(&mut self, event: ServerMessage) -> Option<String> {
        match event {
            ServerMessage::RoomConnected {
                room,
                snapshot,
                messages,
                participants,
            } => Some(self.enter_room(
                room,
                LocalCanvas::from_snapshot(snapshot),
                messages,
                participants,
            )),
            ServerMessage::PixelPlaced(pixel) => {
                let client_id = self.client_id.clone();
                let view = self.view_mut()?;
                let applied = view.canvas.apply(pixel.clone(), &client_id);
                Some(MessageFormatter::format_pixel_placed(
                    &pixel, &client_id, applied,
                ))
            }
            ServerMessage::Chat(message) => {
                self.view()?;
                Some(MessageFormatter::format_chat_message(&message))
            }
            ServerMessage::ParticipantJoined(participant) => {
                let view = self.view_mut()?;
                let output = MessageFormatter::format_participant_joined(
                    &participant.client_id,
                    participant.connected_at,
                );
                if !view
                    .participants
                    .iter()
                    .any(|p| p.client_id == participant.client_id)
                {
                    view.participants.push(participant);
                    view.participants
                        .sort_by(|a, b| a.client_id.cmp(&b.client_id));
                }
                Some(output)
            }
            ServerMessage::ParticipantLeft {
                client_id,
                disconnected_at,
            } => {
                let view = self.view_mut()?;
                view.participants.retain(|p| p.client_id != client_id);
                Some(MessageFormatter::format_participant_left(
                    &client_id,
                    disconnected_at,
                ))
            }
            ServerMessage::Error(error) => Some(self.handle_error(error)),
        }
    }

    fn enter_room(
        &mut self,
        room: RoomInfo,
        canvas: LocalCanvas,
        messages: Vec<ChatMessageInfo>,
        participants: Vec<ParticipantInfo>,
    ) -> String {
        let mut output = MessageFormatter::format_room_connected(
            &room,
            &canvas,
            &participants,
            &self.client_id,
        );
        output.push_str(&MessageFormatter::format_history(&messages));
        self.state = SessionState::Viewing(Box::new(RoomView {
            room,
            canvas,
            participants,
        }));
        output
    }

    fn handle_error(&mut self, error: ErrorInfo) -> String {
        let rolled_back = match (error.x, error.y, self.view_mut()) {
            (Some(x), Some(y), Some(view)) => view.canvas.rollback(x, y),
            _ => None,
        };
        MessageFormatter::format_error(&error, rolled_back.as_deref())
    }

    /// Record an optimistic write and build the command to send
    pub fn place_pixel(
        &mut self,
        x: i64,
        y: i64,
        color: String,
    ) -> Result<ClientMessage, ClientError> {
        let view = self.view_mut().ok_or(ClientError::NotViewing)?;
        view.canvas.place_pending(x, y, color.clone());
        Ok(ClientMessage::PlacePixel { x, y, color })
    }

    pub fn chat(&self, content: String) -> Result<ClientMessage, ClientError> {
        self.view().ok_or(ClientError::NotViewing)?;
        Ok(ClientMessage::Chat { content })
    }

    /// Describe one cell of the local canvas
    pub fn describe_pixel(&self, x: i64, y: i64) -> Result<String, ClientError> {
        let view = self.view().ok_or(ClientError::NotViewing)?;
        Ok(MessageFormatter::format_pixel(&view.canvas, x, y))
    }

    pub fn describe_participants(&self) -> Result<String, ClientError> {
        let view = self.view().ok_or(ClientError::NotViewing)?;
        Ok(MessageFormatter::format_participants(
            &view.participants,
            &self.client_id,
        ))
    }

    /// Drop the room view. Pending writes are discarded with it.
    pub fn disconnect(&mut self) {
        self.state = SessionState::Disconnected;
    }
}
