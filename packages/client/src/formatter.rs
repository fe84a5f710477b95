//! Message formatting utilities for client display.

use pixelroom_shared::{
    protocol::{ChatMessageInfo, ErrorInfo, ParticipantInfo, PixelInfo, RoomInfo, RoomSummaryInfo},
    time::{timestamp_to_clock_time, timestamp_to_rfc3339},
};

use crate::canvas::LocalCanvas;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the room list printed by `pixelroom-client rooms`
    pub fn format_room_list(rooms: &[RoomSummaryInfo]) -> String {
        if rooms.is_empty() {
            return "(No rooms)\n".to_string();
        }

        let mut output = String::new();
        for summary in rooms {
            let room = &summary.room;
            output.push_str(&format!(
                "{}  {} ({}x{}) - {} online - created at {}\n",
                room.id,
                room.name,
                room.width,
                room.height,
                summary.participant_count,
                timestamp_to_rfc3339(room.created_at)
            ));
            if !room.description.is_empty() {
                output.push_str(&format!("    {}\n", room.description));
            }
        }
        output
    }

    /// Format the confirmation printed by `pixelroom-client create`
    pub fn format_room_created(room: &RoomInfo) -> String {
        format!(
            "Created room '{}' ({}x{})\nid: {}\n",
            room.name, room.width, room.height, room.id
        )
    }

    /// Format the room-connected message: room, canvas state and participants
    pub fn format_room_connected(
        room: &RoomInfo,
        canvas: &LocalCanvas,
        participants: &[ParticipantInfo],
        current_client_id: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!(
            "Room: {} ({}x{})\n",
            room.name, room.width, room.height
        ));
        if !room.description.is_empty() {
            output.push_str(&format!("{}\n", room.description));
        }
        output.push_str(&format!(
            "Canvas: {} painted pixels at revision {}\n",
            canvas.painted_count(),
            canvas.seq()
        ));
        output.push_str(&Self::format_participants(participants, current_client_id));
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format the participant list
    pub fn format_participants(participants: &[ParticipantInfo], current_client_id: &str) -> String {
        let mut output = String::from("Participants:\n");

        if participants.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for participant in participants {
                let is_me = participant.client_id == current_client_id;
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!(
                    "{}{} - entered at {}\n",
                    participant.client_id,
                    me_suffix,
                    timestamp_to_rfc3339(participant.connected_at)
                ));
            }
        }

        output
    }

    /// Format a participant-joined notification
    pub fn format_participant_joined(client_id: &str, connected_at: i64) -> String {
        format!(
            "\n+ {} entered at {}\n",
            client_id,
            timestamp_to_rfc3339(connected_at)
        )
    }

    /// Format a participant-left notification
    pub fn format_participant_left(client_id: &str, disconnected_at: i64) -> String {
        format!(
            "\n- {} left at {}\n",
            client_id,
            timestamp_to_rfc3339(disconnected_at)
        )
    }

    /// Format a chat message
    pub fn format_chat_message(message: &ChatMessageInfo) -> String {
        format!(
            "\n{}\n@{}: {}\nsent at {}\n{}\n",
            THIN_RULE,
            message.client_id,
            message.content,
            timestamp_to_rfc3339(message.timestamp),
            THIN_RULE
        )
    }

    /// Format chat history received on connect, one line per message
    pub fn format_history(messages: &[ChatMessageInfo]) -> String {
        messages
            .iter()
            .map(|m| {
                format!(
                    "[{}] @{}: {}\n",
                    timestamp_to_clock_time(m.timestamp),
                    m.client_id,
                    m.content
                )
            })
            .collect()
    }

    /// Format a committed pixel write
    ///
    /// `applied` is false when the local canvas already held a newer write.
    pub fn format_pixel_placed(pixel: &PixelInfo, current_client_id: &str, applied: bool) -> String {
        let who = if pixel.author == current_client_id {
            "you".to_string()
        } else {
            pixel.author.clone()
        };
        let stale = if applied { "" } else { " (superseded)" };
        format!(
            "\n* {} painted ({}, {}) {} [#{}]{}\n",
            who, pixel.x, pixel.y, pixel.color, pixel.seq, stale
        )
    }

    /// Format an error event; `rolled_back` is the pending color that was dropped
    pub fn format_error(error: &ErrorInfo, rolled_back: Option<&str>) -> String {
        let mut output = format!("\n! {}: {}\n", error.kind, error.message);
        if let (Some(x), Some(y), Some(color)) = (error.x, error.y, rolled_back) {
            output.push_str(&format!("  rolled back {} at ({}, {})\n", color, x, y));
        }
        output
    }

    /// Format the answer to `/pixel x y`
    pub fn format_pixel(canvas: &LocalCanvas, x: i64, y: i64) -> String {
        if canvas.is_pending(x, y) {
            let color = canvas.color_at(x, y).unwrap_or_default();
            return format!("({}, {}) {} (pending)\n", x, y, color);
        }
        let held = u32::try_from(x)
            .ok()
            .zip(u32::try_from(y).ok())
            .and_then(|(x, y)| canvas.pixel_at(x, y));
        match held {
            Some(pixel) => format!(
                "({}, {}) {} by {} at {}\n",
                x,
                y,
                pixel.color,
                pixel.author,
                timestamp_to_rfc3339(pixel.timestamp)
            ),
            None => format!("({}, {}) unpainted\n", x, y),
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
