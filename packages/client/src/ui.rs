//! Terminal prompt helpers.

use std::io::Write;

/// Prompt for the current state: `alice@Sketch> ` while viewing, `alice> ` otherwise
pub fn prompt(client_id: &str, room_name: Option<&str>) -> String {
    match room_name {
        Some(room) => format!("{}@{}> ", client_id, room),
        None => format!("{}> ", client_id),
    }
}

/// Redisplay the prompt after printing a server event
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}
