//! Parsing of lines typed at the prompt.

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// `/place <x> <y> <#RRGGBB>`
    Place { x: i64, y: i64, color: String },
    /// `/pixel <x> <y>`
    Inspect { x: i64, y: i64 },
    /// `/who`
    Who,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Anything not starting with `/`
    Chat(String),
}

pub const HELP: &str = "\
Commands:
  /place <x> <y> <#RRGGBB>  paint a pixel
  /pixel <x> <y>            show a pixel
  /who                      list participants
  /quit                     leave the room
Anything else is sent as a chat message.";

/// Parse one input line. Errors carry a usage hint.
pub fn parse_input(line: &str) -> Result<InputCommand, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(InputCommand::Chat(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("place", [x, y, color]) => Ok(InputCommand::Place {
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
            color: color.to_string(),
        }),
        ("place", _) => Err("usage: /place <x> <y> <#RRGGBB>".to_string()),
        ("pixel", [x, y]) => Ok(InputCommand::Inspect {
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
        }),
        ("pixel", _) => Err("usage: /pixel <x> <y>".to_string()),
        ("who", []) => Ok(InputCommand::Who),
        ("help", _) => Ok(InputCommand::Help),
        ("quit" | "exit", []) => Ok(InputCommand::Quit),
        _ => Err(format!("unknown command '/{}', try /help", name)),
    }
}

fn parse_coordinate(value: &str) -> Result<i64, String> {
    value
        .parse()
        .map_err(|_| format!("'{}' is not a coordinate", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place() {
        // テスト項目: /place コマンドが座標と色に分解される
        // given (前提条件):
        let line = "/place 3 -1 #FF0000";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(InputCommand::Place {
                x: 3,
                y: -1,
                color: "#FF0000".to_string()
            })
        );
    }

    #[test]
    fn test_parse_place_with_missing_arguments() {
        // テスト項目: 引数が足りない /place は使い方を返す
        // given (前提条件):
        let line = "/place 3";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert!(result.unwrap_err().starts_with("usage: /place"));
    }

    #[test]
    fn test_parse_chat() {
        // テスト項目: スラッシュで始まらない行はチャットになる
        // given (前提条件):
        let line = "  hello there ";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert_eq!(result, Ok(InputCommand::Chat("hello there".to_string())));
    }

    #[test]
    fn test_parse_unknown_command() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件) / when (操作):
        let result = parse_input("/dance");

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_coordinate() {
        // テスト項目: 数値でない座標はエラーになる
        // given (前提条件) / when (操作):
        let result = parse_input("/pixel a 1");

        // then (期待する結果):
        assert_eq!(result, Err("'a' is not a coordinate".to_string()));
    }
}
