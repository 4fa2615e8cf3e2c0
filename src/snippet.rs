//! Snippet construction for the insert command.
//!
//! The editor invokes `workspace/executeCommand` with the chosen query and
//! the active cursor positions it gathered; the server answers with the
//! snippet body and one insertion per cursor for the client's snippet API
//! to apply. Tab stop 1 is the bot identifier, tab stop 2 the handler
//! parameter list, and `$0` the final cursor inside the handler body.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tower_lsp::lsp_types::Position;

/// Errors surfaced by the insert command. Fatal for the invocation; the
/// client shows them to the user and nothing is retried.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("trying to insert empty query")]
    EmptyQuery,
    #[error("invalid cursor positions: {0}")]
    InvalidPositions(String),
}

/// One snippet insertion the client applies at a cursor position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetInsertion {
    pub position: Position,
}

/// Response of the `filterQueries.insert` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertCommandResponse {
    pub snippet: String,
    pub insertions: Vec<SnippetInsertion>,
}

/// Builds the handler-registration snippet for `query`, verbatim.
pub fn insert_snippet(query: &str) -> Result<String, SnippetError> {
    if query.is_empty() {
        return Err(SnippetError::EmptyQuery);
    }
    Ok(format!(
        "${{1:bot}}.on(\"{query}\", (${{2:ctx, next}}) => {{\n$0\n}}"
    ))
}

/// Decodes the raw `workspace/executeCommand` arguments: the query string
/// followed by an optional list of active cursor positions.
pub fn parse_insert_args(arguments: &[Value]) -> Result<(String, Vec<Position>), SnippetError> {
    let query = arguments
        .first()
        .and_then(Value::as_str)
        .filter(|query| !query.is_empty())
        .ok_or(SnippetError::EmptyQuery)?
        .to_string();
    let positions = match arguments.get(1) {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| SnippetError::InvalidPositions(e.to_string()))?,
        None => Vec::new(),
    };
    Ok((query, positions))
}

/// Runs the insert command: builds the snippet once and fans it out to
/// every active cursor position.
pub fn insert_command(
    query: &str,
    positions: &[Position],
) -> Result<InsertCommandResponse, SnippetError> {
    let snippet = insert_snippet(query)?;
    Ok(InsertCommandResponse {
        snippet,
        insertions: positions
            .iter()
            .map(|&position| SnippetInsertion { position })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde_json::json;

    use super::*;

    #[test]
    fn snippet_text_is_exact() {
        let expected = indoc! {r#"
            ${1:bot}.on("message:text", (${2:ctx, next}) => {
            $0
            }"#};
        assert_eq!(insert_snippet("message:text").unwrap(), expected);
    }

    #[test]
    fn snippet_has_no_trailing_newline() {
        let snippet = insert_snippet("message").unwrap();
        assert!(snippet.ends_with('}'));
        assert_eq!(snippet.lines().count(), 3);
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(
            insert_snippet(""),
            Err(SnippetError::EmptyQuery)
        ));
    }

    #[test]
    fn command_fans_out_to_every_cursor() {
        let positions = [Position::new(1, 2), Position::new(5, 0)];
        let response = insert_command("message:photo", &positions).unwrap();
        assert_eq!(response.insertions.len(), 2);
        assert_eq!(response.insertions[0].position, Position::new(1, 2));
        assert_eq!(response.insertions[1].position, Position::new(5, 0));
        assert!(response.snippet.contains("\"message:photo\""));
    }

    #[test]
    fn command_with_empty_query_performs_no_insertion() {
        assert!(insert_command("", &[Position::new(0, 0)]).is_err());
    }

    #[test]
    fn args_decode_query_and_positions() {
        let args = vec![
            json!("callback_query:data"),
            json!([{ "line": 3, "character": 7 }]),
        ];
        let (query, positions) = parse_insert_args(&args).unwrap();
        assert_eq!(query, "callback_query:data");
        assert_eq!(positions, vec![Position::new(3, 7)]);
    }

    #[test]
    fn args_without_positions_default_to_none() {
        let (query, positions) = parse_insert_args(&[json!("poll")]).unwrap();
        assert_eq!(query, "poll");
        assert!(positions.is_empty());
    }

    #[test]
    fn missing_empty_or_non_string_query_is_rejected() {
        for args in [vec![], vec![json!("")], vec![json!(42)], vec![json!(null)]] {
            assert!(matches!(
                parse_insert_args(&args),
                Err(SnippetError::EmptyQuery)
            ));
        }
    }

    #[test]
    fn malformed_positions_are_rejected() {
        let args = vec![json!("message"), json!("not positions")];
        assert!(matches!(
            parse_insert_args(&args),
            Err(SnippetError::InvalidPositions(_))
        ));
    }
}
