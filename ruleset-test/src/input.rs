//! Input document model and shape validation.
//!
//! Standard input carries one JSON array where each element describes one
//! matchmaking test request: either a single object (a request with one
//! player) or an array of objects (the requester plus invited players,
//! one object per player). The whole document is validated eagerly, so a
//! shape violation aborts the run before any output is produced.

use crate::errors::{Result, RuleSetTestError};
use serde_json::{Map, Value};

/// One player's raw properties, in input order.
pub type PropertyMap = Map<String, Value>;

/// One element of the top-level input array.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestInput {
    /// A single object: one request with exactly one player.
    Solo(PropertyMap),
    /// An array of objects: the first is the requester and also carries
    /// the request-level fields, the rest are invited players. Never
    /// empty once validated.
    Party(Vec<PropertyMap>),
}

impl RequestInput {
    /// The map request-level fields are read from.
    pub fn requester(&self) -> &PropertyMap {
        match self {
            RequestInput::Solo(map) => map,
            RequestInput::Party(maps) => &maps[0],
        }
    }

    /// Per-player property maps, in input order.
    pub fn players(&self) -> &[PropertyMap] {
        match self {
            RequestInput::Solo(map) => std::slice::from_ref(map),
            RequestInput::Party(maps) => maps,
        }
    }
}

/// Validates and converts the whole input document.
pub fn parse_document(value: Value) -> Result<Vec<RequestInput>> {
    let Value::Array(items) = value else {
        return Err(invalid_input("an array of requests", &value));
    };

    items.into_iter().map(parse_request).collect()
}

fn parse_request(item: Value) -> Result<RequestInput> {
    match item {
        Value::Object(map) => Ok(RequestInput::Solo(map)),
        Value::Array(players) if players.is_empty() => Err(invalid_input(
            "a non-empty array of objects",
            &Value::Array(players),
        )),
        Value::Array(players) => {
            let maps = players
                .into_iter()
                .map(|player| match player {
                    Value::Object(map) => Ok(map),
                    other => Err(invalid_input("an object in the player array", &other)),
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(RequestInput::Party(maps))
        }
        other => Err(invalid_input("an object or an array of objects", &other)),
    }
}

fn invalid_input(expected: &'static str, value: &Value) -> RuleSetTestError {
    RuleSetTestError::InvalidInput {
        expected,
        found: json_type_name(value),
        value: value.to_string(),
    }
}

/// JSON type name used in validation error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_single_objects_and_parties() {
        let document = json!([
            {"skill": 10},
            [{"skill": 20, "minPlayers": 2}, {"skill": 30}]
        ]);

        let requests = parse_document(document).unwrap();

        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0], RequestInput::Solo(_)));
        assert_eq!(requests[0].players().len(), 1);

        let RequestInput::Party(players) = &requests[1] else {
            panic!("expected a party");
        };
        assert_eq!(players.len(), 2);
        assert_eq!(requests[1].requester()["skill"], json!(20));
    }

    #[test]
    fn preserves_element_order() {
        let document = json!([{"a": 1}, {"b": 2}, {"c": 3}]);

        let requests = parse_document(document).unwrap();

        assert!(requests[0].requester().contains_key("a"));
        assert!(requests[1].requester().contains_key("b"));
        assert!(requests[2].requester().contains_key("c"));
    }

    #[test]
    fn rejects_non_array_document() {
        let err = parse_document(json!({"skill": 10})).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("an array of requests"), "{message}");
        assert!(message.contains("an object"), "{message}");
    }

    #[test]
    fn rejects_non_object_element() {
        let err = parse_document(json!([{"skill": 10}, "oops"])).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("a string"), "{message}");
        assert!(message.contains("\"oops\""), "{message}");
    }

    #[test]
    fn rejects_non_object_party_member() {
        let err = parse_document(json!([[{"skill": 10}, 42]])).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("player array"), "{message}");
        assert!(message.contains("a number"), "{message}");
    }

    #[test]
    fn rejects_empty_party() {
        let err = parse_document(json!([[]])).unwrap_err();

        assert!(matches!(err, RuleSetTestError::InvalidInput { .. }));
    }
}
