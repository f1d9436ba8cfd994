//! Builds request and player property resources from validated input.
//!
//! Each input item becomes one request resource plus one player property
//! resource per player. Request-level attributes are read from the
//! requester map (the single object, or the first object of a party) and
//! fall back to documented defaults; everything the key registry does not
//! recognize becomes a custom player property.

use crate::input::{PropertyMap, RequestInput};
use crate::keys;
use crate::protocol::{
    PLAYER_PROPERTIES_TYPE, PlayerPropertiesAttributes, PlayerPropertiesResource, PlayerProperty,
    RequestAttributes, RequestRelationships, RequestResource, ResourceRef, ResourceRefList,
    TEST_REQUESTS_TYPE,
};
use serde_json::{Value, json};

pub const DEFAULT_APP_VERSION: &str = "1.0.0";
pub const DEFAULT_BUNDLE_ID: &str = "com.example.mygame";
pub const DEFAULT_LOCALE: &str = "EN-US";
pub const DEFAULT_PLATFORM: &str = "IOS";
pub const DEFAULT_SECONDS_IN_QUEUE: u64 = 0;

/// Everything produced for one input request.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    /// Reference stub for the document's top-level relationship array.
    pub stub: ResourceRef,
    /// Full request resource for the `included` array.
    pub resource: RequestResource,
    /// Player property resources, in the order the players appeared.
    pub players: Vec<PlayerPropertiesResource>,
}

/// Builds one [`BuiltRequest`] per input item. Ordinals are 1-based and
/// follow input order, so request ids come out as `r1..rN`.
pub fn build_requests(inputs: &[RequestInput]) -> Vec<BuiltRequest> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| build_request(index + 1, input))
        .collect()
}

/// Builds the request resource, its reference stub and its player
/// property resources for the request at `ordinal`.
pub fn build_request(ordinal: usize, input: &RequestInput) -> BuiltRequest {
    let players = normalize_players(ordinal, input);
    let requester = input.requester();
    let request_name = format!("r{ordinal}");

    let player_refs = players
        .iter()
        .map(|player| ResourceRef {
            r#type: PLAYER_PROPERTIES_TYPE.to_string(),
            id: player.id.clone(),
        })
        .collect();

    let attributes = RequestAttributes {
        request_name: request_name.clone(),
        app_version: attribute_or_default(requester, keys::APP_VERSION, json!(DEFAULT_APP_VERSION)),
        bundle_id: attribute_or_default(requester, keys::BUNDLE_ID, json!(DEFAULT_BUNDLE_ID)),
        locale: attribute_or_default(requester, keys::LOCALE, json!(DEFAULT_LOCALE)),
        location: attribute_or_default(
            requester,
            keys::LOCATION,
            json!({"latitude": 0, "longitude": 0}),
        ),
        platform: attribute_or_default(requester, keys::PLATFORM, json!(DEFAULT_PLATFORM)),
        player_count: players.len(),
        seconds_in_queue: attribute_or_default(
            requester,
            keys::SECONDS_IN_QUEUE,
            json!(DEFAULT_SECONDS_IN_QUEUE),
        ),
        min_players: truthy_attribute(requester, keys::MIN_PLAYERS),
        max_players: truthy_attribute(requester, keys::MAX_PLAYERS),
    };

    let resource = RequestResource {
        r#type: TEST_REQUESTS_TYPE.to_string(),
        id: placeholder(&request_name),
        attributes,
        relationships: RequestRelationships {
            matchmaking_player_properties: ResourceRefList { data: player_refs },
        },
    };

    BuiltRequest {
        stub: ResourceRef {
            r#type: TEST_REQUESTS_TYPE.to_string(),
            id: placeholder(&request_name),
        },
        resource,
        players,
    }
}

/// One player property resource per input player, ids `r{N}_p{M}` with
/// M 1-based in input order. Recognized request-level keys are stripped;
/// remaining values are JSON-encoded into strings.
pub fn normalize_players(ordinal: usize, input: &RequestInput) -> Vec<PlayerPropertiesResource> {
    input
        .players()
        .iter()
        .enumerate()
        .map(|(index, properties)| {
            let player_id = format!("r{ordinal}_p{}", index + 1);

            let custom = properties
                .iter()
                .filter(|(key, _)| !keys::is_request_key(key))
                .map(|(key, value)| PlayerProperty {
                    key: key.clone(),
                    value: value.to_string(),
                })
                .collect();

            PlayerPropertiesResource {
                r#type: PLAYER_PROPERTIES_TYPE.to_string(),
                id: placeholder(&player_id),
                attributes: PlayerPropertiesAttributes {
                    properties: custom,
                    player_id,
                },
            }
        })
        .collect()
}

/// Wraps an id in the `${…}` placeholder syntax the endpoint uses to
/// resolve inline-created resources.
fn placeholder(id: &str) -> String {
    format!("${{{id}}}")
}

/// A present but falsy value (`null`, `false`, `0`, `""`, `[]`, `{}`) is
/// replaced by the default, same as an absent key. Preserved quirk of the
/// loose truthiness the defaults have always used.
fn attribute_or_default(map: &PropertyMap, key: &str, default: Value) -> Value {
    match map.get(key) {
        Some(value) if is_truthy(value) => value.clone(),
        _ => default,
    }
}

/// The value only when present and truthy; no default is synthesized.
fn truthy_attribute(map: &PropertyMap, key: &str) -> Option<Value> {
    map.get(key).filter(|value| is_truthy(value)).cloned()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
    }
}
