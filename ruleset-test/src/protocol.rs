//! Wire types for the rule testing endpoint's resource graph.
//!
//! Inline-created resources are linked through `${…}` id placeholders the
//! endpoint resolves server-side: requests are `${r1}`, `${r2}`, …, and
//! the players of request N are `${rN_p1}`, `${rN_p2}`, ….
//!
//! # Request resource
//!
//! ```json
//! {
//!   "type": "gameCenterMatchmakingTestRequests",
//!   "id": "${r1}",
//!   "attributes": {
//!     "requestName": "r1",
//!     "appVersion": "1.0.0",
//!     "bundleId": "com.example.mygame",
//!     "locale": "EN-US",
//!     "location": {"latitude": 0, "longitude": 0},
//!     "platform": "IOS",
//!     "playerCount": 2,
//!     "secondsInQueue": 0
//!   },
//!   "relationships": {
//!     "matchmakingPlayerProperties": {
//!       "data": [
//!         {"type": "gameCenterMatchmakingTestPlayerProperties", "id": "${r1_p1}"},
//!         {"type": "gameCenterMatchmakingTestPlayerProperties", "id": "${r1_p2}"}
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! `minPlayers`/`maxPlayers` appear after `secondsInQueue` only when the
//! input set them.
//!
//! # Player property resource
//!
//! ```json
//! {
//!   "type": "gameCenterMatchmakingTestPlayerProperties",
//!   "id": "${r1_p1}",
//!   "attributes": {
//!     "properties": [{"key": "skill", "value": "10"}],
//!     "playerId": "r1_p1"
//!   }
//! }
//! ```
//!
//! Property values are JSON-encoded into strings, whatever their input
//! type.
//!
//! See
//! <https://developer.apple.com/documentation/appstoreconnectapi/test_a_rule_set>
//! for the endpoint and the inline-create resource shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TEST_REQUESTS_TYPE: &str = "gameCenterMatchmakingTestRequests";
pub const PLAYER_PROPERTIES_TYPE: &str = "gameCenterMatchmakingTestPlayerProperties";
pub const RULE_SET_TESTS_TYPE: &str = "gameCenterMatchmakingRuleSetTests";
pub const RULE_SETS_TYPE: &str = "gameCenterMatchmakingRuleSets";

/// Minimal type+id reference linking resources without repeating their
/// attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRef {
    pub r#type: String,
    pub id: String,
}

/// `{"data": [...]}` wrapper for relationship arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRefList {
    pub data: Vec<ResourceRef>,
}

/// One matchmaking test request resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResource {
    pub r#type: String,
    pub id: String,
    pub attributes: RequestAttributes,
    pub relationships: RequestRelationships,
}

/// Request attributes. Field order is the wire order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAttributes {
    pub request_name: String,
    pub app_version: Value,
    pub bundle_id: Value,
    pub locale: Value,
    pub location: Value,
    pub platform: Value,
    pub player_count: usize,
    pub seconds_in_queue: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_players: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_players: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRelationships {
    pub matchmaking_player_properties: ResourceRefList,
}

/// One player's custom property resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPropertiesResource {
    pub r#type: String,
    pub id: String,
    pub attributes: PlayerPropertiesAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPropertiesAttributes {
    pub properties: Vec<PlayerProperty>,
    pub player_id: String,
}

/// One custom key/value pair. The value is the JSON encoding of the input
/// value, as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerProperty {
    pub key: String,
    pub value: String,
}

/// Document POSTed to the rule testing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSetTestDocument {
    pub data: RuleSetTestData,
    pub included: Vec<IncludedResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleSetTestData {
    pub r#type: String,
    pub attributes: Map<String, Value>,
    pub relationships: RuleSetTestRelationships,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetTestRelationships {
    pub matchmaking_rule_set: RuleSetRelationship,
    pub matchmaking_requests: ResourceRefList,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleSetRelationship {
    pub data: RuleSetRef,
}

/// Reference to the rule set under test. An unresolved id serializes as
/// `null` and is left for the endpoint to reject.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSetRef {
    pub r#type: String,
    pub id: Option<String>,
}

/// Entry of the `included` array: all full request resources in request
/// order, then all player property resources in creation order.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IncludedResource {
    Request(RequestResource),
    PlayerProperties(PlayerPropertiesResource),
}

/// Output document of the standalone generation path.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub requests: Vec<RequestResource>,
    pub players: Vec<PlayerPropertiesResource>,
    pub teams: Vec<Team>,
}

/// Fixed-size team bucket for generated documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub min_players: usize,
    pub max_players: usize,
    pub players: Vec<PlayerPropertiesResource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_ref_serializes_wire_type_field() {
        let stub = ResourceRef {
            r#type: TEST_REQUESTS_TYPE.to_string(),
            id: "${r1}".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&stub).unwrap(),
            json!({"type": "gameCenterMatchmakingTestRequests", "id": "${r1}"})
        );
    }

    #[test]
    fn player_bounds_omitted_when_unset() {
        let attributes = RequestAttributes {
            request_name: "r1".to_string(),
            app_version: json!("1.0.0"),
            bundle_id: json!("com.example.mygame"),
            locale: json!("EN-US"),
            location: json!({"latitude": 0, "longitude": 0}),
            platform: json!("IOS"),
            player_count: 1,
            seconds_in_queue: json!(0),
            min_players: None,
            max_players: None,
        };

        let value = serde_json::to_value(&attributes).unwrap();

        assert!(value.get("minPlayers").is_none());
        assert!(value.get("maxPlayers").is_none());
        assert_eq!(value["requestName"], "r1");
        assert_eq!(value["playerCount"], 1);
    }

    #[test]
    fn player_bounds_kept_when_set() {
        let attributes = RequestAttributes {
            request_name: "r1".to_string(),
            app_version: json!("1.0.0"),
            bundle_id: json!("com.example.mygame"),
            locale: json!("EN-US"),
            location: json!({"latitude": 0, "longitude": 0}),
            platform: json!("IOS"),
            player_count: 4,
            seconds_in_queue: json!(30),
            min_players: Some(json!(2)),
            max_players: Some(json!(4)),
        };

        let value = serde_json::to_value(&attributes).unwrap();

        assert_eq!(value["minPlayers"], 2);
        assert_eq!(value["maxPlayers"], 4);
    }

    #[test]
    fn missing_rule_set_id_serializes_null() {
        let reference = RuleSetRef {
            r#type: RULE_SETS_TYPE.to_string(),
            id: None,
        };

        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({"type": "gameCenterMatchmakingRuleSets", "id": null})
        );
    }
}
