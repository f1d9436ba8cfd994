//! Assembles built requests into the two output documents.
//!
//! The submission envelope wraps the resource graph for the rule testing
//! endpoint; the generation envelope is the standalone document with
//! requests, players and two round-robin teams.

use crate::builder::BuiltRequest;
use crate::errors::Result;
use crate::protocol::{
    GeneratedDocument, IncludedResource, RULE_SET_TESTS_TYPE, RULE_SETS_TYPE, ResourceRefList,
    RuleSetRef, RuleSetRelationship, RuleSetTestData, RuleSetTestDocument,
    RuleSetTestRelationships, Team,
};
use serde::Serialize;
use serde_json::Map;
use serde_json::ser::PrettyFormatter;

/// Team names, in assignment order.
pub const TEAM_NAMES: [&str; 2] = ["blue", "red"];

const TEAM_MIN_PLAYERS: usize = 2;
const TEAM_MAX_PLAYERS: usize = 2;

/// Wraps the resource graph in the rule set test envelope. The top-level
/// relationship array holds the request stubs in request order; `included`
/// holds all full request resources in request order followed by all
/// player property resources in creation order.
pub fn assemble_test_document(
    requests: &[BuiltRequest],
    rule_set_id: Option<&str>,
) -> RuleSetTestDocument {
    let stubs = requests.iter().map(|request| request.stub.clone()).collect();

    let mut included: Vec<IncludedResource> = requests
        .iter()
        .map(|request| IncludedResource::Request(request.resource.clone()))
        .collect();
    included.extend(
        requests
            .iter()
            .flat_map(|request| request.players.iter().cloned())
            .map(IncludedResource::PlayerProperties),
    );

    RuleSetTestDocument {
        data: RuleSetTestData {
            r#type: RULE_SET_TESTS_TYPE.to_string(),
            attributes: Map::new(),
            relationships: RuleSetTestRelationships {
                matchmaking_rule_set: RuleSetRelationship {
                    data: RuleSetRef {
                        r#type: RULE_SETS_TYPE.to_string(),
                        id: rule_set_id.map(String::from),
                    },
                },
                matchmaking_requests: ResourceRefList { data: stubs },
            },
        },
        included,
    }
}

/// Builds the standalone generation document: all request resources, all
/// player resources, and the two teams.
pub fn assemble_generated_document(requests: &[BuiltRequest]) -> GeneratedDocument {
    GeneratedDocument {
        requests: requests
            .iter()
            .map(|request| request.resource.clone())
            .collect(),
        players: requests
            .iter()
            .flat_map(|request| request.players.iter().cloned())
            .collect(),
        teams: assign_teams(requests),
    }
}

/// Distributes every player of every request across the two fixed teams,
/// alternating in generation order.
fn assign_teams(requests: &[BuiltRequest]) -> Vec<Team> {
    let mut teams: Vec<Team> = TEAM_NAMES
        .iter()
        .map(|name| Team {
            name: name.to_string(),
            min_players: TEAM_MIN_PLAYERS,
            max_players: TEAM_MAX_PLAYERS,
            players: Vec::new(),
        })
        .collect();

    let mut team_index = 0;
    for request in requests {
        for player in &request.players {
            teams[team_index].players.push(player.clone());
            team_index = (team_index + 1) % teams.len();
        }
    }

    teams
}

/// Renders a document with the 4-space indent both subcommands print.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
}
