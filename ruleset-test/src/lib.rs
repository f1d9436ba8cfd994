//! Builds and submits Game Center matchmaking rule set test payloads.
//!
//! The pipeline is a pure data transformation: a denormalized array of
//! request descriptions (read from standard input by the CLI) becomes a
//! normalized JSON:API-style resource graph of test requests and player
//! properties, which is either printed or POSTed to the rule testing
//! endpoint.

pub mod builder;
pub mod client;
pub mod document;
pub mod errors;
pub mod input;
pub mod keys;
pub mod protocol;
