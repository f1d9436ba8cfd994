use ruleset_test::client::DEFAULT_TEST_URL;
use std::env;
use url::Url;

/// Environment variable consulted when `--auth` is not given.
pub const AUTH_TOKEN_VAR: &str = "ASC_API_TOKEN";
/// Environment variable consulted when `--rulesetid` is not given.
pub const RULESET_ID_VAR: &str = "RULESET_ID";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid test API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Resolved settings for the submit subcommand.
#[derive(Debug)]
pub struct SubmitConfig {
    pub auth: Option<String>,
    pub ruleset_id: Option<String>,
    pub url: Url,
}

impl SubmitConfig {
    /// Flags win over environment variables. A missing token or ruleset
    /// id is not an error here; the request goes out without them and the
    /// endpoint reports the failure.
    pub fn resolve(
        auth: Option<String>,
        ruleset_id: Option<String>,
        url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = Url::parse(url.as_deref().unwrap_or(DEFAULT_TEST_URL))?;

        Ok(SubmitConfig {
            auth: auth.or_else(|| env::var(AUTH_TOKEN_VAR).ok()),
            ruleset_id: ruleset_id.or_else(|| env::var(RULESET_ID_VAR).ok()),
            url,
        })
    }
}
