//! HTTP submission of rule set test documents.
//!
//! One POST, one response. No retry and no timeout beyond the client
//! default; the endpoint reports failures in its response body, so HTTP
//! error statuses are not short-circuited either.

use crate::errors::{Result, RuleSetTestError};
use crate::protocol::RuleSetTestDocument;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Rule testing endpoint used when no override is given.
pub const DEFAULT_TEST_URL: &str =
    "https://api.appstoreconnect.apple.com/v1/gameCenterMatchmakingRuleSetTests";

/// Client for the rule testing endpoint.
pub struct RuleSetTestClient {
    client: reqwest::Client,
    url: Url,
}

/// Interpretation of a response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The `matchmakingResults` attribute of a successful test run.
    Results(Value),
    /// The raw response document when the endpoint reported errors.
    /// Regular output, not a failure.
    Errors(Value),
}

#[derive(Deserialize)]
struct TestResponseData {
    attributes: TestResponseAttributes,
}

#[derive(Deserialize)]
struct TestResponseAttributes {
    #[serde(rename = "matchmakingResults")]
    matchmaking_results: Value,
}

impl SubmitOutcome {
    /// Classifies a response payload. A present, non-null `errors` member
    /// means the endpoint rejected the test; anything else must carry
    /// `data.attributes.matchmakingResults`.
    pub fn from_payload(payload: Value) -> Result<Self> {
        if payload.get("errors").is_some_and(|errors| !errors.is_null()) {
            return Ok(SubmitOutcome::Errors(payload));
        }

        let data = payload.get("data").cloned().ok_or_else(|| {
            RuleSetTestError::UnexpectedResponse(
                "response carries neither errors nor data".to_string(),
            )
        })?;
        let data: TestResponseData = serde_json::from_value(data)
            .map_err(|e| RuleSetTestError::UnexpectedResponse(e.to_string()))?;

        Ok(SubmitOutcome::Results(data.attributes.matchmaking_results))
    }
}

impl RuleSetTestClient {
    pub fn new(url: Url) -> Self {
        RuleSetTestClient {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// POSTs the document and returns the parsed response payload.
    ///
    /// When no token was resolved the Authorization header is omitted
    /// entirely and the endpoint reports the failure in its response
    /// body.
    pub async fn submit(
        &self,
        auth: Option<&str>,
        document: &RuleSetTestDocument,
    ) -> Result<Value> {
        let mut request = self.client.post(self.url.clone()).json(document);
        if let Some(token) = auth {
            request = request.header(AUTHORIZATION, token);
        }

        tracing::debug!(url = %self.url, "submitting rule set test");
        let response = request.send().await?;
        tracing::debug!(status = %response.status(), "rule testing endpoint responded");

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_requests;
    use crate::document::assemble_test_document;
    use crate::input::parse_document;
    use crate::protocol::RULE_SET_TESTS_TYPE;
    use http_body_util::{BodyExt, Full};
    use hyper::body::{Bytes, Incoming};
    use hyper::service::service_fn;
    use hyper::{Request, Response};
    use hyper_util::rt::TokioExecutor;
    use serde_json::json;
    use std::convert::Infallible;
    use tokio::net::TcpListener;

    #[test]
    fn errors_payload_maps_to_errors_outcome() {
        let payload = json!({"errors": [{"status": "401", "title": "NOT_AUTHORIZED"}]});

        let outcome = SubmitOutcome::from_payload(payload.clone()).unwrap();

        assert_eq!(outcome, SubmitOutcome::Errors(payload));
    }

    #[test]
    fn results_payload_maps_to_results_outcome() {
        let payload = json!({
            "data": {
                "type": "gameCenterMatchmakingRuleSetTests",
                "attributes": {"matchmakingResults": [{"requestName": "r1"}]}
            }
        });

        let outcome = SubmitOutcome::from_payload(payload).unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Results(json!([{"requestName": "r1"}]))
        );
    }

    #[test]
    fn payload_without_results_is_an_error() {
        let payload = json!({"data": {"attributes": {}}});

        let result = SubmitOutcome::from_payload(payload);

        assert!(matches!(
            result.unwrap_err(),
            RuleSetTestError::UnexpectedResponse(_)
        ));
    }

    // Mock endpoint that echoes the received Authorization header and
    // request document back inside a matchmakingResults attribute.
    async fn echo_handler(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
        let (parts, body) = req.into_parts();

        let auth = parts
            .headers
            .get(hyper::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let body_bytes = body
            .collect()
            .await
            .map(|collected| collected.to_bytes())
            .unwrap_or_else(|_| Bytes::new());
        let document: Value = serde_json::from_slice(&body_bytes).unwrap();

        let payload = json!({
            "data": {
                "attributes": {
                    "matchmakingResults": {
                        "authorization": auth,
                        "document": document
                    }
                }
            }
        });

        Ok(Response::new(Full::new(Bytes::from(payload.to_string()))))
    }

    async fn start_test_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");

        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                let io = hyper_util::rt::TokioIo::new(stream);

                tokio::spawn(async move {
                    if let Err(err) =
                        hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                            .serve_connection(io, service_fn(echo_handler))
                            .await
                    {
                        eprintln!("Error serving connection: {:?}", err);
                    }
                });
            }
        });

        // Give the server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        port
    }

    fn test_document() -> RuleSetTestDocument {
        let requests = parse_document(json!([{"skill": 10}])).unwrap();
        assemble_test_document(&build_requests(&requests), Some("rule-set-1"))
    }

    #[tokio::test]
    async fn submit_sends_document_with_authorization() {
        let port = start_test_server().await;
        let url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
        let client = RuleSetTestClient::new(url);

        let payload = client
            .submit(Some("token-123"), &test_document())
            .await
            .unwrap();

        let SubmitOutcome::Results(results) = SubmitOutcome::from_payload(payload).unwrap() else {
            panic!("expected results outcome");
        };
        assert_eq!(results["authorization"], "token-123");
        assert_eq!(results["document"]["data"]["type"], RULE_SET_TESTS_TYPE);
        assert_eq!(
            results["document"]["included"][1]["attributes"]["playerId"],
            "r1_p1"
        );
    }

    #[tokio::test]
    async fn submit_omits_authorization_without_token() {
        let port = start_test_server().await;
        let url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
        let client = RuleSetTestClient::new(url);

        let payload = client.submit(None, &test_document()).await.unwrap();

        let SubmitOutcome::Results(results) = SubmitOutcome::from_payload(payload).unwrap() else {
            panic!("expected results outcome");
        };
        assert_eq!(results["authorization"], json!(null));
    }
}
