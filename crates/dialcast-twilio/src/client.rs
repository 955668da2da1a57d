// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Twilio Calls API.
//!
//! Provides [`TwilioClient`] which handles request construction, basic
//! authentication, and error-body decoding for outbound call creation.

use dialcast_core::DialcastError;
use dialcast_core::types::{PlaceCallRequest, PlacedCall};
use tracing::debug;

use crate::types::{ApiErrorResponse, CallResource};

/// Status callback events subscribed for every outbound call.
///
/// Twilio only posts `completed` by default; the reconciler wants the
/// intermediate transitions as well.
const STATUS_CALLBACK_EVENTS: [&str; 4] = ["initiated", "ringing", "answered", "completed"];

/// HTTP client for Twilio call creation.
///
/// Requests carry HTTP basic auth (`account_sid:auth_token`). The client
/// sets no request timeout: a hung call-creation request stalls the dispatch
/// loop instead of being abandoned mid-flight.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioClient {
    /// Creates a new Twilio API client.
    ///
    /// # Arguments
    /// * `account_sid` - Twilio account SID (`AC...`)
    /// * `auth_token` - Twilio auth token paired with the SID
    /// * `base_url` - API base URL, normally `https://api.twilio.com`
    pub fn new(
        account_sid: String,
        auth_token: String,
        base_url: String,
    ) -> Result<Self, DialcastError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DialcastError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            account_sid,
            auth_token,
            base_url,
        })
    }

    /// Creates one outbound call and returns the Twilio call sid.
    pub async fn create_call(
        &self,
        request: &PlaceCallRequest,
    ) -> Result<PlacedCall, DialcastError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.account_sid
        );

        let mut params: Vec<(&str, &str)> = vec![
            ("To", &request.to),
            ("From", &request.from),
            ("Url", &request.instruction_url),
            ("StatusCallback", &request.status_callback_url),
            ("StatusCallbackMethod", "POST"),
        ];
        for event in STATUS_CALLBACK_EVENTS {
            params.push(("StatusCallbackEvent", event));
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| DialcastError::Gateway {
                message: format!("HTTP request failed: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, to = %request.to, "call creation response received");

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| DialcastError::Gateway {
                    message: format!("failed to read response body: {e}"),
                    status: None,
                    source: Some(Box::new(e)),
                })?;
            let call: CallResource =
                serde_json::from_str(&body).map_err(|e| DialcastError::Gateway {
                    message: format!("failed to parse API response: {e}"),
                    status: None,
                    source: Some(Box::new(e)),
                })?;
            debug!(call_sid = %call.sid, call_status = %call.status, "call created");
            return Ok(PlacedCall { call_id: call.sid });
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            match api_err.code {
                Some(code) => format!("Twilio API error {code}: {}", api_err.message),
                None => format!("Twilio API error: {}", api_err.message),
            }
        } else {
            format!("API returned {status}: {body}")
        };
        Err(DialcastError::Gateway {
            message,
            status: Some(status.as_u16()),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> TwilioClient {
        TwilioClient::new("ACtest".into(), "test-token".into(), base_url.to_string()).unwrap()
    }

    fn test_request() -> PlaceCallRequest {
        PlaceCallRequest {
            to: "+18005551234".into(),
            from: "+15005550006".into(),
            instruction_url: "https://example.org/voice".into(),
            status_callback_url: "https://example.org/call_status".into(),
        }
    }

    #[tokio::test]
    async fn create_call_returns_sid() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "sid": "CAdeadbeef",
            "status": "queued",
            "to": "+18005551234",
            "from": "+15005550006"
        });

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Calls.json"))
            .respond_with(ResponseTemplate::new(201).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let placed = client.create_call(&test_request()).await.unwrap();
        assert_eq!(placed.call_id, "CAdeadbeef");
    }

    #[tokio::test]
    async fn create_call_sends_form_params_and_basic_auth() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "sid": "CAparams",
            "status": "queued",
            "to": "+18005551234"
        });

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Calls.json"))
            .and(header_exists("authorization"))
            .and(body_string_contains("To=%2B18005551234"))
            .and(body_string_contains("From=%2B15005550006"))
            .and(body_string_contains("Url=https%3A%2F%2Fexample.org%2Fvoice"))
            .and(body_string_contains(
                "StatusCallback=https%3A%2F%2Fexample.org%2Fcall_status",
            ))
            .and(body_string_contains("StatusCallbackEvent=ringing"))
            .respond_with(ResponseTemplate::new(201).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_call(&test_request()).await;
        assert!(result.is_ok(), "expected form match: {result:?}");
    }

    #[tokio::test]
    async fn create_call_maps_api_error_body() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "code": 21211,
            "message": "The 'To' number is not a valid phone number.",
            "more_info": "https://www.twilio.com/docs/errors/21211",
            "status": 400
        });

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Calls.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.create_call(&test_request()).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        let msg = err.to_string();
        assert!(msg.contains("21211"), "got: {msg}");
        assert!(msg.contains("not a valid phone number"), "got: {msg}");
    }

    #[tokio::test]
    async fn create_call_surfaces_unparseable_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Calls.json"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.create_call(&test_request()).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"), "got: {err}");
    }

    #[tokio::test]
    async fn create_call_rejects_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Calls.json"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.create_call(&test_request()).await.unwrap_err();
        assert!(
            err.to_string().contains("failed to parse API response"),
            "got: {err}"
        );
    }
}
