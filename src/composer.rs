// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client feature: send composed requests and keep named copies of them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::http::{BuiltRequest, NormalizedResponse, RequestDescription, Transport};

/// Sends requests and normalizes whatever comes back
///
/// Exactly one attempt is made per call. Failures never escape as errors;
/// they come back as the `status == 0` sentinel response.
pub struct RequestComposer<T, C = SystemClock> {
    transport: T,
    clock: C,
}

impl<T: Transport> RequestComposer<T> {
    /// Create a composer timed by the system clock
    pub fn new(transport: T) -> Self {
        Self::with_clock(transport, SystemClock::new())
    }
}

impl<T: Transport, C: Clock> RequestComposer<T, C> {
    /// Create a composer with an explicit time source
    pub fn with_clock(transport: T, clock: C) -> Self {
        Self { transport, clock }
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send an already built request
    pub async fn send(&self, request: &BuiltRequest) -> NormalizedResponse {
        let start = self.clock.now_ms();

        tracing::info!(method = %request.method, url = %request.final_url, "Sending request");

        match self.transport.send(request).await {
            Ok(raw) => {
                let elapsed = self.clock.elapsed_ms(start);
                let response = NormalizedResponse::from_raw(raw, elapsed);
                tracing::info!(
                    status = response.status,
                    elapsed_ms = elapsed,
                    bytes = response.body.len(),
                    "Request completed"
                );
                response
            }
            Err(e) => {
                let elapsed = self.clock.elapsed_ms(start);
                tracing::warn!(url = %request.final_url, error = %e, elapsed_ms = elapsed, "Request failed");
                NormalizedResponse::network_error(e.to_string(), elapsed)
            }
        }
    }

    /// Build and send a request description
    pub async fn submit_request(&self, request: &RequestDescription) -> NormalizedResponse {
        self.send(&request.build()).await
    }
}

/// A named request kept for later, with its last response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRequest {
    pub id: String,
    pub name: String,
    pub request: RequestDescription,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<NormalizedResponse>,
}

/// Saved requests, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedRequestList {
    requests: Vec<SavedRequest>,
}

impl SavedRequestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save under `name`, replacing an existing entry of the same name
    pub fn save(
        &mut self,
        name: impl Into<String>,
        request: RequestDescription,
        response: Option<NormalizedResponse>,
    ) -> &SavedRequest {
        let name = name.into();
        let id = match self.requests.iter().position(|r| r.name == name) {
            Some(index) => self.requests.remove(index).id,
            None => Uuid::new_v4().to_string(),
        };

        self.requests.insert(
            0,
            SavedRequest {
                id,
                name,
                request,
                created_at: Utc::now(),
                response,
            },
        );
        &self.requests[0]
    }

    /// Look up by id or by name
    pub fn find(&self, id_or_name: &str) -> Option<&SavedRequest> {
        self.requests
            .iter()
            .find(|r| r.id == id_or_name || r.name == id_or_name)
    }

    /// Record the latest response of a saved request
    pub fn record_response(&mut self, id_or_name: &str, response: NormalizedResponse) -> bool {
        match self
            .requests
            .iter_mut()
            .find(|r| r.id == id_or_name || r.name == id_or_name)
        {
            Some(saved) => {
                saved.response = Some(response);
                true
            }
            None => false,
        }
    }

    /// Remove by id or name
    pub fn remove(&mut self, id_or_name: &str) -> bool {
        let before = self.requests.len();
        self.requests
            .retain(|r| r.id != id_or_name && r.name != id_or_name);
        self.requests.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedRequest> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{Error, Result};
    use crate::http::{
        FetchedResource, FieldRow, HeaderPairs, HttpMethod, OutboundBody, RawResponse,
        RequestBody,
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Transport that answers from a script and records what it was asked
    struct ScriptedTransport {
        clock: ManualClock,
        latency_ms: u64,
        reply: fn() -> Result<RawResponse>,
        seen: Mutex<Vec<BuiltRequest>>,
    }

    impl ScriptedTransport {
        fn new(clock: ManualClock, latency_ms: u64, reply: fn() -> Result<RawResponse>) -> Self {
            Self {
                clock,
                latency_ms,
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &BuiltRequest) -> Result<RawResponse> {
            self.seen.lock().push(request.clone());
            self.clock.advance(self.latency_ms);
            (self.reply)()
        }

        async fn fetch(&self, _url: &str, _headers: &HeaderPairs) -> Result<FetchedResource> {
            Err(Error::network("not scripted"))
        }
    }

    fn ok_json() -> Result<RawResponse> {
        Ok(RawResponse {
            status: 201,
            status_text: "Created".into(),
            headers: vec![
                ("x-id".into(), "1".into()),
                ("x-id".into(), "2".into()),
            ],
            body: Ok("{\"id\":2}".into()),
        })
    }

    fn dns_failure() -> Result<RawResponse> {
        Err(Error::network("dns error: failed to lookup address information"))
    }

    #[tokio::test]
    async fn test_success_normalized_and_timed() {
        let clock = ManualClock::new();
        let composer =
            RequestComposer::with_clock(ScriptedTransport::new(clock.clone(), 120, ok_json), clock);

        let request = RequestDescription::new(HttpMethod::Post, "api.example.com/items")
            .param(FieldRow::new("dry", "1"))
            .body(RequestBody::Json("{\"name\":\"x\"}".into()));
        let resp = composer.submit_request(&request).await;

        assert_eq!(resp.status, 201);
        assert_eq!(resp.status_text, "Created");
        assert_eq!(resp.headers["x-id"], "2");
        assert_eq!(resp.body, "{\n  \"id\": 2\n}");
        assert_eq!(resp.response_time_ms, 120);

        let seen = composer.transport().seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].final_url, "https://api.example.com/items?dry=1");
        assert_eq!(
            seen[0].body,
            Some(OutboundBody::Text("{\"name\":\"x\"}".into()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_sentinel() {
        let clock = ManualClock::new();
        let composer = RequestComposer::with_clock(
            ScriptedTransport::new(clock.clone(), 35, dns_failure),
            clock,
        );

        let resp = composer
            .submit_request(&RequestDescription::new(HttpMethod::Get, "nowhere.invalid"))
            .await;

        assert!(resp.is_network_error());
        assert_eq!(resp.status, 0);
        assert_eq!(resp.status_text, "Network Error");
        assert!(resp.body.contains("dns error"));
        assert_eq!(resp.response_time_ms, 35);
    }

    #[test]
    fn test_saved_requests_replace_by_name() {
        let mut list = SavedRequestList::new();
        let first_id = list
            .save("users", RequestDescription::new(HttpMethod::Get, "a.example"), None)
            .id
            .clone();
        list.save("other", RequestDescription::new(HttpMethod::Get, "b.example"), None);
        list.save("users", RequestDescription::new(HttpMethod::Put, "a.example"), None);

        assert_eq!(list.len(), 2);
        let users = list.find("users").unwrap();
        assert_eq!(users.id, first_id);
        assert_eq!(users.request.method, HttpMethod::Put);
        assert_eq!(list.iter().next().unwrap().name, "users");
    }

    #[test]
    fn test_saved_requests_record_and_remove() {
        let mut list = SavedRequestList::new();
        let id = list
            .save("ping", RequestDescription::new(HttpMethod::Get, "a.example"), None)
            .id
            .clone();

        assert!(list.record_response(&id, NormalizedResponse::network_error("x", 1)));
        assert!(list.find("ping").unwrap().response.is_some());
        assert!(!list.record_response("missing", NormalizedResponse::network_error("x", 1)));

        assert!(list.remove("ping"));
        assert!(!list.remove(&id));
        assert!(list.is_empty());
    }
}
