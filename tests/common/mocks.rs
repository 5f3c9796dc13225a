use async_trait::async_trait;
use axum::{body::Bytes, http::StatusCode};
use food_ai_relay::{
    Error, Result,
    upstream::{UpstreamClient, UpstreamRequest, UpstreamResponse},
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted upstream: answers calls in order and records every request.
#[derive(Debug, Default)]
pub struct MockUpstreamClient {
    outcomes: Mutex<VecDeque<std::result::Result<UpstreamResponse, String>>>,
    requests: Mutex<Vec<UpstreamRequest>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: Bytes::from(body.to_string()),
        }));
        self
    }

    pub fn with_transport_error(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse> {
        self.requests.lock().unwrap().push(request);

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::internal(message)),
            None => Err(Error::internal("No more mock responses available")),
        }
    }
}
