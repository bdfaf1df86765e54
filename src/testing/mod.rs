use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ApiRequest, Transport};
use crate::error::{ConsoleError, Result};

/// Test double for the HTTP collaborator: records every request and answers
/// with queued payloads in order.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful (already unwrapped) payload
    pub fn respond(&self, data: Value) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(data));
        self
    }

    pub fn fail(&self, err: ConsoleError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConsoleError::transport("no response queued")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replays_in_order_then_fails() {
        let mock = MockTransport::new();
        mock.respond(json!(1)).respond(json!(2));

        assert_eq!(mock.send(ApiRequest::get("/a")).await.unwrap(), json!(1));
        assert_eq!(mock.send(ApiRequest::get("/b")).await.unwrap(), json!(2));
        assert!(mock.send(ApiRequest::get("/c")).await.unwrap_err().is_transport());
        assert_eq!(mock.requests().len(), 3);
        assert_eq!(mock.last_request().path, "/c");
    }
}
