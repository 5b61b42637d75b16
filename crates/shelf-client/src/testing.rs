//! In-memory [`Transport`] used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use shelf_protocol::{HttpRequest, HttpResponse, Transport, TransportError};

/// Records every request and replays canned outcomes in order.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub(crate) fn respond(self, response: HttpResponse) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queues a transport failure.
    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the requests seen so far.
    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no canned response".into())))
    }
}
