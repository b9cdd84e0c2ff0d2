//! In-memory transport for tests.

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

/// Replays canned replies per `(method, path)` and records every request.
///
/// Replies queued for a route are consumed in order; the last one repeats.
/// Unknown routes answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, method: Method, path: &str, response: HttpResponse) -> &Self {
        self.push(method, path, Reply::Response(response))
    }

    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.reply(method, path, HttpResponse::new(status, body))
    }

    pub(crate) fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
        self.push(method, path, Reply::Failure(message.to_string()))
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests sent to one route, in order.
    pub(crate) fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, _base_url: &str, request: HttpRequest) -> Result<HttpResponse> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(Error::network(message)),
            None => Ok(HttpResponse::new(404, "404 page not found")),
        }
    }
}
