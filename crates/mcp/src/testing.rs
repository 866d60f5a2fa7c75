// Test double for the upstream API

use std::sync::Mutex;
use t212_client::{Payload, Query, Trading212Api, Trading212Error, Trading212Result};

/// Records every request and answers with a fixed payload or API error.
pub struct RecordingApi {
    response: Result<Payload, (u16, String)>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingApi {
    pub fn returning(payload: Payload) -> Self {
        Self {
            response: Ok(payload),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Err((status, body.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(path, query pairs)` in call order.
    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|(path, _)| path).collect()
    }
}

#[async_trait::async_trait]
impl Trading212Api for RecordingApi {
    async fn get(&self, path: &str, query: Option<&Query>) -> Trading212Result<Payload> {
        let pairs = query.map(Query::pairs).unwrap_or_default();
        self.calls.lock().unwrap().push((path.to_string(), pairs));

        match &self.response {
            Ok(payload) => Ok(payload.clone()),
            Err((status, body)) => Err(Trading212Error::from_response(*status, body.clone())),
        }
    }
}
