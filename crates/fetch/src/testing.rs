//! In-memory transport for tests.
//!
//! Responses are scripted per url. `respond` answers every request for a url with the same
//! value; `gate` holds the next request for a url until the test releases it, which is how
//! tests force one request to finish before another.

use crate::{FetchError, Result, Transport};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

#[derive(Default)]
pub struct ScriptedTransport {
    state: Mutex<Script>,
}

#[derive(Default)]
struct Script {
    fixed: HashMap<String, Result<Value>>,
    gated: HashMap<String, VecDeque<oneshot::Receiver<Result<Value>>>>,
    requests: Vec<String>,
}

/// Holds one scripted request open until released.
pub struct Gate {
    url: String,
    tx: oneshot::Sender<Result<Value>>,
}

impl Gate {
    /// Answer the held request with `value`. Returns `false` when nobody is waiting any more
    /// (the request was cancelled).
    pub fn release(self, value: Value) -> bool {
        self.tx.send(Ok(value)).is_ok()
    }

    /// Answer the held request with `error`.
    pub fn fail(self, error: FetchError) -> bool {
        self.tx.send(Err(error)).is_ok()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer every request for `url` with `value`.
    pub fn respond(&self, url: &str, value: Value) {
        self.script().fixed.insert(url.to_string(), Ok(value));
    }

    /// Answer every request for `url` with `error`.
    pub fn fail(&self, url: &str, error: FetchError) {
        self.script().fixed.insert(url.to_string(), Err(error));
    }

    /// Hold the next request for `url` until the returned gate is released. Gates for the same
    /// url queue up in order and take precedence over `respond`.
    pub fn gate(&self, url: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.script()
            .gated
            .entry(url.to_string())
            .or_default()
            .push_back(rx);
        Gate {
            url: url.to_string(),
            tx,
        }
    }

    /// Every url requested so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.script().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        self.script().requests.iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let gated = {
            let mut script = self.script();
            script.requests.push(url.to_string());
            let gated = script.gated.get_mut(url).and_then(VecDeque::pop_front);
            match gated {
                Some(rx) => rx,
                None => {
                    return script.fixed.get(url).cloned().unwrap_or_else(|| {
                        Err(FetchError::Status {
                            url: url.to_string(),
                            status: 404,
                        })
                    });
                }
            }
        };

        gated
            .await
            .unwrap_or_else(|_| Err(FetchError::network(url, "gate dropped without an answer")))
    }
}

/// Collection body with one item per name, urls numbered from 1.
#[must_use]
pub fn page(names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            json!({
                "name": name,
                "url": format!("https://api.test/items/{}/", idx + 1),
            })
        })
        .collect();
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}
