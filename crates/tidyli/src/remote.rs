//! Mirrors keep/remove decisions to a running decision-log server

use serde_json::{json, Value};
use std::time::Duration;
use tidyli_core::Decision;

/// Blocking client for `POST /api/decisions`
pub struct Mirror {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl Mirror {
    pub fn new(server_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/decisions", server_url.trim_end_matches('/')),
        })
    }

    /// POST one decision. Pending has no server log, so it is never sent.
    ///
    /// Returns whether a request was made.
    pub fn send(&self, profile_url: &str, decision: Decision) -> anyhow::Result<bool> {
        if decision == Decision::Pending {
            return Ok(false);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "profileUrl": profile_url, "decision": decision.as_str() }))
            .send()?
            .error_for_status()?;

        let body: Value = response.json()?;
        if body.get("success").and_then(Value::as_bool) != Some(true) {
            anyhow::bail!("server did not accept the decision: {}", body);
        }
        Ok(true)
    }

    /// Like [`Mirror::send`], but a failure is only logged; the local decision stands
    pub fn record(&self, profile_url: &str, decision: Decision) {
        if let Err(e) = self.send(profile_url, decision) {
            tracing::warn!("Could not mirror {} decision for {}: {}", decision, profile_url, e);
        }
    }
}
