// ===== fcopt/src/api.rs =====
use crate::config::ClientConfig;
use crate::error::FcResult;
use crate::normalize::Failure;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Body of `POST /optimize`. Built only by the submit-time validator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPayload {
    pub num_customers: u32,
    pub num_fc_candidates: u32,
    pub k: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FcSite {
    pub fc_id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_cost: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub cust_id: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` when the solver left the customer unassigned.
    #[serde(default)]
    pub assigned_fc: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseModel {
    pub total_cost: f64,
    #[serde(default)]
    pub selected_fcs: Vec<FcSite>,
    #[serde(default)]
    pub all_fc_candidates: Vec<FcSite>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub map_base64: Option<String>,
}

impl ResponseModel {
    /// Lists the ways this result disagrees with what the solver promises.
    /// Nothing here is enforced; callers only log it.
    pub fn check_consistency(&self, k: u32) -> Vec<String> {
        let mut issues = Vec::new();

        if self.selected_fcs.len() != k as usize {
            issues.push(format!(
                "expected {} selected FCs, got {}",
                k,
                self.selected_fcs.len()
            ));
        }

        let open: HashSet<u32> = self.selected_fcs.iter().map(|fc| fc.fc_id).collect();
        let orphans = self
            .customers
            .iter()
            .filter(|c| c.assigned_fc.map_or(true, |id| !open.contains(&id)))
            .count();
        if orphans > 0 {
            issues.push(format!(
                "{} customers are unassigned or assigned to an FC that was not selected",
                orphans
            ));
        }

        issues
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

/// The one call the client makes to the solver. `Err` carries whatever the
/// failure looked like so the normalizer can pick the message.
pub trait OptimizeTransport: Send + Sync {
    fn optimize(
        &self,
        payload: &RequestPayload,
    ) -> impl Future<Output = Result<ResponseModel, Failure>> + Send;
}

/// reqwest-backed transport bound to one resolved base URL.
pub struct HttpTransport {
    client: Client,
    optimize_url: String,
    health_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> FcResult<Self> {
        let base = config.base_url();
        let origin = config.origin.as_deref();
        let optimize_url = base.join(origin, "/optimize")?;
        let health_url = base.join(origin, "/health")?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        debug!("Transport bound to {}", optimize_url);
        Ok(Self {
            client,
            optimize_url,
            health_url,
            timeout: config.timeout(),
        })
    }

    pub fn optimize_url(&self) -> &str {
        &self.optimize_url
    }

    fn send_failure(&self, e: reqwest::Error) -> Failure {
        if e.is_timeout() {
            Failure::timeout(self.timeout.as_millis())
        } else {
            Failure::from(e)
        }
    }

    async fn error_body(resp: reqwest::Response) -> Failure {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let data = if text.is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(json) => Some(json),
                Err(_) => Some(Value::String(text)),
            }
        };
        warn!("Model service answered {}", status);
        Failure::server(status, data)
    }

    pub async fn health(&self) -> Result<HealthStatus, Failure> {
        let resp = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| self.send_failure(e))?;

        if !resp.status().is_success() {
            return Err(Self::error_body(resp).await);
        }
        resp.json().await.map_err(Failure::from)
    }
}

impl OptimizeTransport for HttpTransport {
    async fn optimize(&self, payload: &RequestPayload) -> Result<ResponseModel, Failure> {
        let resp = self
            .client
            .post(&self.optimize_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.send_failure(e))?;

        if !resp.status().is_success() {
            return Err(Self::error_body(resp).await);
        }

        let bytes = resp.bytes().await.map_err(|e| self.send_failure(e))?;
        serde_json::from_slice::<ResponseModel>(&bytes)
            .map_err(|e| Failure::decode(format!("Invalid optimization result: {}", e)))
    }
}
