//! Safe backed by the Safe transaction service and Transaction Builder
//! batch files.

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::schema::SafeConfig;
use crate::link::types::{LinkError, LinkResult, SafeTransaction};
use crate::networks::{NetworkDescriptor, NetworkRegistry};
use crate::safe::{SafeApp, SafeInfo};

/// Transaction Builder file format version.
const BATCH_VERSION: &str = "1.0";

/// Safe resolved from configuration.
#[derive(Debug, Clone)]
pub struct SafeServiceApp {
    address: Option<Address>,
    network: NetworkDescriptor,
    service_url: Option<String>,
    output_dir: PathBuf,
    http: reqwest::Client,
}

impl SafeServiceApp {
    pub fn new(config: &SafeConfig, registry: &NetworkRegistry) -> LinkResult<Self> {
        let network = registry
            .get_network_by_id(config.chain_id)
            .ok_or(LinkError::UnknownNetwork(config.chain_id))?
            .clone();

        let address = match &config.address {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|e| LinkError::Safe(format!("Invalid Safe address '{}': {}", raw, e)))?,
            ),
            None => None,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LinkError::Safe(format!("HTTP client: {}", e)))?;

        Ok(Self {
            address,
            service_url: config.service_url.clone().or_else(|| network.safe_service.clone()),
            network,
            output_dir: PathBuf::from(&config.batch_output_dir),
            http,
        })
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    async fn fetch_info(&self, address: Address, service: &str) -> LinkResult<SafeInfo> {
        let url = format!("{}/api/v1/safes/{}/", service.trim_end_matches('/'), address);
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LinkError::Safe(format!("Safe service unreachable: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LinkError::Safe(format!(
                "Safe service returned {} for {}",
                status, address
            )));
        }

        let body: ServiceSafe = res
            .json()
            .await
            .map_err(|e| LinkError::Safe(format!("Unexpected Safe service response: {}", e)))?;

        Ok(SafeInfo {
            address,
            chain_id: self.network.chain_id,
            threshold: Some(body.threshold),
            owners: body.owners,
            nonce: body.nonce.as_u64(),
        })
    }
}

#[async_trait]
impl SafeApp for SafeServiceApp {
    async fn is_connected(&self) -> bool {
        match self.safe_info().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Safe not connected");
                false
            }
        }
    }

    async fn safe_info(&self) -> LinkResult<SafeInfo> {
        let address = self.address.ok_or(LinkError::NotConnected)?;

        match &self.service_url {
            Some(service) => self.fetch_info(address, service).await,
            None => Ok(SafeInfo {
                address,
                chain_id: self.network.chain_id,
                threshold: None,
                owners: Vec::new(),
                nonce: None,
            }),
        }
    }

    async fn submit_txs(&self, txs: &[SafeTransaction]) -> LinkResult<String> {
        let address = self.address.ok_or(LinkError::NotConnected)?;

        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let batch = BatchFile {
            version: BATCH_VERSION.to_string(),
            chain_id: self.network.chain_id.to_string(),
            created_at,
            meta: BatchMeta {
                name: "safe2link".to_string(),
                description: format!("{} link transaction(s)", txs.len()),
                created_from_safe_address: address,
            },
            transactions: txs.to_vec(),
        };

        let path = self.output_dir.join(format!(
            "safe2link-{}-{}.json",
            self.network.chain_id, created_at
        ));
        let json = serde_json::to_vec_pretty(&batch)
            .map_err(|e| LinkError::Safe(format!("Batch encoding failed: {}", e)))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| LinkError::Safe(format!("Writing {} failed: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            safe = %address,
            chain_id = self.network.chain_id,
            transactions = txs.len(),
            "Batch written for Safe owners"
        );

        Ok(path.display().to_string())
    }
}

/// Subset of `GET /api/v1/safes/{address}/`.
#[derive(Debug, Deserialize)]
struct ServiceSafe {
    threshold: u32,
    owners: Vec<Address>,
    nonce: ServiceNonce,
}

/// The service has reported the nonce both as a number and as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServiceNonce {
    Number(u64),
    Text(String),
}

impl ServiceNonce {
    fn as_u64(&self) -> Option<u64> {
        match self {
            ServiceNonce::Number(n) => Some(*n),
            ServiceNonce::Text(s) => s.parse().ok(),
        }
    }
}

/// Safe Transaction Builder import format.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFile {
    pub version: String,
    pub chain_id: String,
    pub created_at: u64,
    pub meta: BatchMeta,
    pub transactions: Vec<SafeTransaction>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    pub name: String,
    pub description: String,
    pub created_from_safe_address: Address,
}
