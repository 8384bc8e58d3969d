//! # HTTP Implementations of the External Contracts
//!
//! Thin reqwest clients for a ledger RPC service and a file-store
//! gateway. These are transports over the abstract contracts in
//! [`crate::ledger`] and [`crate::file_store`], not a wire-format
//! commitment: the engine only ever sees the traits.
//!
//! Endpoint shapes:
//!
//! | Call | Route |
//! |------|-------|
//! | `list_record_ids` | `GET {base}/records` |
//! | `get_record` | `GET {base}/records/{id}` (404 → not found) |
//! | `reviewer_address` | `GET {base}/reviewer` |
//! | `submit_record` | `POST {base}/records` |
//! | `review_record` | `POST {base}/records/{id}/review` |
//! | `FileStore::store` | `POST {gateway}/api/v0/add` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use empchain_common::record::{AccountId, RecordStatus};

use crate::error::{FileStoreError, LedgerError};
use crate::file_store::FileStore;
use crate::ledger::{LedgerReader, LedgerWriter, RawEmployeeRecord, SubmitRecordRequest};

// ════════════════════════════════════════════════════════════════════════════
// LEDGER CLIENT
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct ReviewerResponse {
    reviewer: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: u64,
}

#[derive(Serialize)]
struct ReviewBody<'a> {
    status: u8,
    reviewer: &'a str,
}

/// Ledger RPC client over HTTP/JSON.
#[derive(Clone)]
pub struct HttpLedgerClient {
    base: String,
    client: Client,
}

impl HttpLedgerClient {
    /// Builds a client with a per-request timeout.
    pub fn new(base: impl Into<String>, timeout_ms: u64) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(HttpLedgerClient {
            base: base.into(),
            client,
        })
    }
}

fn transport(e: reqwest::Error) -> LedgerError {
    LedgerError::Transport(e.to_string())
}

#[async_trait]
impl LedgerReader for HttpLedgerClient {
    async fn list_record_ids(&self) -> Result<Vec<u64>, LedgerError> {
        let url = format!("{}/records", self.base);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Transport(format!(
                "list_record_ids failed {status} {body}"
            )));
        }
        resp.json::<Vec<u64>>().await.map_err(transport)
    }

    async fn get_record(&self, id: u64) -> Result<RawEmployeeRecord, LedgerError> {
        let url = format!("{}/records/{}", self.base, id);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        let status = resp.status();
        if status.as_u16() == 404 {
            return Err(LedgerError::NotFound(id));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Transport(format!(
                "get_record({id}) failed {status} {body}"
            )));
        }
        resp.json::<RawEmployeeRecord>().await.map_err(transport)
    }

    async fn reviewer_address(&self) -> Result<AccountId, LedgerError> {
        let url = format!("{}/reviewer", self.base);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Transport(format!(
                "reviewer_address failed {status} {body}"
            )));
        }
        let body = resp.json::<ReviewerResponse>().await.map_err(transport)?;
        Ok(AccountId::new(body.reviewer))
    }
}

#[async_trait]
impl LedgerWriter for HttpLedgerClient {
    async fn submit_record(&self, request: &SubmitRecordRequest) -> Result<u64, LedgerError> {
        let url = format!("{}/records", self.base);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Transport(format!(
                "submit_record failed {status} {body}"
            )));
        }
        let body = resp.json::<SubmitResponse>().await.map_err(transport)?;
        debug!(id = body.id, "record submitted");
        Ok(body.id)
    }

    async fn review_record(
        &self,
        id: u64,
        target: RecordStatus,
        reviewer: &AccountId,
    ) -> Result<(), LedgerError> {
        let url = format!("{}/records/{}/review", self.base, id);
        let body = ReviewBody {
            status: target.wire(),
            reviewer: reviewer.as_str(),
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        if status.as_u16() == 404 {
            return Err(LedgerError::NotFound(id));
        }
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Transport(format!(
                "review_record({id}) failed {status} {body}"
            )));
        }
        debug!(id, target = %target, "record reviewed");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FILE STORE GATEWAY
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// File-store gateway client, IPFS-HTTP-API shaped.
#[derive(Clone)]
pub struct HttpFileStore {
    base: String,
    client: Client,
}

impl HttpFileStore {
    pub fn new(base: impl Into<String>, timeout_ms: u64) -> Result<Self, FileStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| FileStoreError::Transport(e.to_string()))?;
        Ok(HttpFileStore {
            base: base.into(),
            client,
        })
    }
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn store(&self, bytes: &[u8]) -> Result<String, FileStoreError> {
        let url = format!("{}/api/v0/add", self.base);
        let resp = self
            .client
            .post(&url)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| FileStoreError::Transport(e.to_string()))?;
        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FileStoreError::Rejected(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FileStoreError::Transport(format!(
                "add failed {status} {body}"
            )));
        }
        let body = resp
            .json::<AddResponse>()
            .await
            .map_err(|e| FileStoreError::Transport(e.to_string()))?;
        debug!(reference = %body.hash, "document stored");
        Ok(body.hash)
    }
}
