// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote check-in submission interface.
//!
//! [`CheckinApi`] is the seam between the sync layer and the network:
//! the coordinator and capture service only ever see the trait, so tests
//! substitute a mock and production wires in [`HttpCheckinApi`].

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use gl_core::CheckinRecord;
use serde::Serialize;

use crate::config::ApiConfig;

/// Error type for remote submission.
///
/// Every variant is retryable: the record stays pending and the next
/// sweep tries again.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("submission timed out")]
    Timeout,

    #[error("server rejected submission: status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Result type for remote submission.
pub type ApiResult<T> = Result<T, ApiError>;

/// One check-in as submitted to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinSubmission {
    pub registration_id: String,
    pub ticket_id: String,
    pub user_id: String,
    pub event_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<&CheckinRecord> for CheckinSubmission {
    fn from(record: &CheckinRecord) -> Self {
        CheckinSubmission {
            registration_id: record.registration_id.clone(),
            ticket_id: record.ticket_id.clone(),
            user_id: record.user_id.clone(),
            event_id: record.event_id.clone(),
            occurred_at: record.occurred_at,
        }
    }
}

/// Remote check-in endpoint.
///
/// The endpoint is assumed idempotent: submitting an already-recorded
/// check-in again must be a no-op success, so a sweep re-run after a
/// crash can never leave a record stuck pending.
pub trait CheckinApi: Send + Sync {
    /// Submit one check-in to the remote service.
    fn submit(
        &self,
        submission: CheckinSubmission,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>>;
}

/// HTTP implementation posting submissions to the check-ins endpoint.
///
/// Injects the service API key as `x-api-key` on every request and a
/// bearer token when an operator session is active. Token acquisition
/// and refresh happen elsewhere; this client only carries what it is
/// given.
pub struct HttpCheckinApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bearer_token: Option<String>,
}

impl HttpCheckinApi {
    /// Build a client from the API configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.submit_timeout())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpCheckinApi {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Replace the bearer token carried on subsequent requests.
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    fn checkins_url(&self) -> String {
        format!("{}/checkins", self.base_url)
    }
}

impl CheckinApi for HttpCheckinApi {
    fn submit(
        &self,
        submission: CheckinSubmission,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        Box::pin(async move {
            let mut request = self
                .client
                .post(self.checkins_url())
                .header("x-api-key", &self.api_key)
                .json(&submission);

            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) if e.is_timeout() => return Err(ApiError::Timeout),
                Err(e) => return Err(ApiError::Network(e.to_string())),
            };

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }

            // 409 means this check-in is already recorded server-side;
            // the sweep treats that as a confirmed submission.
            if status == reqwest::StatusCode::CONFLICT {
                tracing::debug!(
                    registration_id = %submission.registration_id,
                    "check-in already recorded remotely"
                );
                return Ok(());
            }

            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        })
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
