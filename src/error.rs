//! Error taxonomy for inventory collection and report assembly.
//!
//! None of these are fatal to a run. Enumeration errors turn into an empty
//! contribution for one subscription, record errors drop one record, and sink
//! errors leave the computed report intact. They travel back to the caller as
//! diagnostics and are logged there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable so a cached inventory keeps the trace of what it left out.
#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum VnetError {
    /// Subscription is visible to the tenant but not readable by the caller.
    #[error("no read access to subscription {subscription_id}: {message}")]
    AccessDenied {
        subscription_id: String,
        message: String,
    },

    #[error("api call failed for subscription {subscription_id}: {message}")]
    TransientApi {
        subscription_id: String,
        message: String,
    },

    /// A record the inventory layer handed us that can't be interpreted.
    #[error("malformed record {record}: {message}")]
    MalformedRecord { record: String, message: String },

    #[error("failed writing {sink}: {message}")]
    SinkWrite { sink: String, message: String },
}

impl VnetError {
    pub fn malformed(record: impl Into<String>, message: impl Into<String>) -> Self {
        VnetError::MalformedRecord {
            record: record.into(),
            message: message.into(),
        }
    }

    pub fn sink(sink: impl Into<String>, message: impl std::fmt::Display) -> Self {
        VnetError::SinkWrite {
            sink: sink.into(),
            message: message.to_string(),
        }
    }

    /// A failure that may go away on the next attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, VnetError::TransientApi { .. })
    }
}

/// Route diagnostics to the log, one line each.
pub fn log_diagnostics(diagnostics: &[VnetError]) {
    for d in diagnostics {
        match d {
            VnetError::AccessDenied { .. } | VnetError::MalformedRecord { .. } => {
                log::warn!("{d}")
            }
            VnetError::TransientApi { .. } | VnetError::SinkWrite { .. } => log::error!("{d}"),
        }
    }
}
