use std::time::Duration;

use crate::{MediaError, MediaExistence, MediaKind};

/// What one bounded existence check concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeOutcome {
    Present,
    Absent,
    /// Error or timeout: the answer is unknown.
    Failed,
}

pub(crate) async fn probe(
    check: &dyn MediaExistence,
    kind: MediaKind,
    filename: &str,
    timeout: Duration,
) -> ProbeOutcome {
    match tokio::time::timeout(timeout, check.exists(kind, filename)).await {
        Ok(Ok(true)) => ProbeOutcome::Present,
        Ok(Ok(false)) => ProbeOutcome::Absent,
        Ok(Err(err)) if !err.is_infrastructure() => {
            tracing::debug!(%kind, filename, error = %err, "media probe rejected");
            ProbeOutcome::Absent
        }
        Ok(Err(err)) => {
            tracing::debug!(%kind, filename, error = %err, "media probe failed");
            ProbeOutcome::Failed
        }
        Err(_) => {
            let err = MediaError::timeout(timeout);
            tracing::debug!(%kind, filename, error = %err, "media probe failed");
            ProbeOutcome::Failed
        }
    }
}
