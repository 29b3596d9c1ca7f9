use thiserror::Error;

/// The task/user storage collaborator could not be reached or the query
/// failed. The notification endpoint converts this into a failure envelope;
/// the reminder scan logs it and skips the tick.
#[derive(Debug, Error)]
#[error("storage unavailable: {0}")]
pub struct StoreError(pub String);

/// A single outbound email send failed. Isolated per task, never aborts the
/// rest of a reminder scan.
#[derive(Debug, Error)]
#[error("email delivery failed: {0}")]
pub struct EmailError(pub String);
