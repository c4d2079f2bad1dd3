use thiserror::Error;

/// The only failures a pass propagates. Everything else (missing
/// coordinates, unclassifiable tags, unparseable prices) is recovered
/// per record.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("POI source unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("listing store unreadable: {0}")]
    StoreUnreadable(String),
}
