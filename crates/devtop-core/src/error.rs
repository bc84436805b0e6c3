use thiserror::Error;

/// Why a device poll produced no records.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Status { program: String, status: String },
}

/// Fatal dashboard errors. Poll failures are not fatal and never show up here.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("terminal error: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
