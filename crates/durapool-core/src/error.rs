use std::fmt;
use std::io;
use thiserror::Error;

/// The storage operation that was in progress when a store error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStep {
    OpenEnvironment,
    BeginTransaction,
    CreateBucket,
    ReadSequence,
    WriteSequence,
    OpenCursor,
    ReadRecord,
    WriteRecord,
    DeleteRecord,
    Commit,
}

impl fmt::Display for StoreStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            StoreStep::OpenEnvironment => "open environment",
            StoreStep::BeginTransaction => "begin transaction",
            StoreStep::CreateBucket => "create bucket",
            StoreStep::ReadSequence => "read sequence",
            StoreStep::WriteSequence => "write sequence",
            StoreStep::OpenCursor => "open cursor",
            StoreStep::ReadRecord => "read record",
            StoreStep::WriteRecord => "write record",
            StoreStep::DeleteRecord => "delete record",
            StoreStep::Commit => "commit",
        };
        f.write_str(step)
    }
}

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Store error during {step}: {source}")]
    Store {
        step: StoreStep,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PoolError {
    /// Wrap a backend error with the step that produced it.
    pub fn store<E>(step: StoreStep, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PoolError::Store {
            step,
            source: Box::new(source),
        }
    }

    /// The failing step, if this is a store error.
    pub fn step(&self) -> Option<StoreStep> {
        match self {
            PoolError::Store { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn is_codec(&self) -> bool {
        matches!(self, PoolError::Codec(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, PoolError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;
