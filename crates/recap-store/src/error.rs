use std::path::PathBuf;
use thiserror::Error;

/// Failures of the dedup state file that must abort the invocation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The fingerprint file could not be written back. Without it the next
    /// pass would re-report everything.
    #[error("cannot write dedup state {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
