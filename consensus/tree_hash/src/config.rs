use serde::{Deserialize, Serialize};

/// Reductions over fewer input chunks than this are always hashed on the calling thread.
pub const DEFAULT_PARALLELIZATION_THRESHOLD: usize = 5_000;

/// Tunables for a `Merkleizer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerkleizerConfig {
    /// Minimum number of input chunks before a reduction is split across workers.
    pub parallelization_threshold: usize,
    /// Number of workers for parallel reductions. `None` selects one less than the available
    /// parallelism (minimum one). `Some(0)` disables parallel reduction.
    pub workers: Option<usize>,
}

impl Default for MerkleizerConfig {
    fn default() -> Self {
        Self {
            parallelization_threshold: DEFAULT_PARALLELIZATION_THRESHOLD,
            workers: None,
        }
    }
}

impl MerkleizerConfig {
    /// Returns the number of workers a parallel reduction will use.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .saturating_sub(1)
                .max(1)
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.parallelization_threshold < 2 {
            return Err(format!(
                "parallelization_threshold must be at least 2, not {}",
                self.parallelization_threshold
            ));
        }
        if self.parallelization_threshold % 2 != 0 {
            return Err(format!(
                "parallelization_threshold must be even, not {}",
                self.parallelization_threshold
            ));
        }
        Ok(())
    }
}
