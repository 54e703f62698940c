//! Chain integrity verification.
//!
//! Walks consecutive block pairs from genesis to tail. For each pair the
//! current block's stored hash is recomputed first, then its linkage to
//! the predecessor is checked; the walk stops at the first violation.
//! Tampering that recomputes a consistent hash is out of scope: the chain
//! models tamper evidence, not tamper resistance.

use crate::blockchain::chain::{Block, Blockchain};
use crate::error::{ChainError, Result};
use tracing::warn;

impl Blockchain {
    /// Whether every block still matches its stored hash and linkage.
    ///
    /// Chains of length zero or one are trivially intact.
    pub fn verify(&self) -> bool {
        self.audit().is_ok()
    }

    /// Like [`Blockchain::verify`], but names the first violation found
    pub fn audit(&self) -> Result<()> {
        for pair in self.blocks.windows(2) {
            check_pair(&pair[0], &pair[1])?;
        }
        Ok(())
    }
}

fn check_pair(previous: &Block, current: &Block) -> Result<()> {
    if current.hash != current.compute_hash() {
        warn!(index = current.index, "block contents no longer match stored hash");
        return Err(ChainError::HashMismatch {
            index: current.index,
        });
    }

    if current.previous_hash != previous.hash {
        warn!(index = current.index, "block does not link to its predecessor");
        return Err(ChainError::BrokenLink {
            index: current.index,
        });
    }

    Ok(())
}
