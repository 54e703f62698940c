use crate::digest;
use crate::error::{ChainError, Result};
use crate::identity::{Identity, IdentityRegistry};
use crate::payload::{PayloadValue, TransactionPayload};
use tracing::{debug, info};

/// Previous-hash sentinel carried by the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Payload description stamped on the genesis block
const GENESIS_DESCRIPTION: &str = "System Generated";

/// A single ledger record.
///
/// Fields are declared in the order they enter the hash preimage, with the
/// hash itself last, so any serialized form stays re-verifiable.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64,
    pub previous_hash: String,
    pub payload: TransactionPayload,
    pub issuer: Identity,
    pub hash: String,
}

impl Block {
    /// Build a block against a known predecessor hash, capturing the
    /// current time and sealing the contents with a digest.
    pub fn new(
        index: u64,
        payload: TransactionPayload,
        previous_hash: String,
        issuer: Identity,
    ) -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis();

        let mut block = Block {
            index,
            timestamp,
            previous_hash,
            payload,
            issuer,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Digest of the block contents in preimage order.
    ///
    /// Verification recomputes this and compares it against the stored
    /// hash; the two diverge exactly when a stored field was altered.
    pub fn compute_hash(&self) -> String {
        let preimage = format!(
            "{}{}{}{}{}{}",
            self.index,
            self.timestamp,
            self.previous_hash,
            self.payload.canonical_string(),
            self.payload.description,
            self.issuer.key
        );
        digest::hash(&preimage)
    }
}

/// An append-only chain of blocks plus the registry of its participants.
///
/// Single-writer by construction: appends take `&mut self` and nothing
/// ever rewrites a stored block. Corrections are appended as new blocks.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Blockchain {
    pub blocks: Vec<Block>,
    pub registry: IdentityRegistry,
}

impl Blockchain {
    /// Create a chain holding the genesis block, issued by the built-in
    /// SYSTEM identity through the normal append path.
    pub fn new() -> Self {
        let mut chain = Blockchain {
            blocks: Vec::new(),
            registry: IdentityRegistry::new(),
        };

        let genesis = TransactionPayload {
            value: PayloadValue::Text("Genesis Block".to_string()),
            description: GENESIS_DESCRIPTION.to_string(),
        };
        chain.append(genesis, &Identity::system());
        chain
    }

    /// Append a payload as a new block issued by `issuer`.
    ///
    /// The new block links to the current tail, or to the `"0"` sentinel
    /// when the chain is still empty (only during construction).
    pub fn append(&mut self, payload: TransactionPayload, issuer: &Identity) {
        let previous_hash = self
            .blocks
            .last()
            .map(|block| block.hash.clone())
            .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string());

        let block = Block::new(
            self.blocks.len() as u64,
            payload,
            previous_hash,
            issuer.clone(),
        );
        debug!(index = block.index, hash = %block.hash, issuer = %block.issuer.key, "appended block");
        self.blocks.push(block);
    }

    /// The tail block, or `None` only before construction completes
    pub fn latest(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Direct lookup by block index; `None` when out of range
    pub fn at(&self, index: u64) -> Option<&Block> {
        self.blocks.get(index as usize)
    }

    /// Blocks in index order, head to tail
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Number of blocks, genesis included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the chain holds no blocks (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Record a correction to an existing block as a new tail block.
    ///
    /// The target block is never touched. The appended record embeds both
    /// the replacement value and the original rendering, names the target
    /// index, and is issued by `modifier`. Reports the target as missing
    /// without mutating the chain when the index is out of range.
    pub fn modify_block_as_new(
        &mut self,
        target_index: u64,
        new_payload: TransactionPayload,
        modifier: &Identity,
    ) -> Result<()> {
        let target = self
            .at(target_index)
            .ok_or(ChainError::BlockNotFound(target_index))?;

        let record = format!(
            "MODIFIED BLOCK {}: {} (Original data: {})",
            target_index,
            new_payload.canonical_string(),
            target.payload.canonical_string()
        );
        let description = format!("Modified by {}", modifier.name);

        info!(index = target_index, modifier = %modifier.key, "recording modification as new block");
        self.append(TransactionPayload::text_lossy(record, description), modifier);
        Ok(())
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
