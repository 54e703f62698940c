//! Shared helpers for the chainbook binaries.
//!
//! Everything here renders to strings or tables; the library core never
//! prints. Binaries drive [`Blockchain::iter`] through these helpers and
//! decide where the output goes.

use crate::blockchain::{Block, Blockchain};
use crate::config::{load_config_from, Config};
use crate::error::Result;
use crate::identity::IdentityRegistry;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use console::Term;
use std::path::Path;

/// Load configuration and create the session ledger it describes.
pub fn load_ledger(config_path: &Path) -> Result<(Config, Blockchain)> {
    let config = load_config_from(config_path)?;
    let chain = Blockchain::new();
    Ok((config, chain))
}

/// Truncate a hash for display, keeping the leading characters
pub fn short_hash(hash: &str, preview: usize) -> String {
    if hash.len() > preview {
        format!("{}...", &hash[..preview])
    } else {
        hash.to_string()
    }
}

/// Render an epoch-milliseconds timestamp as a UTC calendar string
pub fn format_timestamp(timestamp_millis: i64) -> String {
    use chrono::DateTime;

    if let Some(dt) = DateTime::from_timestamp_millis(timestamp_millis) {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        "Invalid".to_string()
    }
}

/// Render the whole ledger as a table, genesis first
pub fn chain_table(chain: &Blockchain, hash_preview: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Block")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Kind")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Value")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Description")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Issuer")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Hash")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Date")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

    for block in chain.iter() {
        table.add_row(vec![
            Cell::new(format!("#{}", block.index)).fg(TableColor::White),
            Cell::new(block.payload.value.kind()).fg(TableColor::Magenta),
            Cell::new(block.payload.canonical_string()).fg(TableColor::White),
            Cell::new(&block.payload.description).fg(TableColor::Grey),
            Cell::new(&block.issuer.name).fg(TableColor::Yellow),
            Cell::new(short_hash(&block.hash, hash_preview)).fg(TableColor::Green),
            Cell::new(format_timestamp(block.timestamp)).fg(TableColor::Grey),
        ]);
    }
    table
}

/// Render one block as a bordered detail card
pub fn block_card(block: &Block, hash_preview: usize) -> String {
    let mut card = String::new();
    card.push_str(&format!(
        "{}\n",
        format!(
            "-------------------- Block #{} --------------------",
            block.index
        )
        .bright_blue()
    ));
    card.push_str(&format!(
        "{}\n",
        format!(
            "| Value ({}): {}",
            block.payload.value.kind(),
            block.payload.canonical_string()
        )
        .yellow()
    ));
    card.push_str(&format!(
        "{}\n",
        format!("| Description: {}", block.payload.description).yellow()
    ));
    card.push_str(&format!(
        "{}\n",
        format!("| Issuer: {} ({})", block.issuer.name, block.issuer.key).green()
    ));
    card.push_str(&format!(
        "{}\n",
        format!("| Timestamp: {}", format_timestamp(block.timestamp)).green()
    ));
    card.push_str(&format!(
        "{}\n",
        format!(
            "| Previous Hash: {}",
            short_hash(&block.previous_hash, hash_preview)
        )
        .bright_blue()
    ));
    card.push_str(&format!(
        "{}\n",
        format!("| Current Hash:  {}", short_hash(&block.hash, hash_preview)).bright_blue()
    ));
    card.push_str(&format!(
        "{}",
        "------------------------------------------------".bright_blue()
    ));
    card
}

/// Render the registered participants as a table, sorted by name
pub fn participants_table(registry: &IdentityRegistry) -> Table {
    let mut identities: Vec<_> = registry.identities().collect();
    identities.sort_by(|a, b| a.name.cmp(&b.name).then(a.key.cmp(&b.key)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Key")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Registered")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

    for identity in identities {
        table.add_row(vec![
            Cell::new(&identity.name).fg(TableColor::Yellow),
            Cell::new(&identity.key).fg(TableColor::Green),
            Cell::new(format_timestamp(identity.issued_at)).fg(TableColor::Grey),
        ]);
    }
    table
}

/// Serialize the whole ledger, registry included, as pretty JSON
pub fn chain_to_json(chain: &Blockchain) -> Result<String> {
    Ok(serde_json::to_string_pretty(chain)?)
}

/// Prompt on the given terminal and read one trimmed line
pub fn prompt(term: &Term, label: &str) -> Result<String> {
    term.write_str(&format!("{}", label.yellow()))?;
    let line = term.read_line()?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_truncates_long_hashes() {
        assert_eq!(short_hash("0123456789abcdef", 8), "01234567...");
        assert_eq!(short_hash("abc", 8), "abc");
        assert_eq!(short_hash("0", 12), "0");
    }

    #[test]
    fn format_timestamp_renders_epoch() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn block_card_shows_payload_and_issuer() {
        let chain = Blockchain::new();
        let genesis = chain.latest().unwrap();
        let card = block_card(genesis, 12);

        assert!(card.contains("Block #0"));
        assert!(card.contains("Genesis Block"));
        assert!(card.contains("SYSTEM"));
    }

    #[test]
    fn chain_table_lists_every_block() {
        let mut chain = Blockchain::new();
        let alice = chain.registry.register("alice");
        chain.append(
            crate::payload::TransactionPayload::integer(42, "test".to_string()),
            &alice,
        );

        let rendered = chain_table(&chain, 12).to_string();
        assert!(rendered.contains("Genesis Block"));
        assert!(rendered.contains("42"));
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn exported_json_reloads_into_an_intact_chain() {
        let mut chain = Blockchain::new();
        let alice = chain.registry.register("alice");
        chain.append(
            crate::payload::TransactionPayload::integer(42, "test".to_string()),
            &alice,
        );

        let json = chain_to_json(&chain).unwrap();
        let reloaded: Blockchain = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.verify());
        assert!(reloaded.registry.verify(&alice.key));
    }
}
