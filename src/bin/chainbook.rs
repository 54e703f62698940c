#![forbid(unsafe_code)]
//! Interactive append-only ledger simulator.
//!
//! A menu shell over the chainbook library: append entries, inspect and
//! audit the chain, record corrections as new blocks, and manage the
//! participant registry. Every write goes through the session identity
//! registered at startup.

use chainbook::blockchain::Blockchain;
use chainbook::cli;
use chainbook::config::Config;
use chainbook::error::{ChainError, Result};
use chainbook::identity::Identity;
use chainbook::payload::{PayloadValue, TransactionPayload};
use clap::Parser;
use colored::*;
use console::Term;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Interactive append-only ledger simulator", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Session operator name, overriding the configured one
    #[arg(long)]
    operator: Option<String>,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Cli::parse();

    let (mut config, mut chain) = cli::load_ledger(&args.config)?;
    if let Some(operator) = args.operator {
        if operator.trim().is_empty() {
            return Err(ChainError::ConfigError("operator must not be empty".to_string()).into());
        }
        config.session.operator = operator;
    }
    colored::control::set_override(config.display.color);

    let session = chain.registry.register(&config.session.operator);

    let term = Term::stdout();
    run(&term, &config, &mut chain, &session)?;
    Ok(())
}

fn run(term: &Term, config: &Config, chain: &mut Blockchain, session: &Identity) -> Result<()> {
    banner(term)?;
    term.write_line(&format!(
        "{}",
        format!("Session operator: {} ({})", session.name, session.key).cyan()
    ))?;

    loop {
        menu(term)?;
        let choice = cli::prompt(term, "\n\nEnter your choice (1-9): ")?;

        match choice.as_str() {
            "1" => add_entry(term, chain, session)?,
            "2" => view_ledger(term, config, chain)?,
            "3" => validate_ledger(term, chain)?,
            "4" => view_block(term, config, chain)?,
            "5" => modify_block(term, chain, session)?,
            "6" => register_participant(term, chain)?,
            "7" => list_participants(term, chain)?,
            "8" => export_json(term, chain)?,
            "9" => {
                term.write_line(&format!(
                    "{}",
                    "\nThank you for using the ledger simulator. Goodbye!".magenta()
                ))?;
                return Ok(());
            }
            _ => {
                term.write_line(&format!("{}", "\nInvalid choice!".red()))?;
                pause(term)?;
            }
        }
    }
}

fn banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    term.write_line(&format!(
        "{}",
        "---------------------------------------------------".magenta()
    ))?;
    term.write_line(&format!(
        "{}",
        "     |             LEDGER SIMULATOR              |".magenta()
    ))?;
    term.write_line(&format!(
        "{}",
        "---------------------------------------------------".magenta()
    ))?;
    Ok(())
}

fn menu(term: &Term) -> Result<()> {
    term.write_str(&format!(
        "{}",
        "\n1. Add new entry\
         \n2. View ledger\
         \n3. Validate ledger\
         \n4. View specific block\
         \n5. Modify block (as new block)\
         \n6. Register participant\
         \n7. List participants\
         \n8. Export ledger (JSON)\
         \n9. Exit"
            .yellow()
    ))?;
    Ok(())
}

fn read_value(term: &Term, kind: &str) -> Result<PayloadValue> {
    match kind {
        "i" | "integer" => {
            let raw = cli::prompt(term, "Enter integer value: ")?;
            PayloadValue::parse_integer(&raw)
        }
        "d" | "decimal" => {
            let raw = cli::prompt(term, "Enter decimal value: ")?;
            PayloadValue::parse_decimal(&raw)
        }
        "t" | "text" => {
            let raw = cli::prompt(term, "Enter text value: ")?;
            Ok(PayloadValue::Text(raw))
        }
        other => Err(ChainError::MalformedValue {
            expected: "entry kind (i, d or t)",
            input: other.to_string(),
        }),
    }
}

fn build_payload(term: &Term) -> Result<TransactionPayload> {
    let kind = cli::prompt(term, "\nEntry kind - (i)nteger, (d)ecimal or (t)ext: ")?.to_lowercase();
    let value = read_value(term, kind.as_str())?;
    let description = cli::prompt(term, "Enter description: ")?;

    match value {
        PayloadValue::Text(text) => TransactionPayload::text(text, description),
        value => Ok(TransactionPayload { value, description }),
    }
}

fn add_entry(term: &Term, chain: &mut Blockchain, session: &Identity) -> Result<()> {
    match build_payload(term) {
        Ok(payload) => {
            chain.append(payload, session);
            term.write_line(&format!("{}", "\n => Entry added successfully!".green()))?;
        }
        Err(err) => {
            term.write_line(&format!("{}", format!("\n => {}", err).red()))?;
        }
    }
    pause(term)
}

fn view_ledger(term: &Term, config: &Config, chain: &Blockchain) -> Result<()> {
    term.write_line("\nCurrent Ledger State:")?;
    term.write_line(&cli::chain_table(chain, config.display.hash_preview).to_string())?;
    pause(term)
}

fn validate_ledger(term: &Term, chain: &Blockchain) -> Result<()> {
    match chain.audit() {
        Ok(()) => {
            term.write_line(&format!("{}", "\n => Ledger is valid and secure!".green()))?;
        }
        Err(err) => {
            term.write_line(&format!(
                "{}",
                format!("\n => WARNING: ledger has been tampered with ({})", err).red()
            ))?;
        }
    }
    pause(term)
}

fn view_block(term: &Term, config: &Config, chain: &Blockchain) -> Result<()> {
    let raw = cli::prompt(term, "\nEnter block index to view: ")?;
    match parse_index(&raw) {
        Ok(index) => match chain.at(index) {
            Some(block) => {
                term.write_line(&cli::block_card(block, config.display.hash_preview))?;
            }
            None => {
                term.write_line(&format!(
                    "{}",
                    format!("\nBlock not found at index {}", index).red()
                ))?;
            }
        },
        Err(err) => {
            term.write_line(&format!("{}", format!("\n => {}", err).red()))?;
        }
    }
    pause(term)
}

fn modify_block(term: &Term, chain: &mut Blockchain, session: &Identity) -> Result<()> {
    let raw = cli::prompt(term, "\nEnter block index to modify: ")?;
    let index = match parse_index(&raw) {
        Ok(index) => index,
        Err(err) => {
            term.write_line(&format!("{}", format!("\n => {}", err).red()))?;
            return pause(term);
        }
    };

    match chain.at(index) {
        Some(block) => {
            term.write_line(&format!(
                "\nCurrent block data: {}",
                block.payload.canonical_string()
            ))?;
        }
        None => {
            term.write_line(&format!(
                "{}",
                format!("\nBlock not found at index {}", index).red()
            ))?;
            return pause(term);
        }
    }

    let kind =
        cli::prompt(term, "\nNew value kind - (i)nteger, (d)ecimal or (t)ext: ")?.to_lowercase();
    let outcome = read_value(term, kind.as_str()).and_then(|value| {
        // The ledger synthesizes the correction record's description itself.
        let replacement = TransactionPayload {
            value,
            description: String::new(),
        };
        chain.modify_block_as_new(index, replacement, session)
    });

    match outcome {
        Ok(()) => {
            term.write_line(&format!(
                "{}",
                "\n => Modification added as new block!".green()
            ))?;
        }
        Err(err) => {
            term.write_line(&format!("{}", format!("\n => {}", err).red()))?;
        }
    }
    pause(term)
}

fn register_participant(term: &Term, chain: &mut Blockchain) -> Result<()> {
    let name = cli::prompt(term, "\nEnter participant name: ")?;
    if name.is_empty() {
        term.write_line(&format!("{}", "\n => Name must not be empty!".red()))?;
        return pause(term);
    }

    let identity = chain.registry.register(&name);
    term.write_line(&format!(
        "{}",
        format!(
            "\n => Registered {} with key {}",
            identity.name, identity.key
        )
        .green()
    ))?;
    pause(term)
}

fn list_participants(term: &Term, chain: &Blockchain) -> Result<()> {
    if chain.registry.is_empty() {
        term.write_line(&format!("{}", "\nNo participants registered yet.".yellow()))?;
    } else {
        term.write_line("\nRegistered Participants:")?;
        term.write_line(&cli::participants_table(&chain.registry).to_string())?;
    }
    pause(term)
}

fn export_json(term: &Term, chain: &Blockchain) -> Result<()> {
    term.write_line(&cli::chain_to_json(chain)?)?;
    pause(term)
}

fn parse_index(input: &str) -> Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| ChainError::MalformedValue {
            expected: "block index",
            input: input.to_string(),
        })
}

fn pause(term: &Term) -> Result<()> {
    term.write_line("\nPress Enter to continue...")?;
    term.read_line()?;
    Ok(())
}
