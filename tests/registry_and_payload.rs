//! Integration tests for identity registration and payload handling

use chainbook::blockchain::Blockchain;
use chainbook::error::ChainError;
use chainbook::payload::{PayloadValue, TransactionPayload, MAX_TEXT_LENGTH};

#[test]
fn test_register_verify_lookup_round_trip() {
    let mut chain = Blockchain::new();
    let alice = chain.registry.register("alice");

    // The key embeds the name and is immediately verifiable
    assert!(alice.key.starts_with("alice-"));
    assert!(chain.registry.verify(&alice.key));

    let found = chain.registry.lookup(&alice.key).unwrap();
    assert_eq!(found.name, "alice");

    // Unknown keys are absent, not errors
    assert!(!chain.registry.verify("mallory-0-0"));
    assert!(chain.registry.lookup("mallory-0-0").is_none());
}

#[test]
fn test_registered_identity_is_stamped_on_blocks() {
    let mut chain = Blockchain::new();
    let alice = chain.registry.register("alice");

    chain.append(
        TransactionPayload::integer(7, "lucky".to_string()),
        &alice,
    );

    let block = chain.latest().unwrap();
    assert_eq!(block.issuer, alice);
    assert_eq!(block.payload.description, "lucky");
}

#[test]
fn test_distinct_keys_for_repeated_names() {
    let mut chain = Blockchain::new();
    let first = chain.registry.register("alice");
    let second = chain.registry.register("alice");

    assert_ne!(first.key, second.key);
    assert_eq!(chain.registry.len(), 2);

    // Both identities can issue blocks independently
    chain.append(TransactionPayload::integer(1, String::new()), &first);
    chain.append(TransactionPayload::integer(2, String::new()), &second);
    assert!(chain.verify());
}

#[test]
fn test_text_payload_capacity_is_enforced() {
    let ok = TransactionPayload::text("x".repeat(MAX_TEXT_LENGTH), "note".to_string());
    assert!(ok.is_ok());

    let err =
        TransactionPayload::text("x".repeat(MAX_TEXT_LENGTH + 1), "note".to_string()).unwrap_err();
    assert!(matches!(
        err,
        ChainError::TextTooLong { length: 256, .. }
    ));
}

#[test]
fn test_numeric_parse_errors_are_structured() {
    let err = PayloadValue::parse_integer("not a number").unwrap_err();
    assert!(matches!(err, ChainError::MalformedValue { .. }));
    assert_eq!(
        err.to_string(),
        "invalid integer value: 'not a number'"
    );

    assert!(PayloadValue::parse_decimal("1.2.3").is_err());
    assert_eq!(
        PayloadValue::parse_decimal(" 2.5 ").unwrap(),
        PayloadValue::Decimal(2.5)
    );
}

#[test]
fn test_canonical_rendering_feeds_block_hashes() {
    let mut chain = Blockchain::new();
    let alice = chain.registry.register("alice");

    chain.append(TransactionPayload::integer(42, "n".to_string()), &alice);
    chain.append(TransactionPayload::decimal(2.5, "d".to_string()), &alice);
    chain.append(
        TransactionPayload::text("verbatim text".to_string(), "t".to_string()).unwrap(),
        &alice,
    );

    let renderings: Vec<String> = chain
        .iter()
        .skip(1)
        .map(|block| block.payload.canonical_string())
        .collect();
    assert_eq!(renderings, vec!["42", "2.5", "verbatim text"]);

    // Each hash is the fixed-width digest form
    for block in chain.iter() {
        assert_eq!(block.hash.len(), 16);
        assert!(block.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn test_modification_records_survive_long_originals() {
    let mut chain = Blockchain::new();
    let alice = chain.registry.register("alice");

    chain.append(
        TransactionPayload::text("y".repeat(MAX_TEXT_LENGTH), "long".to_string()).unwrap(),
        &alice,
    );

    // The synthesized record cannot fit both renderings; it is clamped
    // to capacity rather than rejected, so the correction still lands.
    chain
        .modify_block_as_new(
            1,
            TransactionPayload::text("z".repeat(MAX_TEXT_LENGTH), String::new()).unwrap(),
            &alice,
        )
        .unwrap();

    let record = chain.latest().unwrap();
    assert_eq!(
        record.payload.canonical_string().chars().count(),
        MAX_TEXT_LENGTH
    );
    assert!(record
        .payload
        .canonical_string()
        .starts_with("MODIFIED BLOCK 1: "));
    assert!(chain.verify());
}
