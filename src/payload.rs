/// Transaction payloads carried by chain blocks
use crate::error::{ChainError, Result};

/// Maximum length of a text payload value, in characters
pub const MAX_TEXT_LENGTH: usize = 255;

/// The value a block records, tagged by kind
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PayloadValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl PayloadValue {
    /// Parse an integer value from user input
    pub fn parse_integer(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<i64>()
            .map(PayloadValue::Integer)
            .map_err(|_| ChainError::MalformedValue {
                expected: "integer value",
                input: input.to_string(),
            })
    }

    /// Parse a decimal value from user input
    pub fn parse_decimal(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<f64>()
            .map(PayloadValue::Decimal)
            .map_err(|_| ChainError::MalformedValue {
                expected: "decimal value",
                input: input.to_string(),
            })
    }

    /// Canonical string rendering, used for both display and hashing.
    ///
    /// Changing this rendering changes every downstream block hash.
    pub fn canonical_string(&self) -> String {
        match self {
            PayloadValue::Integer(value) => value.to_string(),
            PayloadValue::Decimal(value) => value.to_string(),
            PayloadValue::Text(value) => value.clone(),
        }
    }

    /// Kind tag for display
    pub fn kind(&self) -> &'static str {
        match self {
            PayloadValue::Integer(_) => "integer",
            PayloadValue::Decimal(_) => "decimal",
            PayloadValue::Text(_) => "text",
        }
    }
}

/// A tagged value plus the free-form description recorded alongside it
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransactionPayload {
    pub value: PayloadValue,
    pub description: String,
}

impl TransactionPayload {
    pub fn integer(value: i64, description: String) -> Self {
        TransactionPayload {
            value: PayloadValue::Integer(value),
            description,
        }
    }

    pub fn decimal(value: f64, description: String) -> Self {
        TransactionPayload {
            value: PayloadValue::Decimal(value),
            description,
        }
    }

    /// Build a text payload, rejecting values over [`MAX_TEXT_LENGTH`] characters.
    pub fn text(value: String, description: String) -> Result<Self> {
        let length = value.chars().count();
        if length > MAX_TEXT_LENGTH {
            return Err(ChainError::TextTooLong {
                length,
                max: MAX_TEXT_LENGTH,
            });
        }
        Ok(TransactionPayload {
            value: PayloadValue::Text(value),
            description,
        })
    }

    /// Build a text payload, truncating to capacity instead of rejecting.
    ///
    /// Used for synthesized modification records, which must always fit.
    /// Truncation counts characters, so a multi-byte sequence is never split.
    pub(crate) fn text_lossy(value: String, description: String) -> Self {
        let value = if value.chars().count() > MAX_TEXT_LENGTH {
            value.chars().take(MAX_TEXT_LENGTH).collect()
        } else {
            value
        };
        TransactionPayload {
            value: PayloadValue::Text(value),
            description,
        }
    }

    /// Canonical rendering of the carried value
    pub fn canonical_string(&self) -> String {
        self.value.canonical_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_rendering_per_variant() {
        assert_eq!(PayloadValue::Integer(42).canonical_string(), "42");
        assert_eq!(PayloadValue::Integer(-7).canonical_string(), "-7");
        assert_eq!(PayloadValue::Decimal(2.5).canonical_string(), "2.5");
        assert_eq!(
            PayloadValue::Text("hello world".to_string()).canonical_string(),
            "hello world"
        );
    }

    #[test]
    fn parse_integer_accepts_trimmed_input() {
        assert_eq!(
            PayloadValue::parse_integer(" 42 ").unwrap(),
            PayloadValue::Integer(42)
        );
        assert_eq!(
            PayloadValue::parse_integer("-13").unwrap(),
            PayloadValue::Integer(-13)
        );
    }

    #[test]
    fn parse_integer_rejects_garbage() {
        let err = PayloadValue::parse_integer("forty-two").unwrap_err();
        assert!(matches!(
            err,
            ChainError::MalformedValue {
                expected: "integer value",
                ..
            }
        ));
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert!(PayloadValue::parse_decimal("3.14").is_ok());
        assert!(PayloadValue::parse_decimal("1.2.3").is_err());
        assert!(PayloadValue::parse_decimal("").is_err());
    }

    #[test]
    fn text_at_capacity_is_accepted() {
        let payload =
            TransactionPayload::text("x".repeat(MAX_TEXT_LENGTH), "note".to_string()).unwrap();
        assert_eq!(payload.canonical_string().chars().count(), MAX_TEXT_LENGTH);
    }

    #[test]
    fn text_over_capacity_is_rejected() {
        let err =
            TransactionPayload::text("x".repeat(MAX_TEXT_LENGTH + 1), "note".to_string())
                .unwrap_err();
        assert!(matches!(
            err,
            ChainError::TextTooLong {
                length: 256,
                max: MAX_TEXT_LENGTH
            }
        ));
    }

    #[test]
    fn text_lossy_truncates_without_splitting_chars() {
        let payload = TransactionPayload::text_lossy("é".repeat(300), "note".to_string());
        assert_eq!(payload.canonical_string().chars().count(), MAX_TEXT_LENGTH);
        assert!(payload.canonical_string().chars().all(|c| c == 'é'));
    }
}
