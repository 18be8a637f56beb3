//! Raw user input and its conversion into a `TokenSpec`

use serde::{Deserialize, Serialize};

use crate::core::{defaults, SdkError, SdkResult, TokenSpec};

/// How the initial supply text is parsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupplyParsing {
    /// Anything other than a plain non-negative integer is rejected
    #[default]
    Strict,
    /// Leading digits are taken and anything unparseable becomes zero
    Lenient,
}

impl SupplyParsing {
    pub fn parse(&self, input: &str) -> SdkResult<u64> {
        match self {
            SupplyParsing::Strict => parse_strict(input),
            SupplyParsing::Lenient => Ok(parse_lenient(input)),
        }
    }
}

fn parse_strict(input: &str) -> SdkResult<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SdkError::MalformedInput(
            "initial supply is empty".to_string(),
        ));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SdkError::MalformedInput(format!(
            "initial supply '{}' is not a non-negative integer",
            trimmed
        )));
    }
    trimmed.parse::<u64>().map_err(|e| {
        SdkError::MalformedInput(format!("initial supply '{}' out of range: {}", trimmed, e))
    })
}

// Leading run of ASCII digits after an optional '+', saturating on
// overflow. A minus sign, an empty string or a non-digit prefix all yield
// zero.
fn parse_lenient(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    digits
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

/// Unparsed token input as entered by a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub description: String,
    pub decimals: String,
    pub initial_supply: String,
    pub mintable: bool,
}

impl Default for TokenForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            uri: defaults::URI.to_string(),
            description: String::new(),
            decimals: defaults::DECIMALS.to_string(),
            initial_supply: defaults::INITIAL_SUPPLY.to_string(),
            mintable: defaults::MINTABLE,
        }
    }
}

impl TokenForm {
    /// Freeze the form into an immutable spec.
    ///
    /// Supply is only parsed when the token is mintable; a non-mintable
    /// token never issues supply so its supply text is ignored.
    pub fn into_spec(self, parsing: SupplyParsing) -> SdkResult<TokenSpec> {
        let decimals = self.decimals.trim().parse::<u8>().map_err(|e| {
            SdkError::MalformedInput(format!("decimals '{}': {}", self.decimals, e))
        })?;

        let initial_supply = if self.mintable {
            parsing.parse(&self.initial_supply)?
        } else {
            0
        };

        Ok(TokenSpec {
            name: self.name,
            symbol: self.symbol,
            uri: self.uri,
            description: self.description,
            decimals,
            initial_supply,
            mintable: self.mintable,
        })
    }
}
