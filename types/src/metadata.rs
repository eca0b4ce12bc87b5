//! Descriptive token metadata and the optional supply cap.

use serde::{Deserialize, Serialize};

use crate::amount::TokenAmount;
use crate::error::TypesError;

/// Maximum length of the token name in bytes.
pub const MAX_NAME_LEN: usize = 64;
/// Maximum length of the token symbol in bytes.
pub const MAX_SYMBOL_LEN: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Display name, e.g. "Stellerro Spain Token".
    pub name: String,
    /// Ticker symbol, e.g. "STRO".
    pub symbol: String,
    /// Number of decimal places used for display.
    pub decimals: u8,
    /// Upper bound on total supply, if any.
    pub cap: Option<TokenAmount>,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            cap: None,
        }
    }

    pub fn with_cap(mut self, cap: TokenAmount) -> Self {
        self.cap = Some(cap);
        self
    }

    pub fn validate(&self) -> Result<(), TypesError> {
        if self.name.len() > MAX_NAME_LEN {
            return Err(TypesError::InvalidMetadata(format!(
                "name longer than {MAX_NAME_LEN} bytes"
            )));
        }
        if self.symbol.is_empty() || self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(TypesError::InvalidMetadata(format!(
                "symbol must be 1..={MAX_SYMBOL_LEN} bytes"
            )));
        }
        if self.cap == Some(TokenAmount::ZERO) {
            return Err(TypesError::InvalidMetadata("cap must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self::new("Whitelist Token", "WLT", 0)
    }
}
