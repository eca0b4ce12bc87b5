//! Token configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use wlt_types::{Principal, TokenAmount, TokenMetadata};

use crate::TokenError;

/// Configuration for a token instance.
///
/// Can be loaded from a TOML file via [`TokenConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Display name of the token.
    #[serde(default = "default_name")]
    pub name: String,

    /// Ticker symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Display decimals.
    #[serde(default)]
    pub decimals: u8,

    /// Optional cap on total supply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<TokenAmount>,

    /// The principal that deploys and owns the token.
    #[serde(default = "default_owner")]
    pub owner: Principal,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Initial roles and balances, applied by the owner at construction.
    #[serde(default)]
    pub genesis: GenesisConfig,
}

/// State seeded into a fresh token before any caller touches it.
///
/// Applied in field order: admins, minters, whitelist, balances, then the
/// optional phase change. Balances count against the cap.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default)]
    pub kyc_admins: Vec<Principal>,

    #[serde(default)]
    pub minters: Vec<Principal>,

    #[serde(default)]
    pub kyc_listed: Vec<Principal>,

    #[serde(default)]
    pub balances: Vec<GenesisBalance>,

    /// Close minting once genesis balances are in place.
    #[serde(default)]
    pub finish_minting: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub account: Principal,
    pub amount: TokenAmount,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_name() -> String {
    "Whitelist Token".to_string()
}

fn default_symbol() -> String {
    "WLT".to_string()
}

fn default_owner() -> Principal {
    Principal::new("owner")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl TokenConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TokenError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, TokenError> {
        toml::from_str(s).map_err(|e| TokenError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, TokenError> {
        toml::to_string_pretty(self).map_err(|e| TokenError::Config(e.to_string()))
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            cap: self.cap,
        }
    }

    /// Reject malformed principals, metadata and an unknown log format.
    ///
    /// `log_level` filter syntax is checked by `wlt_utils::init_logging`.
    pub fn validate(&self) -> Result<(), TokenError> {
        self.metadata().validate()?;

        let genesis = &self.genesis;
        let principals = std::iter::once(&self.owner)
            .chain(&genesis.kyc_admins)
            .chain(&genesis.minters)
            .chain(&genesis.kyc_listed)
            .chain(genesis.balances.iter().map(|b| &b.account));
        for p in principals {
            if !p.is_valid() {
                return Err(TokenError::Config(format!("invalid principal {:?}", p.as_str())));
            }
        }

        if !matches!(self.log_format.as_str(), "human" | "json") {
            return Err(TokenError::Config(format!(
                "unknown log format {:?}, expected \"human\" or \"json\"",
                self.log_format
            )));
        }
        Ok(())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: 0,
            cap: None,
            owner: default_owner(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            genesis: GenesisConfig::default(),
        }
    }
}
