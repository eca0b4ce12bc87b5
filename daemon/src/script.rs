//! Operation scripts: an ordered list of `(caller, operation)` steps.
//!
//! ```toml
//! [[step]]
//! caller = "owner"
//! op = "mint"
//! to = "alice"
//! amount = 200
//!
//! [[step]]
//! caller = "alice"
//! op = "transfer"
//! to = "bob"
//! amount = 50
//! expect_error = "minting_not_finished"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use wlt_token::{Operation, TokenService};
use wlt_types::{Principal, TokenEvent};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub step: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Step {
    pub caller: Principal,
    #[serde(flatten)]
    pub op: Operation,
    /// Error kind the step is expected to fail with (snake_case).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<String>,
}

impl Script {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read script {}: {e}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let script: Script = toml::from_str(s)?;
        for (i, step) in script.step.iter().enumerate() {
            if !step.caller.is_valid() {
                anyhow::bail!("step {i}: invalid caller {:?}", step.caller.as_str());
            }
            if let Some(bad) = step.op.principals().into_iter().find(|p| !p.is_valid()) {
                anyhow::bail!("step {i} ({}): invalid principal {:?}", step.op.name(), bad.as_str());
            }
        }
        Ok(script)
    }
}

/// Outcome of replaying a script.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Steps that succeeded as expected.
    pub applied: usize,
    /// Steps that failed with the expected error.
    pub rejected: usize,
    /// Steps whose outcome differed from the script's expectation.
    pub mismatches: Vec<String>,
    /// Events from every successful step, in order.
    pub events: Vec<TokenEvent>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Apply every step of `script` to `token` in order.
///
/// With `fail_fast`, stops at the first mismatch and returns it as an error.
pub fn replay(token: &mut TokenService, script: &Script, fail_fast: bool) -> anyhow::Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (i, step) in script.step.iter().enumerate() {
        let outcome = token.apply(&step.caller, &step.op);
        let mismatch = match (outcome, step.expect_error.as_deref()) {
            (Ok(events), None) => {
                tracing::info!(step = i, op = step.op.name(), caller = %step.caller, "step applied");
                report.applied += 1;
                report.events.extend(events);
                None
            }
            (Ok(_), Some(expected)) => Some(format!(
                "step {i} ({}): expected {expected}, but it succeeded",
                step.op.name()
            )),
            (Err(err), Some(expected)) if err.kind().as_str() == expected => {
                tracing::info!(step = i, op = step.op.name(), error = %err, "step rejected as expected");
                report.rejected += 1;
                None
            }
            (Err(err), expected) => Some(format!(
                "step {i} ({}): failed with {} ({err}), expected {}",
                step.op.name(),
                err.kind(),
                expected.unwrap_or("success")
            )),
        };

        if let Some(message) = mismatch {
            tracing::warn!("{message}");
            if fail_fast {
                anyhow::bail!(message);
            }
            report.mismatches.push(message);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wlt_types::{TokenAmount, TokenMetadata};

    const SCENARIO: &str = r#"
        [[step]]
        caller = "owner"
        op = "add_kyc_listed"
        account = "alice"

        [[step]]
        caller = "owner"
        op = "add_kyc_listed"
        account = "bob"

        [[step]]
        caller = "owner"
        op = "mint"
        to = "alice"
        amount = 200

        [[step]]
        caller = "owner"
        op = "mint"
        to = "bob"
        amount = 100

        [[step]]
        caller = "owner"
        op = "finish_minting"

        [[step]]
        caller = "owner"
        op = "pause"

        [[step]]
        caller = "alice"
        op = "transfer"
        to = "bob"
        amount = 100
        expect_error = "contract_paused"

        [[step]]
        caller = "owner"
        op = "unpause"

        [[step]]
        caller = "alice"
        op = "transfer"
        to = "bob"
        amount = 100
    "#;

    fn token() -> TokenService {
        TokenService::new(Principal::new("owner"), TokenMetadata::default())
    }

    #[test]
    fn replays_pause_scenario() {
        let script = Script::from_toml_str(SCENARIO).unwrap();
        let mut token = token();
        let report = replay(&mut token, &script, true).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.applied, 8);
        assert_eq!(report.rejected, 1);
        assert_eq!(token.balance_of(&Principal::new("alice")), TokenAmount::new(100));
        assert_eq!(token.balance_of(&Principal::new("bob")), TokenAmount::new(200));
    }

    #[test]
    fn unexpected_failure_is_a_mismatch() {
        let script = Script::from_toml_str(
            r#"
            [[step]]
            caller = "stranger"
            op = "mint"
            to = "stranger"
            amount = 1
            "#,
        )
        .unwrap();

        let report = replay(&mut token(), &script, false).unwrap();
        assert_eq!(report.mismatches.len(), 1);
        assert!(report.mismatches[0].contains("unauthorized"));

        assert!(replay(&mut token(), &script, true).is_err());
    }

    #[test]
    fn unexpected_success_is_a_mismatch() {
        let script = Script::from_toml_str(
            r#"
            [[step]]
            caller = "owner"
            op = "pause"
            expect_error = "unauthorized"
            "#,
        )
        .unwrap();
        let report = replay(&mut token(), &script, false).unwrap();
        assert!(!report.is_clean());
    }

    #[test]
    fn rejects_invalid_caller() {
        let result = Script::from_toml_str(
            r#"
            [[step]]
            caller = ""
            op = "pause"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_operand_principals() {
        let empty_target = Script::from_toml_str(
            r#"
            [[step]]
            caller = "owner"
            op = "mint"
            to = ""
            amount = 1
            "#,
        );
        assert!(empty_target.is_err());

        let spaced_source = Script::from_toml_str(
            r#"
            [[step]]
            caller = "owner"
            op = "restore_tokens"
            from = "lost key"
            to = "alice"
            "#,
        );
        let err = spaced_source.unwrap_err().to_string();
        assert!(err.contains("restore_tokens"));
        assert!(err.contains("lost key"));
    }
}
