//! The phase/pause state machine.

use wlt_access::AccessRegistry;
use wlt_types::{LifecyclePhase, PauseState, Principal};

use crate::error::LifecycleError;

#[derive(Clone, Debug, Default)]
pub struct LifecycleGuard {
    phase: LifecyclePhase,
    pause: PauseState,
}

impl LifecycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause
    }

    pub fn minting_finished(&self) -> bool {
        self.phase == LifecyclePhase::Finished
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Close minting for good. Owner only.
    pub fn finish_minting(
        &mut self,
        access: &AccessRegistry,
        caller: &Principal,
    ) -> Result<(), LifecycleError> {
        access.require_owner(caller)?;
        match self.phase {
            LifecyclePhase::Finished => Err(LifecycleError::AlreadyFinished),
            LifecyclePhase::Minting => {
                self.phase = LifecyclePhase::Finished;
                tracing::info!(by = %caller, "minting finished");
                Ok(())
            }
        }
    }

    /// Owner only. Pausing an already paused token is rejected.
    pub fn pause(&mut self, access: &AccessRegistry, caller: &Principal) -> Result<(), LifecycleError> {
        access.require_owner(caller)?;
        if self.is_paused() {
            return Err(LifecycleError::AlreadyPaused);
        }
        self.pause = PauseState::Paused;
        tracing::info!(by = %caller, "token paused");
        Ok(())
    }

    /// Owner only. Unpausing an active token is rejected.
    pub fn unpause(
        &mut self,
        access: &AccessRegistry,
        caller: &Principal,
    ) -> Result<(), LifecycleError> {
        access.require_owner(caller)?;
        if !self.is_paused() {
            return Err(LifecycleError::NotPaused);
        }
        self.pause = PauseState::Active;
        tracing::info!(by = %caller, "token unpaused");
        Ok(())
    }

    // ── Guards ─────────────────────────────────────────────────────────

    pub fn require_active(&self) -> Result<(), LifecycleError> {
        if self.is_paused() {
            Err(LifecycleError::ContractPaused)
        } else {
            Ok(())
        }
    }

    pub fn require_minting_open(&self) -> Result<(), LifecycleError> {
        if self.phase.allows_minting() {
            Ok(())
        } else {
            Err(LifecycleError::MintingClosed)
        }
    }

    pub fn require_minting_finished(&self) -> Result<(), LifecycleError> {
        if self.phase.allows_transfers() {
            Ok(())
        } else {
            Err(LifecycleError::MintingNotFinished)
        }
    }

    /// Phase then pause, the gate shared by the transfer family.
    pub fn require_transfers_open(&self) -> Result<(), LifecycleError> {
        self.require_minting_finished()?;
        self.require_active()
    }
}
