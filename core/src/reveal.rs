use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Covered,
    Revealed,
}

impl RevealState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// One-way `Covered -> Revealed` commit rule.
///
/// A fresh machine is built per session; there is no transition back.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealMachine {
    state: RevealState,
    threshold: f64,
}

impl RevealMachine {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: RevealState::Covered,
            threshold,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feeds one coverage sample. Returns `true` only on the sample that
    /// commits the reveal, after wiping whatever is left of the mask.
    pub fn apply_sample<S: DrawSurface + ?Sized>(&mut self, fraction: f64, surface: &mut S) -> bool {
        if self.state.is_revealed() || !(fraction >= self.threshold) {
            return false;
        }

        if let Err(err) = surface.clear() {
            log::trace!("leftover mask not cleared: {}", err);
        }
        self.state = RevealState::Revealed;
        log::debug!("revealed at {:.3} erased", fraction);
        true
    }
}

impl Default for RevealMachine {
    fn default() -> Self {
        Self::new(ScratchConfig::DEFAULT.threshold_fraction)
    }
}
