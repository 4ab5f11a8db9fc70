#![no_std]

extern crate alloc;

use core::ops::BitOr;

pub use config::*;
pub use controller::*;
pub use coverage::*;
pub use erase::*;
pub use error::*;
pub use mask::*;
pub use prize::*;
pub use reveal::*;
pub use surface::*;
pub use types::*;

mod config;
mod controller;
mod coverage;
mod erase;
mod error;
mod mask;
mod prize;
mod reveal;
mod surface;
mod types;

/// What a single dispatched event did to the session, ordered by significance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScratchOutcome {
    NoChange,
    Erased,
    Repainted,
    Revealed,
}

impl ScratchOutcome {
    pub const fn has_update(self) -> bool {
        use ScratchOutcome::*;
        match self {
            NoChange => false,
            Erased => true,
            Repainted => true,
            Revealed => true,
        }
    }
}

impl BitOr for ScratchOutcome {
    type Output = ScratchOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ScratchOutcome::*;
        match (self, rhs) {
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (Repainted, _) => Repainted,
            (_, Repainted) => Repainted,
            (Erased, _) => Erased,
            (_, Erased) => Erased,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_merge_keeps_most_significant() {
        use ScratchOutcome::*;

        assert_eq!(NoChange | Erased, Erased);
        assert_eq!(Erased | Repainted, Repainted);
        assert_eq!(Revealed | Erased, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
