//=========================================================================
// Transition Phase
//=========================================================================
//
// Sub-state of a pending stack change.
//
//   Idle ──push/pop(fade_out)──► FadingOut ──fade done──► ReadyToSwap
//    ▲   ──push/pop(no fade)─────────────────────────────►     │
//    └───────────────── resolution point ◄──────────────────────┘
//
// The most recent push/pop decides the fade flags; earlier ones in the
// same window are overridden.
//
//=========================================================================

/// Where the mode stack is in its transition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// No stack change pending.
    #[default]
    Idle,

    /// A change is pending behind a transitional fade-out.
    ///
    /// `started` is false until the next update has asked the video
    /// service to begin the fade.
    FadingOut { fade_in: bool, started: bool },

    /// A change is pending and will be resolved at the next update.
    ReadyToSwap { fade_in: bool },
}

impl TransitionPhase {
    /// Phase entered by a push or pop request.
    pub(super) fn requested(fade_out: bool, fade_in: bool) -> Self {
        if fade_out {
            Self::FadingOut { fade_in, started: false }
        } else {
            Self::ReadyToSwap { fade_in }
        }
    }

    /// Returns true if a push or pop is waiting to be resolved.
    pub fn is_change_pending(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
