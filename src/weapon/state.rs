//! Weapon-handling vocabulary.

use serde::{Deserialize, Serialize};

crate::state_enum! {
    /// Where the player stands in the weapon-handling cycle.
    pub enum PlayerState {
        NotYetAvailable,
        Idle,
        PullOut,
        PressTrigger,
        WaitForTriggerRelease,
        ReleaseTrigger,
        Attack,
        WaitForAttackEnd,
        Reload,
        PutBack,
        SelectNext,
        SelectPrevious,
    }
}

crate::event_enum! {
    /// Signals moving the player between [`PlayerState`]s.
    pub enum PlayerEvent {
        Available,
        PressingTrigger,
        ReleasingTrigger,
        Attacking,
        WaitingForAttackEnd,
        WaitingForTriggerRelease,
        Reloading,
        PuttingBackBeforeReload,
        PuttingBackBeforeSelectNext,
        PuttingBackBeforeSelectPrevious,
        PullingOut,
        SelectingNext,
        SelectingPrevious,
        Idle,
    }
}

/// Direction of a weapon switch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SelectionDirection {
    Next,
    Previous,
}

impl SelectionDirection {
    pub(crate) fn put_back_event(self) -> PlayerEvent {
        match self {
            Self::Next => PlayerEvent::PuttingBackBeforeSelectNext,
            Self::Previous => PlayerEvent::PuttingBackBeforeSelectPrevious,
        }
    }

    pub(crate) fn selecting_event(self) -> PlayerEvent {
        match self {
            Self::Next => PlayerEvent::SelectingNext,
            Self::Previous => PlayerEvent::SelectingPrevious,
        }
    }

    pub(crate) fn selection_state(self) -> PlayerState {
        match self {
            Self::Next => PlayerState::SelectNext,
            Self::Previous => PlayerState::SelectPrevious,
        }
    }
}
