//! Per-chat flow state for the scripted narrative.

/// Scripted message content and the flow driver
pub mod script;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::Dialogue;

/// Dialogue handle carrying the per-chat [`FlowState`].
pub type FlowDialogue = Dialogue<FlowState, InMemStorage<FlowState>>;

/// Where a chat currently is in the scripted flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// No script running.
    #[default]
    Idle,
    /// The diagnostic script is being delivered.
    Active,
    /// The unlock link has been presented; the script is done.
    LinkSent,
}

/// Events that move a chat between flow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// `/start` accepted, the script begins (also restarts a running flow).
    ScriptStarted,
    /// The step C unlock button went out.
    LinkPresented,
    /// The flow is torn down.
    Reset,
}

impl FlowState {
    /// Pure transition function. Unexpected events leave the state alone.
    pub fn on(self, event: FlowEvent) -> FlowState {
        match (self, event) {
            (_, FlowEvent::Reset) => FlowState::Idle,
            (_, FlowEvent::ScriptStarted) => FlowState::Active,
            (FlowState::Active, FlowEvent::LinkPresented) => FlowState::LinkSent,
            (state, FlowEvent::LinkPresented) => state,
        }
    }

    /// True while a script is running or its link is still the latest thing
    /// this chat saw. A `/start` in this state is a restart.
    pub fn in_flight(self) -> bool {
        !matches!(self, FlowState::Idle)
    }

    /// Short name for log lines.
    pub fn name(self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Active => "active",
            FlowState::LinkSent => "link_sent",
        }
    }
}
