//! Motion notifications emitted by the movement subsystem.

use crate::agent::AgentId;

/// Notification that an agent started or stopped moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionEvent {
    /// The agent received a move order while stationary.
    Started(AgentId),
    /// The agent reached its destination and stopped.
    Ended(AgentId),
}

impl MotionEvent {
    /// Agent the notification concerns.
    #[must_use]
    pub const fn agent(self) -> AgentId {
        match self {
            Self::Started(id) | Self::Ended(id) => id,
        }
    }
}

/// Receiver of [`MotionEvent`]s, typically a bridge onto the host's event bus.
pub trait MotionEventSink {
    /// Delivers one notification.
    fn emit(&mut self, event: MotionEvent);
}

impl MotionEventSink for Vec<MotionEvent> {
    fn emit(&mut self, event: MotionEvent) {
        self.push(event);
    }
}

/// Sink that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardEvents;

impl MotionEventSink for DiscardEvents {
    fn emit(&mut self, _event: MotionEvent) {}
}
