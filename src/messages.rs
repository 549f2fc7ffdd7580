//! Message queue boundary between the story engine and the chat display
//!
//! The story engine only writes messages and reads the `typewriting` flag;
//! queueing, interruption and cooldown semantics belong to the external
//! display that drains this outbox.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// How the external display should present a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStyle {
    /// Short-form radio chatter over gameplay
    Radio,
    /// Long-form briefing text
    Cutscene,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMessage {
    pub text: String,
    pub style: MessageStyle,
}

/// Pending messages for the external display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outbox {
    queue: VecDeque<StoryMessage>,
    /// Maintained by the external display while a message is being typed out
    pub typewriting: bool,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_message(&mut self, style: MessageStyle, text: impl Into<String>) {
        self.queue.push_back(StoryMessage {
            text: text.into(),
            style,
        });
    }

    /// Priority messages jump the queue.
    pub fn queue_priority_message(&mut self, style: MessageStyle, text: impl Into<String>) {
        self.queue.push_front(StoryMessage {
            text: text.into(),
            style,
        });
    }

    pub fn pop(&mut self) -> Option<StoryMessage> {
        self.queue.pop_front()
    }

    pub fn is_typewriting(&self) -> bool {
        self.typewriting
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn reset(&mut self) {
        self.queue.clear();
        self.typewriting = false;
    }
}
