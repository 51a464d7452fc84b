//! Bounded conversation window.

use std::collections::VecDeque;

use crate::types::Turn;

/// Number of turns retained when no window is configured.
pub const DEFAULT_WINDOW: usize = 5;

/// Ordered history of the most recent `window` turns, oldest first.
///
/// Recording past the window evicts from the front, so the retained turns are
/// always the newest ones in chronological order.
#[derive(Debug, Clone)]
pub struct ConversationBuffer {
    turns: VecDeque<Turn>,
    window: usize,
}

impl ConversationBuffer {
    /// Creates an empty buffer keeping at most `window` turns. A window of 0 is clamped to 1.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            turns: VecDeque::with_capacity(window.min(DEFAULT_WINDOW)),
            window,
        }
    }

    /// All retained turns, oldest first.
    pub fn history(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    /// Iterates retained turns without cloning, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Appends a turn and evicts the oldest ones until the window is respected.
    pub fn record(&mut self, user_input: impl Into<String>, model_output: impl Into<String>) {
        self.turns.push_back(Turn::new(user_input, model_output));
        while self.turns.len() > self.window {
            self.turns.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of retained turns (K).
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for ConversationBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
