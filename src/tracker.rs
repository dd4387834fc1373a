//! Turns made since the puzzle was last solved.

use crate::moves::Turn;

/// History of completed turns since the last solved state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveTracker {
    history: Vec<Turn>,
}

impl SolveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books a completed turn: clears the history if it solved the puzzle,
    /// appends it otherwise.
    pub fn record(&mut self, turn: Turn, solved: bool) {
        if solved {
            self.clear();
        } else {
            self.history.push(turn);
        }
    }

    /// Books a completed undo turn.
    ///
    /// The undo turn cancels the most recent entry, which is popped instead of
    /// recording the undo itself.
    pub fn retract(&mut self, turn: Turn, solved: bool) {
        if solved {
            self.clear();
            return;
        }
        match self.history.last() {
            Some(&last) if last == turn.inverse() => {
                self.history.pop();
            }
            _ => {
                log::warn!("undo turn {turn} does not reverse the latest recorded turn");
                self.history.push(turn);
            }
        }
    }

    pub fn clear(&mut self) {
        if !self.history.is_empty() {
            log::debug!("clearing {} recorded turns", self.history.len());
        }
        self.history.clear();
    }

    /// Recorded turns, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn last(&self) -> Option<Turn> {
        self.history.last().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Turns that walk back to the last solved state: newest first, each
    /// inverted.
    pub fn reversal(&self) -> Vec<Turn> {
        self.history.iter().rev().map(|turn| turn.inverse()).collect()
    }
}
