use serde::{Deserialize, Serialize};

/// Every question offers exactly this many options.
pub const ANSWER_COUNT: usize = 4;

/// A normalized multiple-choice question ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answers: [String; ANSWER_COUNT],
    /// Index into `answers` of the right option.
    pub correct: usize,
    pub prize: u32,
}

impl Question {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct
    }

    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct]
    }
}
