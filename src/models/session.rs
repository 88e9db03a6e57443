//! Session state and the game's transition function.
//!
//! All progression goes through [`Session::step`], which takes the current
//! session and one [`GameEvent`] and returns the next session together with
//! the side effects the caller has to carry out (fetching questions,
//! arming or cancelling the reveal timer). Nothing in here touches the
//! clock or the network.

use serde::{Deserialize, Serialize};

use crate::data::fallback_questions;

use super::question::{ANSWER_COUNT, Question};

/// Where the game currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a question set.
    #[default]
    Loading,
    /// Waiting for the player to pick an answer.
    Playing,
    /// An answer was picked; input is locked until the reveal elapses.
    Revealing,
    /// Final screen, left only through a reset.
    GameOver,
}

/// Final result shown on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Handle for one scheduled reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealToken(u64);

impl RevealToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A question set finished loading.
    Loaded(Vec<Question>),
    /// The player picked the answer at this index.
    Select(usize),
    /// The scheduler accepted the pending reveal under this token.
    RevealArmed(RevealToken),
    /// The reveal timer for this token fired.
    RevealElapsed(RevealToken),
    /// Start over with a fresh question set.
    Reset,
}

/// Work requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchQuestions,
    ScheduleReveal,
    CancelReveal(RevealToken),
}

/// Result of [`Session::step`].
#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn idle(session: Session) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }
}

/// Progress of a single game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub selected_answer: Option<usize>,
    pub total_prize: u32,
    pub phase: Phase,
    pub pending_reveal: Option<RevealToken>,
}

impl Session {
    /// A fresh session in [`Phase::Loading`] along with the fetch that fills it.
    pub fn start() -> Transition {
        Transition {
            session: Session::default(),
            effects: vec![Effect::FetchQuestions],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_revealing(&self) -> bool {
        self.phase == Phase::Revealing
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Only meaningful once the game is over.
    pub fn outcome(&self) -> Outcome {
        if self.total_prize > 0 {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    /// Apply one event. Events that do not fit the current phase leave the
    /// session untouched and request nothing.
    pub fn step(self, event: GameEvent) -> Transition {
        match event {
            GameEvent::Loaded(questions) => self.on_loaded(questions),
            GameEvent::Select(answer) => self.on_select(answer),
            GameEvent::RevealArmed(token) => self.on_armed(token),
            GameEvent::RevealElapsed(token) => self.on_elapsed(token),
            GameEvent::Reset => self.on_reset(),
        }
    }

    fn on_loaded(mut self, questions: Vec<Question>) -> Transition {
        if self.phase != Phase::Loading {
            return Transition::idle(self);
        }

        self.questions = if questions.is_empty() {
            fallback_questions()
        } else {
            questions
        };
        self.current_index = 0;
        self.selected_answer = None;
        self.phase = Phase::Playing;
        Transition::idle(self)
    }

    fn on_select(mut self, answer: usize) -> Transition {
        if self.phase != Phase::Playing || answer >= ANSWER_COUNT {
            return Transition::idle(self);
        }

        self.selected_answer = Some(answer);
        self.phase = Phase::Revealing;
        Transition {
            session: self,
            effects: vec![Effect::ScheduleReveal],
        }
    }

    fn on_armed(mut self, token: RevealToken) -> Transition {
        if self.phase == Phase::Revealing && self.pending_reveal.is_none() {
            self.pending_reveal = Some(token);
        }
        Transition::idle(self)
    }

    fn on_elapsed(mut self, token: RevealToken) -> Transition {
        if self.phase != Phase::Revealing || self.pending_reveal != Some(token) {
            return Transition::idle(self);
        }

        self.pending_reveal = None;
        let selected = self.selected_answer.take();
        let Some(question) = self.questions.get(self.current_index) else {
            self.phase = Phase::GameOver;
            return Transition::idle(self);
        };

        match selected {
            Some(answer) if question.is_correct(answer) => {
                self.total_prize += question.prize;
                if self.is_last_question() {
                    self.phase = Phase::GameOver;
                } else {
                    self.current_index += 1;
                    self.phase = Phase::Playing;
                }
            }
            _ => self.phase = Phase::GameOver,
        }

        Transition::idle(self)
    }

    fn on_reset(self) -> Transition {
        if self.phase == Phase::Loading {
            return Transition::idle(self);
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(token) = self.pending_reveal {
            effects.push(Effect::CancelReveal(token));
        }
        effects.push(Effect::FetchQuestions);

        Transition {
            session: Session::default(),
            effects,
        }
    }
}
