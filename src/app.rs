use std::time::Duration;

use tracing::{debug, info};

use crate::models::{ANSWER_COUNT, Effect, GameEvent, Question, Session};
use crate::timer::RevealScheduler;

/// How long the right answer stays on screen after a pick.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(2000);

/// Game controller: owns the session and runs the timer side of each
/// transition.
pub struct App<S> {
    session: Session,
    scheduler: S,
    reveal_delay: Duration,
    cursor: usize,
}

impl<S> App<S> {
    /// Create the controller in the loading phase.
    ///
    /// The returned effects (a single fetch) are the caller's to run.
    pub fn new(scheduler: S, reveal_delay: Duration) -> (Self, Vec<Effect>) {
        let start = Session::start();
        let app = Self {
            session: start.session,
            scheduler,
            reveal_delay,
            cursor: 0,
        };
        (app, start.effects)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn question_number(&self) -> usize {
        self.session.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.questions.len()
    }

    /// Option highlighted by keyboard navigation.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_next(&mut self) {
        self.cursor = (self.cursor + 1) % ANSWER_COUNT;
    }

    pub fn cursor_previous(&mut self) {
        self.cursor = (self.cursor + ANSWER_COUNT - 1) % ANSWER_COUNT;
    }
}

impl<S: RevealScheduler> App<S> {
    /// Feed one event through the session.
    ///
    /// Timer effects are handled here; whatever is left (fetching a new
    /// question set) is returned for the caller to perform.
    pub fn dispatch(&mut self, event: GameEvent) -> Vec<Effect> {
        let before = self.session.current_index;
        let transition = std::mem::take(&mut self.session).step(event);
        self.session = transition.session;

        if self.session.current_index != before {
            self.cursor = 0;
        }

        let mut remaining = Vec::new();
        for effect in transition.effects {
            match effect {
                Effect::ScheduleReveal => {
                    let token = self.scheduler.schedule_reveal(self.reveal_delay);
                    let armed = std::mem::take(&mut self.session);
                    self.session = armed.step(GameEvent::RevealArmed(token)).session;
                }
                Effect::CancelReveal(token) => self.scheduler.cancel(token),
                Effect::FetchQuestions => {
                    self.cursor = 0;
                    remaining.push(effect);
                }
            }
        }

        if self.session.is_over() {
            info!(total_prize = self.session.total_prize, "game over");
        } else {
            debug!(phase = ?self.session.phase, index = self.session.current_index, "state updated");
        }

        remaining
    }

    /// Pick the highlighted option.
    pub fn select_cursor(&mut self) -> Vec<Effect> {
        self.dispatch(GameEvent::Select(self.cursor))
    }
}
