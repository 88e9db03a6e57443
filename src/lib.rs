//! # quiz-ladder
//!
//! A terminal trivia game. Questions come from the Open Trivia DB, each
//! correct answer climbs a prize ladder, and the first wrong answer ends
//! the run.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_ladder::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = Settings {
//!         count: 5,
//!         api_url: quiz_ladder::DEFAULT_API_URL.to_string(),
//!         reveal_ms: 2000,
//!         fetch_timeout: None,
//!         log_file: None,
//!     };
//!
//!     // Takes over the terminal until the player quits
//!     Quiz::from_settings(&settings)?.run().await
//! }
//! ```

mod app;
pub mod config;
mod data;
mod error;
pub mod logging;
mod models;
pub mod terminal;
mod timer;
mod ui;

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;
use tracing::info;

pub use app::{App, DEFAULT_REVEAL_DELAY};
pub use config::Settings;
pub use data::{
    DEFAULT_API_URL, DEFAULT_QUESTION_COUNT, MAX_AMOUNT, OpenTdb, PRIZE_LADDER, ProviderError,
    QuestionProvider, RawQuestion, TriviaSource, fallback_questions, fisher_yates,
    parse_response, prize_for,
};
pub use error::QuizError;
pub use models::{
    ANSWER_COUNT, Effect, GameEvent, Outcome, Phase, Question, RevealToken, Session, Transition,
};
pub use timer::{RevealScheduler, TokioScheduler};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A quiz that can be run in the terminal.
pub struct Quiz<S> {
    provider: Arc<QuestionProvider<S>>,
    count: usize,
    reveal_delay: Duration,
}

impl Quiz<OpenTdb> {
    /// Build a quiz against the configured trivia API.
    pub fn from_settings(settings: &Settings) -> Result<Self, QuizError> {
        let source = OpenTdb::new(settings.api_url.clone(), settings.fetch_timeout())?;
        Ok(Self::new(
            QuestionProvider::new(source),
            settings.count,
            settings.reveal_delay(),
        ))
    }
}

impl<S: TriviaSource> Quiz<S> {
    pub fn new(provider: QuestionProvider<S>, count: usize, reveal_delay: Duration) -> Self {
        Self {
            provider: Arc::new(provider),
            count,
            reveal_delay,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal and returns when the player quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let (mut app, effects) = App::new(TokioScheduler::new(events_tx.clone()), self.reveal_delay);
        self.perform(effects, &events_tx);

        let mut term = terminal::init()?;
        let result = self
            .event_loop(&mut term, &mut app, &mut events_rx, &events_tx)
            .await;
        app.scheduler_mut().shutdown();
        terminal::restore()?;

        info!(total_prize = app.session().total_prize, "quiz closed");
        result
    }

    async fn event_loop(
        &self,
        term: &mut terminal::QuizTerminal,
        app: &mut App<TokioScheduler>,
        events_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
        events_tx: &mpsc::UnboundedSender<GameEvent>,
    ) -> Result<(), QuizError> {
        loop {
            while let Ok(game_event) = events_rx.try_recv() {
                let effects = app.dispatch(game_event);
                self.perform(effects, events_tx);
            }

            term.draw(|frame| ui::render(frame, app))?;

            if !event::poll(POLL_INTERVAL)? {
                tokio::task::yield_now().await;
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match handle_input(app, key.code) {
                    ControlFlow::Break(()) => break,
                    ControlFlow::Continue(effects) => self.perform(effects, events_tx),
                }
            }
        }

        Ok(())
    }

    fn perform(&self, effects: Vec<Effect>, events: &mpsc::UnboundedSender<GameEvent>) {
        for effect in effects {
            if effect == Effect::FetchQuestions {
                self.spawn_fetch(events.clone());
            }
        }
    }

    fn spawn_fetch(&self, events: mpsc::UnboundedSender<GameEvent>) {
        let provider = Arc::clone(&self.provider);
        let count = self.count;
        info!(count, "requesting question set");

        tokio::spawn(async move {
            let questions = provider.generate_question_set(count).await;
            let _ = events.send(GameEvent::Loaded(questions));
        });
    }
}

/// Map a key press to controller calls. `Break` means the player quit.
fn handle_input<S: RevealScheduler>(app: &mut App<S>, key: KeyCode) -> ControlFlow<(), Vec<Effect>> {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return ControlFlow::Break(());
    }

    let effects = match app.session().phase {
        Phase::Loading => Vec::new(),
        Phase::Playing | Phase::Revealing => handle_question_input(app, key),
        Phase::GameOver => match key {
            KeyCode::Char('r') | KeyCode::Char('R') => app.dispatch(GameEvent::Reset),
            _ => Vec::new(),
        },
    };
    ControlFlow::Continue(effects)
}

fn handle_question_input<S: RevealScheduler>(app: &mut App<S>, key: KeyCode) -> Vec<Effect> {
    if app.session().is_revealing() {
        return Vec::new();
    }

    if let Some(answer) = answer_for_key(key) {
        return app.dispatch(GameEvent::Select(answer));
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_next(),
        KeyCode::Enter | KeyCode::Char(' ') => return app.select_cursor(),
        _ => {}
    }
    Vec::new()
}

/// `a`-`d` (either case) or `1`-`4` pick an option directly.
fn answer_for_key(key: KeyCode) -> Option<usize> {
    let KeyCode::Char(c) = key else {
        return None;
    };

    match c.to_ascii_lowercase() {
        c @ 'a'..='d' => Some(c as usize - 'a' as usize),
        c @ '1'..='4' => Some(c as usize - '1' as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        scheduled: u64,
    }

    impl RevealScheduler for CountingScheduler {
        fn schedule_reveal(&mut self, _after: Duration) -> RevealToken {
            self.scheduled += 1;
            RevealToken::new(self.scheduled)
        }

        fn cancel(&mut self, _token: RevealToken) {}
    }

    fn loaded_app() -> App<CountingScheduler> {
        let (mut app, _) = App::new(CountingScheduler::default(), DEFAULT_REVEAL_DELAY);
        app.dispatch(GameEvent::Loaded(fallback_questions()));
        app
    }

    #[test]
    fn test_answer_keys() {
        assert_eq!(answer_for_key(KeyCode::Char('a')), Some(0));
        assert_eq!(answer_for_key(KeyCode::Char('D')), Some(3));
        assert_eq!(answer_for_key(KeyCode::Char('2')), Some(1));
        assert_eq!(answer_for_key(KeyCode::Char('e')), None);
        assert_eq!(answer_for_key(KeyCode::Char('5')), None);
        assert_eq!(answer_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = loaded_app();
        assert!(handle_input(&mut app, KeyCode::Char('q')).is_break());
        assert!(handle_input(&mut app, KeyCode::Esc).is_break());
    }

    #[test]
    fn test_letter_selects_answer() {
        let mut app = loaded_app();
        let flow = handle_input(&mut app, KeyCode::Char('b'));

        assert_eq!(flow, ControlFlow::Continue(Vec::new()));
        assert_eq!(app.session().selected_answer, Some(1));
        assert!(app.session().is_revealing());
    }

    #[test]
    fn test_enter_selects_cursor() {
        let mut app = loaded_app();
        let _ = handle_input(&mut app, KeyCode::Down);
        let _ = handle_input(&mut app, KeyCode::Down);
        let _ = handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.session().selected_answer, Some(2));
    }

    #[test]
    fn test_keys_locked_while_revealing() {
        let mut app = loaded_app();
        let _ = handle_input(&mut app, KeyCode::Char('c'));
        assert!(app.session().is_revealing());

        for key in [KeyCode::Down, KeyCode::Char('j'), KeyCode::Up, KeyCode::Enter, KeyCode::Char('a')] {
            assert_eq!(handle_input(&mut app, key), ControlFlow::Continue(Vec::new()));
        }
        assert_eq!(app.cursor(), 0);
        assert_eq!(app.session().selected_answer, Some(2));
        assert_eq!(app.scheduler().scheduled, 1);
    }

    #[test]
    fn test_reset_only_on_game_over() {
        let mut app = loaded_app();
        assert_eq!(
            handle_input(&mut app, KeyCode::Char('r')),
            ControlFlow::Continue(Vec::new())
        );
        assert!(!app.session().is_loading());

        // Venus is wrong.
        let _ = handle_input(&mut app, KeyCode::Char('a'));
        let token = app.session().pending_reveal.unwrap();
        app.dispatch(GameEvent::RevealElapsed(token));
        assert!(app.session().is_over());

        assert_eq!(
            handle_input(&mut app, KeyCode::Char('r')),
            ControlFlow::Continue(vec![Effect::FetchQuestions])
        );
        assert!(app.session().is_loading());
    }
}
