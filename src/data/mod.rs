//! Question acquisition.
//!
//! Questions come from a [`TriviaSource`] (the Open Trivia DB in
//! production), get shuffled, decoded and priced by [`QuestionProvider`],
//! and are replaced by a fixed set whenever anything on that path fails.

mod fallback;
mod opentdb;
mod prize;
mod provider;
mod shuffle;

pub use fallback::fallback_questions;
pub use opentdb::{DEFAULT_API_URL, MAX_AMOUNT, OpenTdb, RawQuestion, TriviaSource, parse_response};
pub use prize::{PRIZE_LADDER, prize_for};
pub use provider::{DEFAULT_QUESTION_COUNT, ProviderError, QuestionProvider};
pub use shuffle::fisher_yates;
