use std::borrow::Cow;
use std::str::Utf8Error;
use std::sync::{Mutex, PoisonError};

use percent_encoding::percent_decode_str;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{ANSWER_COUNT, Question};

use super::fallback::fallback_questions;
use super::opentdb::{RawQuestion, TriviaSource};
use super::prize::prize_for;
use super::shuffle::fisher_yates;

pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Reasons a live question set could not be produced.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trivia api returned response code {code}")]
    Api { code: u8 },
    #[error("trivia api returned no questions")]
    Empty,
    #[error("item {index} has {found} incorrect answers, expected {}", ANSWER_COUNT - 1)]
    AnswerCount { index: usize, found: usize },
    #[error("invalid percent-encoding: {0}")]
    Decode(#[from] Utf8Error),
    #[error("malformed escape at byte {position} in {text:?}")]
    Escape { position: usize, text: String },
}

/// An answer that remembers whether it is the right one while it moves
/// around during the shuffle.
struct Candidate<'a> {
    text: &'a str,
    is_correct: bool,
}

impl<'a> Candidate<'a> {
    fn wrong(text: &'a str) -> Self {
        Self {
            text,
            is_correct: false,
        }
    }
}

/// Builds playable question sets from a [`TriviaSource`].
pub struct QuestionProvider<S> {
    source: S,
    rng: Mutex<StdRng>,
}

impl<S: TriviaSource> QuestionProvider<S> {
    pub fn new(source: S) -> Self {
        Self::with_rng(source, StdRng::from_entropy())
    }

    pub fn with_rng(source: S, rng: StdRng) -> Self {
        Self {
            source,
            rng: Mutex::new(rng),
        }
    }

    /// Fetch and normalize `count` questions.
    ///
    /// Never fails: on any error the fixed fallback set is returned instead.
    pub async fn generate_question_set(&self, count: usize) -> Vec<Question> {
        match self.try_generate(count).await {
            Ok(questions) => {
                info!(count = questions.len(), "loaded live question set");
                questions
            }
            Err(error) => {
                warn!(%error, "failed to fetch questions, serving fallback set");
                fallback_questions()
            }
        }
    }

    async fn try_generate(&self, count: usize) -> Result<Vec<Question>, ProviderError> {
        let raw = self.source.fetch(count).await?;
        if raw.is_empty() {
            return Err(ProviderError::Empty);
        }
        self.normalize_all(&raw)
    }

    fn normalize_all(&self, raw: &[RawQuestion]) -> Result<Vec<Question>, ProviderError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        raw.iter()
            .enumerate()
            .map(|(index, item)| normalize(index, item, &mut *rng))
            .collect()
    }
}

fn normalize(index: usize, raw: &RawQuestion, rng: &mut StdRng) -> Result<Question, ProviderError> {
    let [first, second, third] = raw.incorrect_answers.as_slice() else {
        return Err(ProviderError::AnswerCount {
            index,
            found: raw.incorrect_answers.len(),
        });
    };

    let mut candidates: [Candidate<'_>; ANSWER_COUNT] = [
        Candidate::wrong(first),
        Candidate::wrong(second),
        Candidate::wrong(third),
        Candidate {
            text: &raw.correct_answer,
            is_correct: true,
        },
    ];
    fisher_yates(&mut candidates, rng);

    let mut correct = 0;
    for (position, candidate) in candidates.iter().enumerate() {
        if candidate.is_correct {
            correct = position;
        }
    }

    let [a, b, c, d] = candidates.map(|candidate| decode(candidate.text));
    let answers = [a?, b?, c?, d?];

    Ok(Question {
        question: decode(&raw.question)?,
        answers,
        correct,
        prize: prize_for(index),
    })
}

/// Percent-decode `text`, rejecting a `%` not followed by two hex digits.
fn decode(text: &str) -> Result<String, ProviderError> {
    let bytes = text.as_bytes();
    for (position, _) in text.match_indices('%') {
        let escape = bytes.get(position + 1..position + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(ProviderError::Escape {
                position,
                text: text.to_string(),
            });
        }
    }

    percent_decode_str(text)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(ProviderError::from)
}

#[cfg(test)]
mod tests {
    use std::future::{Future, ready};

    use super::*;

    struct StaticSource(Vec<RawQuestion>);

    impl TriviaSource for StaticSource {
        fn fetch(
            &self,
            _count: usize,
        ) -> impl Future<Output = Result<Vec<RawQuestion>, ProviderError>> + Send {
            ready(Ok(self.0.clone()))
        }
    }

    struct FailingSource;

    impl TriviaSource for FailingSource {
        fn fetch(
            &self,
            _count: usize,
        ) -> impl Future<Output = Result<Vec<RawQuestion>, ProviderError>> + Send {
            ready(Err(ProviderError::Api { code: 5 }))
        }
    }

    fn raw(question: &str, correct: &str, incorrect: [&str; 3]) -> RawQuestion {
        RawQuestion {
            question: question.to_string(),
            correct_answer: correct.to_string(),
            incorrect_answers: incorrect.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn provider<S: TriviaSource>(source: S, seed: u64) -> QuestionProvider<S> {
        QuestionProvider::with_rng(source, StdRng::seed_from_u64(seed))
    }

    fn sample_items(count: usize) -> Vec<RawQuestion> {
        (0..count)
            .map(|i| {
                raw(
                    &format!("Question%20{i}%3F"),
                    &format!("Right%20{i}"),
                    ["Wrong%20A", "Wrong%20B", "Wrong%20C"],
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_correct_index_tracks_answer() {
        for seed in 0..20 {
            let questions = provider(StaticSource(sample_items(5)), seed)
                .generate_question_set(5)
                .await;

            assert_eq!(questions.len(), 5);
            for (i, question) in questions.iter().enumerate() {
                assert!(question.correct < ANSWER_COUNT);
                assert_eq!(question.correct_answer(), format!("Right {i}"));
                assert_eq!(question.question, format!("Question {i}?"));
            }
        }
    }

    #[tokio::test]
    async fn test_answers_are_permutation() {
        let questions = provider(StaticSource(sample_items(1)), 3)
            .generate_question_set(1)
            .await;

        let mut answers = questions[0].answers.to_vec();
        answers.sort();
        assert_eq!(answers, vec!["Right 0", "Wrong A", "Wrong B", "Wrong C"]);
    }

    #[tokio::test]
    async fn test_correct_position_varies() {
        let questions = provider(StaticSource(sample_items(40)), 11)
            .generate_question_set(40)
            .await;

        let mut seen = [false; ANSWER_COUNT];
        for question in &questions {
            seen[question.correct] = true;
        }
        assert_eq!(seen, [true; ANSWER_COUNT]);
    }

    #[tokio::test]
    async fn test_duplicate_answer_text() {
        // After decoding, the correct answer and a distractor read the same.
        let items = vec![raw("Pick%20one", "Same", ["Same", "Other", "Another"])];

        for seed in 0..20 {
            let questions = provider(StaticSource(items.clone()), seed)
                .generate_question_set(1)
                .await;
            let question = &questions[0];

            assert_eq!(question.correct_answer(), "Same");
            assert_eq!(
                question.answers.iter().filter(|a| a.as_str() == "Same").count(),
                2
            );
        }
    }

    #[tokio::test]
    async fn test_prize_ladder() {
        let questions = provider(StaticSource(sample_items(5)), 0)
            .generate_question_set(5)
            .await;
        let prizes: Vec<u32> = questions.iter().map(|q| q.prize).collect();
        assert_eq!(prizes, vec![100, 200, 500, 1000, 2000]);

        let questions = provider(StaticSource(sample_items(8)), 0)
            .generate_question_set(8)
            .await;
        assert!(questions[4..].iter().all(|q| q.prize == 2000));
    }

    #[tokio::test]
    async fn test_source_failure_serves_fallback() {
        let questions = provider(FailingSource, 0).generate_question_set(5).await;
        assert_eq!(questions, fallback_questions());
    }

    #[tokio::test]
    async fn test_empty_results_serve_fallback() {
        let questions = provider(StaticSource(vec![]), 0)
            .generate_question_set(5)
            .await;
        assert_eq!(questions, fallback_questions());
    }

    #[tokio::test]
    async fn test_malformed_item_serves_fallback() {
        let mut items = sample_items(3);
        items[1].incorrect_answers.pop();

        let questions = provider(StaticSource(items), 0)
            .generate_question_set(3)
            .await;
        assert_eq!(questions, fallback_questions());
    }

    #[tokio::test]
    async fn test_bad_encoding_serves_fallback() {
        let items = vec![raw("Broken%FF", "a", ["b", "c", "d"])];

        let questions = provider(StaticSource(items), 0)
            .generate_question_set(1)
            .await;
        assert_eq!(questions, fallback_questions());
    }

    #[tokio::test]
    async fn test_malformed_escape_serves_fallback() {
        let items = vec![raw("Worth%20100%", "a", ["b", "c", "d"])];

        let questions = provider(StaticSource(items), 0)
            .generate_question_set(1)
            .await;
        assert_eq!(questions, fallback_questions());
    }

    #[test]
    fn test_decode_rejects_malformed_escapes() {
        assert!(matches!(
            decode("100%"),
            Err(ProviderError::Escape { position: 3, .. })
        ));
        assert!(matches!(
            decode("%ZZ"),
            Err(ProviderError::Escape { position: 0, .. })
        ));
        assert!(matches!(decode("%2"), Err(ProviderError::Escape { .. })));
        assert_eq!(decode("100%25").unwrap(), "100%");
    }

    #[test]
    fn test_decode_keeps_plus() {
        assert_eq!(decode("Rock%20%26%20Roll+").unwrap(), "Rock & Roll+");
        assert_eq!(decode("Caf%C3%A9").unwrap(), "Café");
    }
}
