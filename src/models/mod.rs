mod question;
mod session;

pub use question::{ANSWER_COUNT, Question};
pub use session::{Effect, GameEvent, Outcome, Phase, RevealToken, Session, Transition};
