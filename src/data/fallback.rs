use crate::models::Question;

use super::prize::prize_for;

/// Served whenever a live question set cannot be produced.
const FALLBACK: [(&str, [&str; 4], usize); 5] = [
    (
        "Which planet is known as the Red Planet?",
        ["Venus", "Mars", "Jupiter", "Saturn"],
        1,
    ),
    (
        "What is the capital of France?",
        ["London", "Berlin", "Paris", "Rome"],
        2,
    ),
    (
        "Who painted the Mona Lisa?",
        ["Van Gogh", "Picasso", "Da Vinci", "Michelangelo"],
        2,
    ),
    (
        "What is the largest mammal in the world?",
        ["Elephant", "Blue Whale", "Giraffe", "Hippopotamus"],
        1,
    ),
    (
        "Which element has the symbol 'O'?",
        ["Gold", "Silver", "Oxygen", "Osmium"],
        2,
    ),
];

pub fn fallback_questions() -> Vec<Question> {
    FALLBACK
        .into_iter()
        .enumerate()
        .map(|(index, (text, answers, correct))| Question {
            question: text.to_string(),
            answers: answers.map(String::from),
            correct,
            prize: prize_for(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_set() {
        let questions = fallback_questions();
        assert_eq!(questions.len(), 5);

        let prizes: Vec<u32> = questions.iter().map(|q| q.prize).collect();
        assert_eq!(prizes, vec![100, 200, 500, 1000, 2000]);

        let correct: Vec<&str> = questions.iter().map(|q| q.correct_answer()).collect();
        assert_eq!(correct, vec!["Mars", "Paris", "Da Vinci", "Blue Whale", "Oxygen"]);
    }
}
