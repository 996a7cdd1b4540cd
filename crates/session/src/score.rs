use model::Quiz;

/// Placeholder text for a question that ran out the clock unanswered.
pub const NO_ANSWER: &str = "No Answer";

/// Per-question review line for the result screen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Verdict {
    pub question: String,
    /// Text of the chosen option, or [`NO_ANSWER`].
    pub chosen: String,
    pub correct: String,
    pub is_correct: bool,
}

/// Scored outcome of a completed attempt. Pure data; recording happens in the
/// controller's completion path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub verdicts: Vec<Verdict>,
}

/// Grades a completed answer sheet against the quiz's answer key. An
/// unanswered slot never matches and therefore always counts as wrong.
pub fn grade(quiz: &Quiz, answers: &[Option<u8>]) -> Outcome {
    debug_assert_eq!(answers.len(), quiz.questions.len());

    let mut score = 0;
    let verdicts = quiz
        .questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| {
            let is_correct = *answer == Some(question.correct_index);
            if is_correct {
                score += 1;
            }
            let chosen = match answer {
                Some(choice) => question.options[usize::from(*choice)].clone(),
                None => String::from(NO_ANSWER),
            };
            Verdict { question: question.text.clone(), chosen, correct: question.correct_text().into(), is_correct }
        })
        .collect();

    let total = quiz.questions.len() as u32;
    Outcome { score, total, percentage: percentage(score, total), verdicts }
}

/// Rounds `100 * score / total` half-up without going through floats.
const fn percentage(score: u32, total: u32) -> u32 {
    (200 * score + total) / (2 * total)
}

#[cfg(test)]
mod tests {
    use super::{grade, percentage, NO_ANSWER};
    use model::{Question, Quiz};

    fn quiz_with_keys(keys: &[u8]) -> Quiz {
        let questions = keys
            .iter()
            .map(|&key| Question {
                text: format!("Pick option {key}"),
                options: ["North", "South", "East", "West"].map(String::from),
                correct_index: key,
            })
            .collect();
        Quiz::new(String::from("Compass"), questions).unwrap()
    }

    #[test]
    fn perfect_sheet_scores_full_marks() {
        let quiz = quiz_with_keys(&[0, 1]);
        let outcome = grade(&quiz, &[Some(0), Some(1)]);
        assert_eq!((outcome.score, outcome.total, outcome.percentage), (2, 2, 100));
        assert!(outcome.verdicts.iter().all(|verdict| verdict.is_correct));
    }

    #[test]
    fn unanswered_questions_count_as_wrong() {
        let quiz = quiz_with_keys(&[0, 1, 2, 3]);
        let outcome = grade(&quiz, &[Some(1), Some(1), Some(2), None]);
        assert_eq!((outcome.score, outcome.total, outcome.percentage), (2, 4, 50));

        assert!(!outcome.verdicts[0].is_correct);
        assert_eq!(outcome.verdicts[0].chosen, "South");
        assert_eq!(outcome.verdicts[0].correct, "North");
        assert_eq!(outcome.verdicts[3].chosen, NO_ANSWER);
        assert!(!outcome.verdicts[3].is_correct);
    }

    #[test]
    fn score_never_exceeds_question_count() {
        let quiz = quiz_with_keys(&[3, 3, 3]);
        let outcome = grade(&quiz, &[Some(3), Some(3), Some(3)]);
        assert!(outcome.score <= quiz.questions.len() as u32);
        assert_eq!(outcome.verdicts.len(), quiz.questions.len());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
    }
}
