use crate::{
    error::{Error, Result},
    result::Attempt,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Number of choices every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice prompt.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Prompt to be displayed during an attempt.
    pub text: String,
    /// Possible answers to select from.
    pub options: [String; OPTION_COUNT],
    /// Index of the option with the correct answer.
    #[serde(rename = "correctIndex")]
    pub correct_index: u8,
}

impl Question {
    /// Text of the correct option. The index is guaranteed in-range for any
    /// quiz that passed [`Quiz::validate`].
    pub fn correct_text(&self) -> &str {
        &self.options[usize::from(self.correct_index)]
    }
}

/// A titled set of questions plus accumulated attempt history.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Quiz {
    /// Creation-time identifier in milliseconds. Assigned once, immutable thereafter.
    pub id: i64,
    /// Non-empty display title.
    pub title: String,
    /// Ordered prompts, fixed after creation.
    pub questions: Vec<Question>,
    /// Append-only attempt history. Documents written before history existed omit the field.
    #[serde(default)]
    pub results: Vec<Attempt>,
}

impl Quiz {
    /// Validates authoring input and stamps a fresh creation-time id.
    pub fn new(title: String, questions: Vec<Question>) -> Result<Self> {
        let quiz = Self { id: Utc::now().timestamp_millis(), title, questions, results: Vec::new() };
        quiz.validate()?;
        Ok(quiz)
    }

    /// Checks the authoring invariants: non-empty title, at least one question,
    /// non-empty question and option texts, and an in-range correct index.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if self.questions.is_empty() {
            return Err(Error::NoQuestions);
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(Error::EmptyQuestion(index));
            }
            if question.options.iter().any(|option| option.trim().is_empty()) {
                return Err(Error::EmptyOption(index));
            }
            if usize::from(question.correct_index) >= OPTION_COUNT {
                return Err(Error::BadCorrectIndex(index));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Question, Quiz};
    use crate::error::Error;

    fn question(text: &str) -> Question {
        let options = ["Mercury", "Venus", "Earth", "Jupiter"].map(String::from);
        Question { text: String::from(text), options, correct_index: 3 }
    }

    #[test]
    fn rejects_empty_title() {
        let err = Quiz::new(String::from("  "), vec![question("Largest planet?")]).unwrap_err();
        assert_eq!(err, Error::EmptyTitle);
    }

    #[test]
    fn rejects_missing_questions() {
        let err = Quiz::new(String::from("Astronomy"), Vec::new()).unwrap_err();
        assert_eq!(err, Error::NoQuestions);
    }

    #[test]
    fn rejects_blank_texts() {
        let err = Quiz::new(String::from("Astronomy"), vec![question("")]).unwrap_err();
        assert_eq!(err, Error::EmptyQuestion(0));

        let mut blank_option = question("Largest planet?");
        blank_option.options[2] = String::from(" ");
        let err = Quiz::new(String::from("Astronomy"), vec![question("Largest planet?"), blank_option]).unwrap_err();
        assert_eq!(err, Error::EmptyOption(1));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let mut bad = question("Largest planet?");
        bad.correct_index = 4;
        let err = Quiz::new(String::from("Astronomy"), vec![bad]).unwrap_err();
        assert_eq!(err, Error::BadCorrectIndex(0));
    }

    #[test]
    fn accepts_valid_input() {
        let quiz = Quiz::new(String::from("Astronomy"), vec![question("Largest planet?")]).unwrap();
        assert_eq!(quiz.questions[0].correct_text(), "Jupiter");
        assert!(quiz.results.is_empty());
    }

    #[test]
    fn serializes_the_documented_wire_format() {
        let quiz = Quiz::new(String::from("Astronomy"), vec![question("Largest planet?")]).unwrap();
        let json = serde_json::to_string(&quiz).unwrap();
        assert!(json.contains("\"correctIndex\":3"));
        assert!(json.contains("\"results\":[]"));

        // Documents written before attempt history existed omit `results`.
        let legacy = r#"{"id":1,"title":"Astronomy","questions":[
            {"text":"Largest planet?","options":["a","b","c","d"],"correctIndex":0}
        ]}"#;
        let quiz: Quiz = serde_json::from_str(legacy).unwrap();
        assert!(quiz.results.is_empty());
        assert!(quiz.validate().is_ok());
    }
}
