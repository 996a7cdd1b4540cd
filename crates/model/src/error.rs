use std::fmt::{self, Display};

/// Authoring-boundary rejections. Question indices are zero-based internally
/// and rendered one-based for the user.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    EmptyTitle,
    NoQuestions,
    EmptyQuestion(usize),
    EmptyOption(usize),
    BadCorrectIndex(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("Please enter a quiz title."),
            Self::NoQuestions => f.write_str("Please add at least one question."),
            Self::EmptyQuestion(index) => write!(f, "Question {} is empty.", index + 1),
            Self::EmptyOption(index) => write!(f, "Please fill all options for Question {}.", index + 1),
            Self::BadCorrectIndex(index) => write!(f, "Question {} has no valid correct answer.", index + 1),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
