use std::fmt::{self, Display};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Non-positive time limit.
    InvalidTimeLimit,
    /// Tried to advance without choosing an option.
    NoSelection,
    /// The chosen option index does not exist.
    InvalidChoice,
    /// The selected quiz does not exist.
    UnknownQuiz,
    /// No attempt is currently open.
    NoSession,
    /// The question index ran past the end of the quiz.
    OutOfRange,
}

impl Error {
    /// User-correctable input, as opposed to controller misuse. The former is
    /// reported and retried; the latter aborts the operation.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidTimeLimit | Self::NoSelection | Self::InvalidChoice | Self::UnknownQuiz)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidTimeLimit => "Please enter a valid time limit.",
            Self::NoSelection => "Please select an answer before continuing.",
            Self::InvalidChoice => "That option does not exist.",
            Self::UnknownQuiz => "Quiz not found.",
            Self::NoSession => "No attempt is currently open.",
            Self::OutOfRange => "The attempt has already run past the last question.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
