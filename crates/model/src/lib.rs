pub mod error;
pub mod quiz;
pub mod result;

pub use quiz::{Question, Quiz, OPTION_COUNT};
pub use result::Attempt;
