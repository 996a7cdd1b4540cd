pub mod error;

use model::{Attempt, Quiz};
use std::{fs, io::ErrorKind, path::PathBuf};

/// Reads and writes the entire quiz collection as one JSON document. There
/// are no partial updates; every mutation rewrites the whole file.
pub struct Gateway {
    path: PathBuf,
}

impl Gateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the whole collection. A missing, unreadable, or unparsable
    /// document degrades to an empty collection; startup never fails on
    /// bad data.
    pub fn read(&self) -> Vec<Quiz> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                log::warn!("cannot read {}: {err}", self.path.display());
                return Vec::new();
            }
        };

        let quizzes: Vec<Quiz> = match serde_json::from_slice(&bytes) {
            Ok(quizzes) => quizzes,
            Err(err) => {
                log::warn!("discarding corrupt document at {}: {err}", self.path.display());
                return Vec::new();
            }
        };

        // A document that parses but breaks the quiz invariants (e.g. an
        // out-of-range correct index) is corrupt all the same.
        if let Some(err) = quizzes.iter().find_map(|quiz| quiz.validate().err()) {
            log::warn!("discarding malformed document at {}: {err}", self.path.display());
            return Vec::new();
        }

        quizzes
    }

    /// Rewrites the whole collection.
    pub fn write(&self, quizzes: &[Quiz]) -> error::Result<()> {
        let bytes = serde_json::to_vec(quizzes)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// In-memory source of truth for the process lifetime, synchronized to the
/// [`Gateway`] on every mutation.
pub struct Repository {
    gateway: Gateway,
    quizzes: Vec<Quiz>,
}

impl From<Gateway> for Repository {
    fn from(gateway: Gateway) -> Self {
        let quizzes = gateway.read();
        Self { gateway, quizzes }
    }
}

impl Repository {
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn get(&self, id: i64) -> Option<&Quiz> {
        self.quizzes.iter().find(|quiz| quiz.id == id)
    }

    /// Appends a newly authored quiz and persists the collection.
    pub fn save(&mut self, quiz: Quiz) -> error::Result<()> {
        if self.get(quiz.id).is_some() {
            return Err(error::Error::Duplicate);
        }

        self.quizzes.push(quiz);
        self.persist();
        Ok(())
    }

    /// Appends an attempt to the quiz with the given id and persists the
    /// collection. An absent id means the quiz was deleted out from under a
    /// finished session; the record is silently dropped. Returns the updated
    /// quiz so callers can refresh any reference they still hold.
    pub fn append_result(&mut self, id: i64, attempt: Attempt) -> Option<&Quiz> {
        let index = self.quizzes.iter().position(|quiz| quiz.id == id)?;
        self.quizzes[index].results.push(attempt);
        self.persist();
        Some(&self.quizzes[index])
    }

    /// The in-memory mutation has already happened by the time we get here;
    /// a failed write must not roll it back, only leave a trace.
    fn persist(&self) {
        if let Err(err) = self.gateway.write(&self.quizzes) {
            log::warn!("cannot persist {} quizzes: {err}", self.quizzes.len());
        }
    }
}
