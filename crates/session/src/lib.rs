pub mod error;
pub mod score;
pub mod timer;

use error::{Error, Result};
use model::{Attempt, Question, Quiz, OPTION_COUNT};
use score::Outcome;
use store::Repository;
use timer::{Countdown, SessionId, TimerEvent};
use tokio::sync::mpsc;

/// One in-progress timed attempt. The repository remains the owner of the
/// quiz; the session refers to it by id only.
struct Session {
    id: SessionId,
    quiz: i64,
    question_index: usize,
    answers: Vec<Option<u8>>,
    duration: u32,
    remaining: u32,
    countdown: Countdown,
}

/// Where the attempt stands, for progress and timer rendering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Progress {
    /// Zero-based index of the question on display.
    pub index: usize,
    pub total: usize,
    pub remaining: u32,
    pub duration: u32,
}

impl Progress {
    pub fn clock(&self) -> String {
        timer::format_remaining(self.remaining)
    }

    pub const fn warning(&self) -> bool {
        timer::is_warning(self.remaining, self.duration)
    }
}

/// What happened after an answer was accepted.
#[derive(Debug, Eq, PartialEq)]
pub enum Advance {
    /// More questions remain.
    Next,
    /// That was the last question; the attempt has been scored and recorded.
    Finished(Completion),
}

/// A scored, recorded attempt handed to the view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Completion {
    /// Whether the timer forced the submission.
    pub forced: bool,
    pub outcome: Outcome,
    /// Attempt history of the quiz after this record was appended, cloned
    /// from the repository's canonical copy rather than the session's
    /// (possibly stale) reference.
    pub history: Vec<Attempt>,
}

/// Owns the repository and the single active attempt, and serializes the two
/// sources of mutation: user-driven calls and countdown signals.
pub struct Controller {
    repository: Repository,
    events: mpsc::UnboundedSender<TimerEvent>,
    active: Option<Session>,
    serial: u64,
}

impl Controller {
    pub fn new(repository: Repository, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { repository, events, active: None, serial: 0 }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Authoring passthrough: the caller supplies an already-validated quiz.
    pub fn add_quiz(&mut self, quiz: Quiz) -> store::error::Result<()> {
        self.repository.save(quiz)
    }

    /// Identity of the attempt in flight, if any.
    pub fn active(&self) -> Option<SessionId> {
        self.active.as_ref().map(|session| session.id)
    }

    /// Opens a fresh attempt, discarding (without recording) any attempt that
    /// was still running.
    pub fn open_session(&mut self, quiz_id: i64, minutes: u32) -> Result<()> {
        if minutes == 0 {
            return Err(Error::InvalidTimeLimit);
        }
        // The limit arrives straight from user input; a value that overflows
        // the second count is as invalid as zero.
        let duration = minutes.checked_mul(60).ok_or(Error::InvalidTimeLimit)?;
        let quiz = self.repository.get(quiz_id).ok_or(Error::UnknownQuiz)?;
        let answers = vec![None; quiz.questions.len()];

        // The superseded schedule must stop before the new one starts; at
        // most one countdown may be live.
        self.abandon();
        self.serial += 1;
        let id = SessionId(self.serial);
        let countdown = Countdown::start(id, duration, self.events.clone());
        self.active =
            Some(Session { id, quiz: quiz_id, question_index: 0, answers, duration, remaining: duration, countdown });
        Ok(())
    }

    /// Drops the attempt in flight without scoring it.
    pub fn abandon(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.countdown.stop();
        }
    }

    pub fn current_question(&self) -> Result<(&Question, Progress)> {
        let session = self.active.as_ref().ok_or(Error::NoSession)?;
        let quiz = self.repository.get(session.quiz).ok_or(Error::OutOfRange)?;
        let question = quiz.questions.get(session.question_index).ok_or(Error::OutOfRange)?;
        let progress = Progress {
            index: session.question_index,
            total: quiz.questions.len(),
            remaining: session.remaining,
            duration: session.duration,
        };
        Ok((question, progress))
    }

    /// Records an answer for the question on display and advances. `None`
    /// means nothing was selected, which is rejected with the attempt left
    /// untouched. Answering the last question finishes the attempt normally.
    pub fn submit_answer(&mut self, choice: Option<u8>) -> Result<Advance> {
        let choice = choice.ok_or(Error::NoSelection)?;
        if usize::from(choice) >= OPTION_COUNT {
            return Err(Error::InvalidChoice);
        }

        let session = self.active.as_mut().ok_or(Error::NoSession)?;
        let slot = session.answers.get_mut(session.question_index).ok_or(Error::OutOfRange)?;
        *slot = Some(choice);
        session.question_index += 1;

        if session.question_index < session.answers.len() {
            return Ok(Advance::Next);
        }
        // Manual finish. The completion is only ever missing when the quiz
        // vanished mid-attempt, which has no user-facing path today.
        self.complete(false).map(Advance::Finished).ok_or(Error::OutOfRange)
    }

    /// Applies a countdown signal. Signals tagged with a superseded or
    /// already-completed session are dropped, which is what makes completion
    /// idempotent under a late expiry.
    pub fn on_timer_event(&mut self, event: TimerEvent) -> Option<Completion> {
        match event {
            TimerEvent::Tick { session, remaining, .. } => {
                if let Some(active) = self.active.as_mut() {
                    if active.id == session {
                        active.remaining = remaining;
                    }
                }
                None
            }
            TimerEvent::Expired { session } => match self.active.as_ref() {
                Some(active) if active.id == session => self.complete(true),
                _ => {
                    log::debug!("dropping stale expiry signal for {session:?}");
                    None
                }
            },
        }
    }

    /// Scores the attempt, appends the record through the repository, and
    /// hands back the outcome together with the refreshed history.
    fn complete(&mut self, forced: bool) -> Option<Completion> {
        let mut session = self.active.take()?;
        session.countdown.stop();

        let Some(quiz) = self.repository.get(session.quiz) else {
            log::warn!("quiz {} vanished mid-attempt; dropping the record", session.quiz);
            return None;
        };
        let outcome = score::grade(quiz, &session.answers);
        let attempt = Attempt::now(outcome.score, outcome.total, outcome.percentage);
        let history = self.repository.append_result(session.quiz, attempt).map(|quiz| quiz.results.clone())?;
        Some(Completion { forced, outcome, history })
    }
}
