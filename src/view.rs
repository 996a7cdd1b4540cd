use chrono::Local;
use model::{Question, Quiz, OPTION_COUNT};
use session::{timer::TimerEvent, Advance, Completion, Controller, Progress};
use std::io::{self, Write};

/// Whether the outer loop should keep going.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Quiz being assembled on the creator screen.
#[derive(Default)]
struct Draft {
    title: String,
    questions: Vec<Question>,
}

enum Screen {
    Dashboard,
    Creator(Draft),
    Setup { quiz: i64 },
    Quiz,
    Result,
}

/// Line-oriented adapter over the controller: renders the five screens of
/// the app (dashboard, creator, setup, quiz, result) and maps user input to
/// controller operations.
pub struct View {
    screen: Screen,
}

impl View {
    pub fn new(controller: &Controller) -> Self {
        render_dashboard(controller);
        Self { screen: Screen::Dashboard }
    }

    pub fn on_input(&mut self, controller: &mut Controller, line: &str) -> Flow {
        match self.screen {
            Screen::Dashboard => return self.on_dashboard(controller, line),
            Screen::Creator(_) => self.on_creator(controller, line),
            Screen::Setup { quiz } => self.on_setup(controller, quiz, line),
            Screen::Quiz => self.on_quiz(controller, line),
            Screen::Result => {
                render_dashboard(controller);
                self.screen = Screen::Dashboard;
            }
        }
        Flow::Continue
    }

    /// Applies a countdown signal and redraws whatever it affected: the
    /// timer readout on a tick, the result screen on a forced submission.
    pub fn on_timer(&mut self, controller: &mut Controller, event: TimerEvent) {
        if let Some(completion) = controller.on_timer_event(event) {
            println!();
            println!("Time is up! Submitting your quiz.");
            render_result(&completion);
            self.screen = Screen::Result;
            return;
        }

        if matches!(self.screen, Screen::Quiz) {
            if let Ok((_, progress)) = controller.current_question() {
                render_clock(&progress);
            }
        }
    }

    fn on_dashboard(&mut self, controller: &mut Controller, line: &str) -> Flow {
        if line == "quit" || line == "exit" {
            return Flow::Quit;
        }

        if line == "new" {
            render_creator_help();
            self.screen = Screen::Creator(Draft::default());
        } else if let Some(arg) = line.strip_prefix("start ") {
            let found = arg
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| controller.repository().quizzes().get(index));
            match found {
                Some(quiz) => {
                    println!();
                    println!("Starting: {}", quiz.title);
                    println!("Enter the time limit in minutes (or `back`):");
                    self.screen = Screen::Setup { quiz: quiz.id };
                }
                None => println!("No quiz with that number."),
            }
        } else {
            render_dashboard(controller);
        }
        Flow::Continue
    }

    fn on_creator(&mut self, controller: &mut Controller, line: &str) {
        let Screen::Creator(draft) = &mut self.screen else { return };

        if let Some(rest) = line.strip_prefix("title ") {
            draft.title = rest.trim().to_string();
            println!("Title set to \"{}\".", draft.title);
        } else if let Some(arg) = line.strip_prefix("drop ") {
            let index = arg.trim().parse::<usize>().ok().and_then(|number| number.checked_sub(1));
            match index {
                Some(index) if index < draft.questions.len() => {
                    if draft.questions.len() == 1 {
                        println!("You must keep at least one question.");
                    } else {
                        let question = draft.questions.remove(index);
                        println!("Dropped \"{}\".", question.text);
                    }
                }
                _ => println!("No question with that number."),
            }
        } else if line == "cancel" {
            render_dashboard(controller);
            self.screen = Screen::Dashboard;
        } else if line == "save" {
            match Quiz::new(draft.title.clone(), draft.questions.clone()) {
                Ok(quiz) => match controller.add_quiz(quiz) {
                    Ok(()) => {
                        println!("Quiz saved successfully!");
                        render_dashboard(controller);
                        self.screen = Screen::Dashboard;
                    }
                    Err(err) => println!("Could not save the quiz: {err}"),
                },
                // Authoring validation failed; report and keep the draft.
                Err(err) => println!("{err}"),
            }
        } else {
            match parse_question(line) {
                Ok(question) => {
                    draft.questions.push(question);
                    println!("Question {} added.", draft.questions.len());
                }
                Err(message) => println!("{message}"),
            }
        }
    }

    fn on_setup(&mut self, controller: &mut Controller, quiz: i64, line: &str) {
        if line == "back" {
            render_dashboard(controller);
            self.screen = Screen::Dashboard;
            return;
        }

        // Anything non-numeric counts as an invalid (zero) time limit.
        let minutes = line.parse().unwrap_or(0);
        match controller.open_session(quiz, minutes) {
            Ok(()) => {
                render_question(controller);
                self.screen = Screen::Quiz;
            }
            Err(err) => println!("{err}"),
        }
    }

    fn on_quiz(&mut self, controller: &mut Controller, line: &str) {
        if line == "quit" {
            controller.abandon();
            println!("Attempt abandoned; nothing was recorded.");
            render_dashboard(controller);
            self.screen = Screen::Dashboard;
            return;
        }

        let choice = line.parse::<u8>().ok().and_then(|number| number.checked_sub(1));
        match controller.submit_answer(choice) {
            Ok(Advance::Next) => render_question(controller),
            Ok(Advance::Finished(completion)) => {
                render_result(&completion);
                self.screen = Screen::Result;
            }
            Err(err) if err.is_invalid_input() => println!("{err}"),
            Err(err) => {
                // Controller misuse; bail out to the dashboard rather than
                // leave a broken attempt on screen.
                log::error!("attempt aborted: {err}");
                controller.abandon();
                render_dashboard(controller);
                self.screen = Screen::Dashboard;
            }
        }
    }
}

fn parse_question(line: &str) -> Result<Question, &'static str> {
    const USAGE: &str = "Expected: <question> | <option 1> | <option 2> | <option 3> | <option 4> | <correct #>";
    const BAD_NUMBER: &str = "The correct option must be a number between 1 and 4.";

    let fields: Vec<_> = line.split('|').map(str::trim).collect();
    let [text, a, b, c, d, correct] = fields.as_slice() else {
        return Err(USAGE);
    };

    let correct: u8 = correct.parse().map_err(|_| BAD_NUMBER)?;
    if !(1..=OPTION_COUNT as u8).contains(&correct) {
        return Err(BAD_NUMBER);
    }

    Ok(Question {
        text: (*text).to_string(),
        options: [a, b, c, d].map(|option| option.to_string()),
        correct_index: correct - 1,
    })
}

fn render_dashboard(controller: &Controller) {
    println!();
    println!("=== Quizdeck ===");
    let quizzes = controller.repository().quizzes();
    if quizzes.is_empty() {
        println!("No quizzes available. Create one to get started!");
    } else {
        for (index, quiz) in quizzes.iter().enumerate() {
            println!(
                "{:>3}. {} ({} questions, {} attempts)",
                index + 1,
                quiz.title,
                quiz.questions.len(),
                quiz.results.len()
            );
        }
    }
    println!("Commands: start <number> | new | quit");
}

fn render_creator_help() {
    println!();
    println!("Creating a new quiz.");
    println!("  title <text>");
    println!("  <question> | <option 1> | <option 2> | <option 3> | <option 4> | <correct #>");
    println!("  drop <n>");
    println!("  save | cancel");
}

fn render_question(controller: &Controller) {
    let Ok((question, progress)) = controller.current_question() else { return };
    println!();
    println!("Question {} of {}", progress.index + 1, progress.total);
    println!("{}", question.text);
    for (index, option) in question.options.iter().enumerate() {
        println!("  {}) {option}", index + 1);
    }
    render_clock(&progress);
    println!();
}

fn render_clock(progress: &Progress) {
    let warning = if progress.warning() { "  HURRY!" } else { "" };
    print!("\rTime Remaining: {}{warning}   ", progress.clock());
    let _ = io::stdout().flush();
}

fn render_result(completion: &Completion) {
    let outcome = &completion.outcome;
    println!();
    println!("Final Score: {} / {}", outcome.score, outcome.total);
    println!("Percentage: {}%", outcome.percentage);
    println!("You answered {} out of {} questions correctly.", outcome.score, outcome.total);

    println!();
    println!("Review:");
    for (index, verdict) in outcome.verdicts.iter().enumerate() {
        let mark = if verdict.is_correct { "correct" } else { "wrong" };
        println!("{:>3}. {} [{mark}]", index + 1, verdict.question);
        println!("     Your Answer: {}", verdict.chosen);
        println!("     Correct Answer: {}", verdict.correct);
    }

    println!();
    println!("Attempt History:");
    for attempt in completion.history.iter().rev() {
        let stamp = attempt.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!("  {} / {} - {}% - {stamp}", attempt.score, attempt.total, attempt.percentage);
    }
    println!();
    println!("Press Enter to return to the dashboard.");
}

#[cfg(test)]
mod tests {
    use super::{parse_question, Draft, Screen, View};
    use session::Controller;
    use std::env;
    use store::{Gateway, Repository};
    use tokio::sync::mpsc;

    fn creator_view() -> (View, Controller) {
        let path = env::temp_dir().join(format!("quizdeck-view-{}.json", std::process::id()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let controller = Controller::new(Repository::from(Gateway::new(path)), tx);

        let questions = vec![
            parse_question("First? | a | b | c | d | 1").unwrap(),
            parse_question("Second? | a | b | c | d | 2").unwrap(),
        ];
        let view = View { screen: Screen::Creator(Draft { title: String::from("Draft"), questions }) };
        (view, controller)
    }

    fn draft(view: &View) -> &Draft {
        match &view.screen {
            Screen::Creator(draft) => draft,
            _ => panic!("left the creator screen"),
        }
    }

    #[test]
    fn creator_drops_questions_but_keeps_the_last_one() {
        let (mut view, mut controller) = creator_view();

        view.on_input(&mut controller, "drop 1");
        assert_eq!(draft(&view).questions.len(), 1);
        assert_eq!(draft(&view).questions[0].text, "Second?");

        // The last remaining question cannot be dropped.
        view.on_input(&mut controller, "drop 1");
        assert_eq!(draft(&view).questions.len(), 1);

        // Out-of-range and unparsable numbers leave the draft alone.
        view.on_input(&mut controller, "drop 7");
        view.on_input(&mut controller, "drop x");
        assert_eq!(draft(&view).questions.len(), 1);
    }

    #[test]
    fn question_lines_are_parsed_field_by_field() {
        let question = parse_question("Largest planet? | Mercury | Venus | Earth | Jupiter | 4").unwrap();
        assert_eq!(question.text, "Largest planet?");
        assert_eq!(question.correct_index, 3);

        assert!(parse_question("missing | fields | 2").is_err());
        assert!(parse_question("q | a | b | c | d | 5").is_err());
        assert!(parse_question("q | a | b | c | d | x").is_err());
    }
}
