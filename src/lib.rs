//! # english-review
//!
//! A terminal English review quiz: two listening passages followed by a
//! shuffled bank of grammar and vocabulary questions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use english_review::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load passages and the question bank from a JSON file
//!     let quiz = Quiz::from_json("content/grade8_review.json", None)?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The randomizing core is usable on its own:
//!
//! ```rust
//! use english_review::randomizer::shuffle;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut shuffled = shuffle(&[1, 2, 3], &mut rng);
//! shuffled.sort();
//! assert_eq!(shuffled, vec![1, 2, 3]);
//! ```

mod app;
mod data;
mod models;
pub mod randomizer;
pub mod speech;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use app::{App, Feedback, POINTS_PER_CORRECT};
pub use data::{load_content_from_json, parse_content, LoadError, ValidationError};
pub use models::{
    Answer, AppState, Choice, ListeningSession, Question, QuestionType, QuizContent,
    SpeakerConfig,
};

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading quiz content.
    Load(LoadError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load quiz content: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz from loaded content.
    ///
    /// With a `seed` every session of the run is reproducible; without one
    /// the generator is seeded from the OS.
    pub fn new(content: QuizContent, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!("using fixed shuffle seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Self {
            app: App::new(content, rng),
        }
    }

    /// Load a quiz from a JSON content file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use english_review::Quiz;
    ///
    /// let quiz = Quiz::from_json("content/grade8_review.json", Some(7)).expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P, seed: Option<u64>) -> Result<Self, QuizError> {
        let content = load_content_from_json(path)?;
        Ok(Self::new(content, seed))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz if app.feedback().is_some() => handle_feedback_input(app, key),
        AppState::Quiz if app.current_question().is_some_and(|q| !q.has_choices()) => {
            handle_typing_input(app, key)
        }
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Summary => handle_summary_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

// Letters are answer text here, so only Esc quits.
fn handle_typing_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            app.type_char(c);
            false
        }
        KeyCode::Backspace => {
            app.backspace();
            false
        }
        KeyCode::Enter => {
            app.submit_answer();
            false
        }
        KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_feedback_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
            app.advance();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_summary_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.retry();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
