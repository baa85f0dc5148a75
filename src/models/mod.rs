mod content;
mod question;

pub use content::{ListeningSession, QuizContent, SpeakerConfig};
pub use question::{Answer, Choice, Question, QuestionType};

/// Which screen the quiz is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Summary,
}
