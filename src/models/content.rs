use serde::Deserialize;

use super::Question;

/// Voice assigned to one speaker of a multi-speaker script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeakerConfig {
    pub speaker: String,
    pub voice: String,
}

/// A listening passage and the questions that go with it.
#[derive(Debug, Clone)]
pub struct ListeningSession {
    pub title: String,
    pub description: String,
    pub listening_script: Option<String>,
    pub is_multi_speaker: bool,
    pub speaker_configs: Vec<SpeakerConfig>,
    pub questions: Vec<Question>,
}

/// Everything a quiz is built from. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct QuizContent {
    pub title: String,
    pub subtitle: String,
    pub listening: Vec<ListeningSession>,
    pub bank: Vec<Question>,
}
