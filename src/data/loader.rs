use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::models::{
    Answer, Choice, ListeningSession, Question, QuestionType, QuizContent, SpeakerConfig,
};

use super::validate::{validate_content, validate_question, ValidationError};

/// Error loading quiz content.
#[derive(Debug)]
pub enum LoadError {
    /// The content file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The content file is not valid JSON for the expected shape.
    Parse(serde_json::Error),
    /// A record failed validation.
    Invalid(ValidationError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
            LoadError::Parse(e) => write!(f, "invalid content JSON: {}", e),
            LoadError::Invalid(e) => write!(f, "invalid question: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

impl From<ValidationError> for LoadError {
    fn from(err: ValidationError) -> Self {
        LoadError::Invalid(err)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    listening: Vec<RawSession>,
    #[serde(default)]
    bank: Vec<RawQuestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    title: String,
    #[serde(default)]
    description: String,
    listening_script: Option<String>,
    #[serde(default)]
    is_multi_speaker: bool,
    #[serde(default)]
    speaker_configs: Vec<SpeakerConfig>,
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawQuestion {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: QuestionType,
    pub(super) question_text: String,
    pub(super) choices: Option<Vec<Choice>>,
    pub(super) correct_answer: String,
    pub(super) explanation: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = ValidationError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        validate_question(&raw)?;

        let answer = match raw.choices {
            Some(choices) if !choices.is_empty() => Answer::Choices {
                choices,
                correct: raw.correct_answer,
            },
            _ => Answer::Open {
                correct: raw.correct_answer,
            },
        };

        Ok(Question {
            id: raw.id,
            kind: raw.kind,
            text: raw.question_text,
            answer,
            explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
        })
    }
}

fn convert_questions(raw: Vec<RawQuestion>) -> Result<Vec<Question>, ValidationError> {
    raw.into_iter().map(Question::try_from).collect()
}

impl TryFrom<RawSession> for ListeningSession {
    type Error = ValidationError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        Ok(ListeningSession {
            title: raw.title,
            description: raw.description,
            listening_script: raw.listening_script.filter(|s| !s.trim().is_empty()),
            is_multi_speaker: raw.is_multi_speaker,
            speaker_configs: raw.speaker_configs,
            questions: convert_questions(raw.questions)?,
        })
    }
}

/// Parse and validate quiz content from a JSON string.
pub fn parse_content(json: &str) -> Result<QuizContent, LoadError> {
    let raw: RawContent = serde_json::from_str(json)?;

    let listening = raw
        .listening
        .into_iter()
        .map(ListeningSession::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let content = QuizContent {
        title: raw.title,
        subtitle: raw.subtitle,
        listening,
        bank: convert_questions(raw.bank)?,
    };

    validate_content(&content)?;
    Ok(content)
}

/// Load quiz content from a JSON file.
pub fn load_content_from_json<P: AsRef<Path>>(path: P) -> Result<QuizContent, LoadError> {
    let path = path.as_ref();
    debug!("reading content from {}", path.display());

    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = parse_content(&json)?;

    info!(
        "loaded {} listening passages and {} bank questions from {}",
        content.listening.len(),
        content.bank.len(),
        path.display()
    );
    Ok(content)
}
