//! Content checks run at load time, before anything reaches the randomizer.
//!
//! Relabeling matches choices by text, so a question with duplicate choice
//! texts or a `correctAnswer` that names no choice is rejected here.

use std::collections::HashSet;
use std::fmt;

use crate::models::QuizContent;

use super::loader::RawQuestion;

/// A question record that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyQuestionText { question: String },
    EmptyCorrectAnswer { question: String },
    UnknownCorrectChoice { question: String, answer: String },
    DuplicateChoiceId { question: String, choice: String },
    DuplicateChoiceText { question: String, text: String },
    DuplicateQuestionId { question: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyQuestionText { question } => {
                write!(f, "{}: question text is empty", question)
            }
            ValidationError::EmptyCorrectAnswer { question } => {
                write!(f, "{}: correctAnswer is empty", question)
            }
            ValidationError::UnknownCorrectChoice { question, answer } => write!(
                f,
                "{}: correctAnswer {:?} does not match any choice id",
                question, answer
            ),
            ValidationError::DuplicateChoiceId { question, choice } => {
                write!(f, "{}: choice id {:?} appears more than once", question, choice)
            }
            ValidationError::DuplicateChoiceText { question, text } => {
                write!(f, "{}: choice text {:?} appears more than once", question, text)
            }
            ValidationError::DuplicateQuestionId { question } => {
                write!(f, "{}: question id is used more than once", question)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub(super) fn validate_question(raw: &RawQuestion) -> Result<(), ValidationError> {
    if raw.question_text.trim().is_empty() {
        return Err(ValidationError::EmptyQuestionText {
            question: raw.id.clone(),
        });
    }

    if raw.correct_answer.trim().is_empty() {
        return Err(ValidationError::EmptyCorrectAnswer {
            question: raw.id.clone(),
        });
    }

    let Some(choices) = raw.choices.as_deref().filter(|c| !c.is_empty()) else {
        return Ok(());
    };

    let mut ids = HashSet::new();
    let mut texts = HashSet::new();
    for choice in choices {
        if !ids.insert(choice.id.as_str()) {
            return Err(ValidationError::DuplicateChoiceId {
                question: raw.id.clone(),
                choice: choice.id.clone(),
            });
        }
        if !texts.insert(choice.text.as_str()) {
            return Err(ValidationError::DuplicateChoiceText {
                question: raw.id.clone(),
                text: choice.text.clone(),
            });
        }
    }

    if !ids.contains(raw.correct_answer.as_str()) {
        return Err(ValidationError::UnknownCorrectChoice {
            question: raw.id.clone(),
            answer: raw.correct_answer.clone(),
        });
    }

    Ok(())
}

/// Checks that span the whole content set.
pub(super) fn validate_content(content: &QuizContent) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let all_questions = content
        .listening
        .iter()
        .flat_map(|session| session.questions.iter())
        .chain(content.bank.iter());

    for question in all_questions {
        if !seen.insert(question.id.as_str()) {
            return Err(ValidationError::DuplicateQuestionId {
                question: question.id.clone(),
            });
        }
    }

    Ok(())
}
