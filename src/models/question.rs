use serde::Deserialize;

/// Kind of question as declared in the content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Ordering,
    ErrorId,
}

/// A labeled option. The label is positional; `text` is what identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick one of `choices`; `correct` is the id of exactly one of them.
    Choices { choices: Vec<Choice>, correct: String },
    /// Free-form typed answer.
    Open { correct: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable identity, never changed by shuffling.
    pub id: String,
    pub kind: QuestionType,
    pub text: String,
    pub answer: Answer,
    pub explanation: Option<String>,
}

impl Question {
    pub fn choices(&self) -> &[Choice] {
        match &self.answer {
            Answer::Choices { choices, .. } => choices,
            Answer::Open { .. } => &[],
        }
    }

    pub fn has_choices(&self) -> bool {
        matches!(self.answer, Answer::Choices { .. })
    }

    /// Id of the correct choice, or the expected text for open questions.
    pub fn correct_answer(&self) -> &str {
        match &self.answer {
            Answer::Choices { correct, .. } | Answer::Open { correct } => correct,
        }
    }

    /// The choice the correct answer currently points at.
    pub fn correct_choice(&self) -> Option<&Choice> {
        match &self.answer {
            Answer::Choices { choices, correct } => choices.iter().find(|c| &c.id == correct),
            Answer::Open { .. } => None,
        }
    }

    /// Check a submitted answer: a choice id, or typed text for open questions.
    pub fn is_correct(&self, submitted: &str) -> bool {
        match &self.answer {
            Answer::Choices { correct, .. } => submitted == correct,
            Answer::Open { correct } => {
                submitted.trim().to_lowercase() == correct.trim().to_lowercase()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: &str, text: &str) -> Choice {
        Choice {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_choice_question_checks_by_id() {
        let question = Question {
            id: "q1".to_string(),
            kind: QuestionType::MultipleChoice,
            text: "Which one barks?".to_string(),
            answer: Answer::Choices {
                choices: vec![choice("A", "cat"), choice("B", "dog")],
                correct: "B".to_string(),
            },
            explanation: None,
        };

        assert!(question.is_correct("B"));
        assert!(!question.is_correct("A"));
        assert!(!question.is_correct("dog"));
        assert_eq!(question.correct_choice().map(|c| c.text.as_str()), Some("dog"));
    }

    #[test]
    fn test_open_question_ignores_case_and_whitespace() {
        let question = Question {
            id: "q2".to_string(),
            kind: QuestionType::ErrorId,
            text: "Find the error".to_string(),
            answer: Answer::Open {
                correct: "Went".to_string(),
            },
            explanation: None,
        };

        assert!(question.is_correct("  went "));
        assert!(!question.is_correct("go"));
        assert!(question.choices().is_empty());
        assert!(!question.has_choices());
    }
}
