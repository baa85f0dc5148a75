use log::warn;
use rand::Rng;

use crate::models::{Answer, Choice, Question};

use super::shuffle;

const ALPHABET_LEN: usize = 26;

/// Display label for a 0-based choice position: 0 → "A", 25 → "Z", 26 → "AA".
pub fn choice_label(position: usize) -> String {
    let mut n = position + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % ALPHABET_LEN;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / ALPHABET_LEN;
    }
    letters.iter().rev().collect()
}

/// Outcome of [`relabel_choices`].
#[derive(Debug, Clone)]
pub struct Relabeled {
    pub question: Question,
    /// The correct choice could not be found again and "A" was used instead.
    pub fell_back: bool,
}

/// Shuffle a question's choices and relabel them A, B, C… by position,
/// moving the correct answer to whichever label its text landed on.
///
/// Open questions pass through unchanged.
pub fn relabel_choices<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Relabeled {
    let Answer::Choices { choices, correct } = &question.answer else {
        return Relabeled {
            question: question.clone(),
            fell_back: false,
        };
    };

    let correct_text = choices
        .iter()
        .find(|choice| &choice.id == correct)
        .map(|choice| choice.text.as_str());

    let relabeled: Vec<Choice> = shuffle(choices, rng)
        .into_iter()
        .enumerate()
        .map(|(position, choice)| Choice {
            id: choice_label(position),
            text: choice.text,
        })
        .collect();

    let new_correct = correct_text.and_then(|text| {
        relabeled
            .iter()
            .find(|choice| choice.text == text)
            .map(|choice| choice.id.clone())
    });

    let fell_back = new_correct.is_none();
    if fell_back {
        warn!(
            "question {}: correct answer {:?} matches no choice after relabeling, defaulting to \"A\"",
            question.id, correct
        );
    }

    Relabeled {
        question: Question {
            answer: Answer::Choices {
                correct: new_correct.unwrap_or_else(|| choice_label(0)),
                choices: relabeled,
            },
            ..question.clone()
        },
        fell_back,
    }
}
