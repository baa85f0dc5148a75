use log::{debug, info};
use rand::Rng;

use crate::models::{ListeningSession, Question, QuizContent};

use super::{relabel_choices, shuffle};

/// Questions kept from the start of each listening passage, in order.
pub const LEAD_QUESTIONS_PER_PASSAGE: usize = 5;

/// Where a deck question comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Questions on the listening passage at this index.
    Listening(usize),
    /// The shuffled multiple-choice bank.
    Bank,
}

/// A contiguous run of deck questions from one section, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    pub first: usize,
    pub last: usize,
}

#[derive(Debug, Clone)]
pub struct DeckEntry {
    pub section: Section,
    pub question: Question,
}

/// One randomized attempt at the quiz.
#[derive(Debug, Clone)]
pub struct QuizDeck {
    session_id: u64,
    entries: Vec<DeckEntry>,
    fallbacks: usize,
}

impl QuizDeck {
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Question at a 0-based index.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.entries.get(index).map(|entry| &entry.question)
    }

    pub fn section(&self, index: usize) -> Option<Section> {
        self.entries.get(index).map(|entry| entry.section)
    }

    /// 1-based number shown to the user for a 0-based index.
    pub fn number(&self, index: usize) -> usize {
        index + 1
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.entries.iter().map(|entry| &entry.question)
    }

    /// How many bank questions had their correct answer reset to "A".
    pub fn relabel_fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Runs of consecutive questions sharing a section.
    pub fn spans(&self) -> Vec<SectionSpan> {
        let mut spans: Vec<SectionSpan> = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let number = self.number(index);
            match spans.last_mut() {
                Some(span) if span.section == entry.section => span.last = number,
                _ => spans.push(SectionSpan {
                    section: entry.section,
                    first: number,
                    last: number,
                }),
            }
        }
        spans
    }
}

fn lead_questions(passage: &ListeningSession) -> impl Iterator<Item = &Question> {
    passage.questions.iter().take(LEAD_QUESTIONS_PER_PASSAGE)
}

/// Build a fresh deck: listening questions first in their original order,
/// then the whole bank in random order with each question's choices
/// shuffled and relabeled.
pub fn assemble_session<R: Rng + ?Sized>(
    content: &QuizContent,
    session_id: u64,
    rng: &mut R,
) -> QuizDeck {
    let mut entries = Vec::new();

    for (passage_index, passage) in content.listening.iter().enumerate() {
        entries.extend(lead_questions(passage).map(|question| DeckEntry {
            section: Section::Listening(passage_index),
            question: question.clone(),
        }));
    }

    let mut fallbacks = 0;
    for question in shuffle(&content.bank, rng) {
        let relabeled = relabel_choices(&question, rng);
        if relabeled.fell_back {
            fallbacks += 1;
        }
        entries.push(DeckEntry {
            section: Section::Bank,
            question: relabeled.question,
        });
    }

    debug!(
        "session {}: {} listening, {} bank questions",
        session_id,
        entries.len() - content.bank.len(),
        content.bank.len()
    );
    if fallbacks > 0 {
        info!(
            "session {}: {} questions lost their correct answer while relabeling",
            session_id, fallbacks
        );
    }

    QuizDeck {
        session_id,
        entries,
        fallbacks,
    }
}
