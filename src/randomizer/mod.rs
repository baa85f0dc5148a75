//! Randomized session building.
//!
//! Every function here is pure over its inputs: callers pass the content and
//! an RNG, and get back fresh values. Nothing shared is mutated.

mod assembly;
mod relabel;
mod shuffle;

pub use assembly::{
    assemble_session, DeckEntry, QuizDeck, Section, SectionSpan, LEAD_QUESTIONS_PER_PASSAGE,
};
pub use relabel::{choice_label, relabel_choices, Relabeled};
pub use shuffle::shuffle;
