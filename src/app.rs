use log::{debug, info};
use rand::rngs::StdRng;

use crate::models::{AppState, ListeningSession, Question, QuizContent};
use crate::randomizer::{assemble_session, QuizDeck, Section};

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT: usize = 10;

/// Result of the answer submitted for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub submitted: String,
    pub is_correct: bool,
}

/// Quiz controller. All state lives here and changes only through the
/// event methods below.
pub struct App {
    pub state: AppState,
    content: QuizContent,
    deck: QuizDeck,
    rng: StdRng,
    current_question_index: usize,
    selected_option: usize,
    typed_answer: String,
    answers: Vec<Option<String>>,
    score: usize,
    feedback: Option<Feedback>,
    result_scroll: usize,
}

impl App {
    /// Create the controller and assemble the first session.
    pub fn new(content: QuizContent, mut rng: StdRng) -> Self {
        let deck = assemble_session(&content, 1, &mut rng);
        let num_questions = deck.len();

        Self {
            state: AppState::Welcome,
            content,
            deck,
            rng,
            current_question_index: 0,
            selected_option: 0,
            typed_answer: String::new(),
            answers: vec![None; num_questions],
            score: 0,
            feedback: None,
            result_scroll: 0,
        }
    }

    pub fn content(&self) -> &QuizContent {
        &self.content
    }

    pub fn deck(&self) -> &QuizDeck {
        &self.deck
    }

    pub fn session_id(&self) -> u64 {
        self.deck.session_id()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.deck.get(self.current_question_index)
    }

    pub fn current_section(&self) -> Option<Section> {
        self.deck.section(self.current_question_index)
    }

    /// Listening passage for the current question, if it belongs to one.
    pub fn current_passage(&self) -> Option<&ListeningSession> {
        match self.current_section()? {
            Section::Listening(index) => self.content.listening.get(index),
            Section::Bank => None,
        }
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.deck.number(self.current_question_index)
    }

    pub fn total_questions(&self) -> usize {
        self.deck.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn typed_answer(&self) -> &str {
        &self.typed_answer
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn max_score(&self) -> usize {
        self.total_questions() * POINTS_PER_CORRECT
    }

    pub fn percentage(&self) -> f64 {
        let max = self.max_score();
        if max > 0 {
            (self.score as f64 / max as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(self.deck.questions())
            .filter(|(answer, question)| {
                answer
                    .as_deref()
                    .is_some_and(|submitted| question.is_correct(submitted))
            })
            .count()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.choices().len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 && self.feedback.is_none() {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 && self.feedback.is_none() {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Append a character to the answer of an open question.
    pub fn type_char(&mut self, c: char) {
        let is_open = self.current_question().is_some_and(|q| !q.has_choices());
        if is_open && self.feedback.is_none() {
            self.typed_answer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.feedback.is_none() {
            self.typed_answer.pop();
        }
    }

    pub fn start_quiz(&mut self) {
        if self.deck.is_empty() {
            info!("session {} has no questions", self.session_id());
            self.state = AppState::Summary;
        } else {
            info!(
                "session {} started with {} questions",
                self.session_id(),
                self.total_questions()
            );
            self.state = AppState::Quiz;
        }
    }

    /// Record the selected choice (or typed text) and reveal feedback.
    ///
    /// Ignored while feedback for the current question is already showing.
    pub fn submit_answer(&mut self) {
        if self.state != AppState::Quiz || self.feedback.is_some() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };

        let submitted = if question.has_choices() {
            match question.choices().get(self.selected_option) {
                Some(choice) => choice.id.clone(),
                None => return,
            }
        } else {
            let typed = self.typed_answer.trim();
            if typed.is_empty() {
                return;
            }
            typed.to_string()
        };

        let is_correct = question.is_correct(&submitted);
        debug!(
            "question {} ({}): submitted {:?}, correct: {}",
            self.current_question_number(),
            question.id,
            submitted,
            is_correct
        );

        if is_correct {
            self.score += POINTS_PER_CORRECT;
        }
        self.answers[self.current_question_index] = Some(submitted.clone());
        self.feedback = Some(Feedback {
            submitted,
            is_correct,
        });
    }

    /// Move past the current question once its feedback has been shown.
    pub fn advance(&mut self) {
        if self.state != AppState::Quiz || self.feedback.is_none() {
            return;
        }

        self.feedback = None;
        self.selected_option = 0;
        self.typed_answer.clear();

        if self.current_question_index + 1 < self.total_questions() {
            self.current_question_index += 1;
        } else {
            info!(
                "session {} finished: {}/{}",
                self.session_id(),
                self.score,
                self.max_score()
            );
            self.state = AppState::Summary;
        }
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.total_questions() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Throw away the current attempt and assemble a new one.
    pub fn retry(&mut self) {
        let next_id = self.session_id() + 1;
        self.deck = assemble_session(&self.content, next_id, &mut self.rng);

        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.typed_answer.clear();
        self.answers = vec![None; self.deck.len()];
        self.score = 0;
        self.feedback = None;
        self.result_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::models::{Answer, Choice, QuestionType};

    fn mc(id: &str) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionType::MultipleChoice,
            text: format!("Question {}", id),
            answer: Answer::Choices {
                choices: ["right", "wrong", "also wrong"]
                    .iter()
                    .enumerate()
                    .map(|(i, text)| Choice {
                        id: crate::randomizer::choice_label(i),
                        text: text.to_string(),
                    })
                    .collect(),
                correct: "A".to_string(),
            },
            explanation: None,
        }
    }

    fn app(bank_size: usize) -> App {
        let content = QuizContent {
            title: "Review".to_string(),
            subtitle: String::new(),
            listening: Vec::new(),
            bank: (0..bank_size).map(|i| mc(&format!("mc{}", i))).collect(),
        };
        App::new(content, StdRng::seed_from_u64(21))
    }

    fn correct_index(app: &App) -> usize {
        app.current_question()
            .unwrap()
            .choices()
            .iter()
            .position(|c| c.text == "right")
            .unwrap()
    }

    fn select(app: &mut App, index: usize) {
        while app.selected_option() != index {
            app.select_next_option();
        }
    }

    #[test]
    fn test_correct_answer_scores_points() {
        let mut app = app(3);
        app.start_quiz();
        assert_eq!(app.state, AppState::Quiz);

        let target = correct_index(&app);
        select(&mut app, target);
        app.submit_answer();

        assert_eq!(app.score(), POINTS_PER_CORRECT);
        assert!(app.feedback().unwrap().is_correct);
    }

    #[test]
    fn test_wrong_answer_scores_nothing() {
        let mut app = app(3);
        app.start_quiz();

        let target = (correct_index(&app) + 1) % 3;
        select(&mut app, target);
        app.submit_answer();

        assert_eq!(app.score(), 0);
        assert!(!app.feedback().unwrap().is_correct);
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut app = app(3);
        app.start_quiz();

        let target = correct_index(&app);
        select(&mut app, target);
        app.submit_answer();
        app.submit_answer();

        assert_eq!(app.score(), POINTS_PER_CORRECT);
    }

    #[test]
    fn test_selection_frozen_during_feedback() {
        let mut app = app(2);
        app.start_quiz();
        app.submit_answer();

        let selected = app.selected_option();
        app.select_next_option();
        assert_eq!(app.selected_option(), selected);
    }

    #[test]
    fn test_advance_requires_feedback() {
        let mut app = app(3);
        app.start_quiz();

        app.advance();
        assert_eq!(app.current_question_index(), 0);

        app.submit_answer();
        app.advance();
        assert_eq!(app.current_question_index(), 1);
        assert_eq!(app.current_question_number(), 2);
        assert!(app.feedback().is_none());
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn test_last_question_leads_to_summary() {
        let mut app = app(2);
        app.start_quiz();

        for _ in 0..2 {
            let target = correct_index(&app);
            select(&mut app, target);
            app.submit_answer();
            app.advance();
        }

        assert_eq!(app.state, AppState::Summary);
        assert_eq!(app.score(), 20);
        assert_eq!(app.max_score(), 20);
        assert_eq!(app.correct_count(), 2);
        assert!((app.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retry_resets_and_reassembles() {
        let mut app = app(6);
        app.start_quiz();
        let target = correct_index(&app);
        select(&mut app, target);
        app.submit_answer();
        app.advance();

        let first_order: Vec<String> = app.deck().questions().map(|q| q.id.clone()).collect();
        app.retry();

        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.session_id(), 2);
        assert_eq!(app.score(), 0);
        assert_eq!(app.current_question_index(), 0);
        assert!(app.answers().iter().all(|a| a.is_none()));
        assert_eq!(app.total_questions(), 6);

        let mut second_order: Vec<String> = app.deck().questions().map(|q| q.id.clone()).collect();
        let mut sorted_first = first_order.clone();
        sorted_first.sort();
        second_order.sort();
        assert_eq!(sorted_first, second_order);
    }

    #[test]
    fn test_empty_deck_goes_to_summary() {
        let mut app = app(0);
        app.start_quiz();

        assert_eq!(app.state, AppState::Summary);
        assert_eq!(app.total_questions(), 0);
        assert_eq!(app.percentage(), 0.0);
        assert!(app.current_question().is_none());
    }

    #[test]
    fn test_open_question_typed_answer() {
        let content = QuizContent {
            bank: vec![Question {
                id: "open".to_string(),
                kind: QuestionType::ErrorId,
                text: "Yesterday I go home.".to_string(),
                answer: Answer::Open {
                    correct: "go".to_string(),
                },
                explanation: None,
            }],
            ..Default::default()
        };
        let mut app = App::new(content, StdRng::seed_from_u64(1));
        app.start_quiz();

        app.submit_answer();
        assert!(app.feedback().is_none());

        app.type_char('G');
        app.type_char('x');
        app.backspace();
        app.type_char('O');
        assert_eq!(app.typed_answer(), "GO");

        app.submit_answer();
        assert!(app.feedback().unwrap().is_correct);
        assert_eq!(app.answers()[0].as_deref(), Some("GO"));
        assert_eq!(app.score(), POINTS_PER_CORRECT);
    }
}
