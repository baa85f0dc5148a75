use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Feedback, POINTS_PER_CORRECT};
use crate::models::{ListeningSession, Question};

use super::{section_color, section_label};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };
    let passage = app.current_passage();
    let feedback = app.feedback();

    let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
    if passage.is_some() {
        constraints.push(Constraint::Max(12));
    }
    constraints.extend([Constraint::Length(3), Constraint::Fill(1)]);
    if feedback.is_some() {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::vertical(constraints).margin(1).split(area);
    let mut next = 0;
    let mut take = || {
        let chunk = chunks[next];
        next += 1;
        chunk
    };

    render_header(frame, take(), app);
    render_progress(frame, take(), app);
    if let Some(passage) = passage {
        render_passage(frame, take(), passage);
    }
    render_question_text(frame, take(), app.current_question_number(), &question.text);

    let answer_area = take();
    if question.has_choices() {
        render_options(frame, answer_area, question, app.selected_option(), feedback);
    } else {
        render_typed_answer(frame, answer_area, app.typed_answer(), feedback.is_some());
    }

    if let Some(feedback) = feedback {
        render_feedback(frame, take(), question, feedback);
    }
    render_controls(frame, take(), question.has_choices(), feedback.is_some());
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(16)]).areas(area);

    if let Some(section) = app.current_section() {
        let badge = Paragraph::new(section_label(app, section).to_uppercase())
            .fg(section_color(section))
            .bold();
        frame.render_widget(badge, left);
    }

    let score = Paragraph::new(format!("SCORE: {}", app.score()))
        .alignment(Alignment::Right)
        .fg(Color::Yellow)
        .bold();
    frame.render_widget(score, right);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{} / {}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_passage(frame: &mut Frame, area: Rect, passage: &ListeningSession) {
    let script = passage
        .listening_script
        .as_deref()
        .unwrap_or("(no script for this passage)");

    let widget = Paragraph::new(script)
        .wrap(Wrap { trim: false })
        .fg(Color::Gray)
        .italic()
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", passage.title),
                    Style::default().fg(Color::Cyan).bold(),
                ))
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, number: usize, text: &str) {
    let line = Line::from(vec![
        Span::styled(format!("{}. ", number), Style::default().fg(Color::DarkGray)),
        Span::styled(text, Style::default().fg(Color::White).bold()),
    ]);
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: usize,
    feedback: Option<&Feedback>,
) {
    let choices = question.choices();
    let mut lines: Vec<Line> = Vec::with_capacity(choices.len() * 2);

    for (index, choice) in choices.iter().enumerate() {
        let is_selected = index == selected;
        let style = match feedback {
            Some(_) if choice.id == question.correct_answer() => {
                Style::default().fg(Color::Green).bold()
            }
            Some(fb) if fb.submitted == choice.id => Style::default().fg(Color::Red).bold(),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if is_selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", choice.id), style),
            Span::styled(choice.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_typed_answer(frame: &mut Frame, area: Rect, typed: &str, locked: bool) {
    let cursor = if locked { "" } else { "_" };
    let widget = Paragraph::new(format!("{}{}", typed, cursor))
        .fg(Color::Cyan)
        .block(
            Block::default()
                .title(" your answer ")
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, question: &Question, feedback: &Feedback) {
    let (headline, color) = if feedback.is_correct {
        (format!("CORRECT!  +{}", POINTS_PER_CORRECT), Color::Green)
    } else {
        ("NOT QUITE".to_string(), Color::Red)
    };

    let explanation = question.explanation.clone().unwrap_or_else(|| {
        format!("The correct answer is {}.", question.correct_answer())
    });

    let lines = vec![
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(Span::styled(explanation, Style::default().fg(Color::White))),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, has_choices: bool, answered: bool) {
    let hint = match (answered, has_choices) {
        (true, _) => "enter continue  ·  q quit",
        (false, true) => "j/k navigate  ·  enter select  ·  q quit",
        (false, false) => "type your answer  ·  enter submit  ·  esc quit",
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
