use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::randomizer::SectionSpan;

use super::{section_color, section_label};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let spans = app.deck().spans();
    let height = 9 + spans.len() as u16;

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = app.content();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            content.title.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(content.subtitle.as_str().fg(Color::DarkGray)),
        Line::from(""),
    ];

    lines.extend(spans.iter().map(|span| section_line(app, span)));

    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn section_line<'a>(app: &App, span: &SectionSpan) -> Line<'a> {
    let range = if span.first == span.last {
        format!("Question {}", span.first)
    } else {
        format!("Questions {}-{}", span.first, span.last)
    };

    Line::from(vec![
        Span::styled(range, Style::default().fg(section_color(span.section)).bold()),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(section_label(app, span.section), Style::default().fg(Color::Gray)),
    ])
}
