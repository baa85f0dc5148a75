mod quiz;
mod summary;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;
use crate::randomizer::Section;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Summary => summary::render(frame, area, app),
    }
}

/// Short name of a section for headers and the welcome list.
fn section_label(app: &App, section: Section) -> String {
    match section {
        Section::Listening(index) => {
            let title = app
                .content()
                .listening
                .get(index)
                .map(|p| p.title.as_str())
                .unwrap_or_default();
            format!("Listening {}: {}", index + 1, title)
        }
        Section::Bank => "Grammar & vocabulary (shuffled)".to_string(),
    }
}

fn section_color(section: Section) -> Color {
    match section {
        Section::Listening(_) => Color::Blue,
        Section::Bank => Color::Magenta,
    }
}
