use ratatui::{prelude::*, widgets::Paragraph};

pub fn render(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new("Loading questions...")
        .alignment(Alignment::Center)
        .fg(Color::Yellow);
    frame.render_widget(widget, chunks[1]);
}
