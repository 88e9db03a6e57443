use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::models::{Outcome, Session};

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let (glyph, title, color) = match session.outcome() {
        Outcome::Won => ("🏆", "Congratulations!", Color::Yellow),
        Outcome::Lost => ("⚠", "Game Over!", Color::Red),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(glyph, Style::default().fg(color))),
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(vec![
            Span::raw("You won: "),
            Span::styled(
                format!("${}", session.total_prize),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from("r play again  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}
