use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.question);
    render_options(frame, chunks[2], app, question);
    render_question_prize(frame, chunks[3], question.prize);
    render_controls(frame, chunks[4], app.session().is_revealing());
}

fn render_status<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let prize = Paragraph::new(format!("${}", app.session().total_prize))
        .fg(Color::Green)
        .bold();
    frame.render_widget(prize, halves[0]);

    let progress = Paragraph::new(format!(
        "Question {}/{}",
        app.question_number(),
        app.total_questions()
    ))
    .alignment(Alignment::Right)
    .fg(Color::Cyan);
    frame.render_widget(progress, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn option_style<S>(app: &App<S>, question: &Question, index: usize) -> Style {
    let session = app.session();
    if session.is_revealing() {
        if question.is_correct(index) {
            Style::default().fg(Color::Black).bg(Color::Green).bold()
        } else if session.selected_answer == Some(index) {
            Style::default().fg(Color::White).bg(Color::Red).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    } else if index == app.cursor() {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_options<S>(frame: &mut Frame, area: Rect, app: &App<S>, question: &Question) {
    let revealing = app.session().is_revealing();
    let mut lines: Vec<Line> = Vec::with_capacity(question.answers.len() * 2);

    for (index, answer) in question.answers.iter().enumerate() {
        let style = option_style(app, question, index);
        let marker = if !revealing && index == app.cursor() { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(answer.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_question_prize(frame: &mut Frame, area: Rect, prize: u32) {
    let widget = Paragraph::new(format!("Prize for this question: ${}", prize))
        .alignment(Alignment::Center)
        .fg(Color::Gray);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, revealing: bool) {
    let text = if revealing {
        "revealing..."
    } else {
        "a-d pick  ·  j/k navigate  ·  enter select  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
