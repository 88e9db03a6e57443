mod game_over;
mod loading;
mod question;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::Phase;

pub fn render<S>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let session = app.session();
    match session.phase {
        Phase::Loading => loading::render(frame, area),
        Phase::Playing | Phase::Revealing => question::render(frame, area, app),
        Phase::GameOver => game_over::render(frame, area, session),
    }
}
