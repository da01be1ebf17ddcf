use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, InputFocus};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == InputFocus::Search;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let input = Paragraph::new(app.search_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search by id "),
    );
    frame.render_widget(input, area);

    if focused {
        let cursor_x = area.x + app.search_input.chars().count() as u16 + 1;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}
