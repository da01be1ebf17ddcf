use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let prev_enabled = app.page > 0;
    let next_enabled = app.page + 1 < app.total_pages;

    let control = |label: &str, enabled: bool| {
        if enabled {
            Span::styled(
                label.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        control("◀ prev (h)", prev_enabled),
        Span::raw("  "),
        Span::styled(
            format!("Page {} of {}", app.page + 1, app.total_pages),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        control("next (l) ▶", next_enabled),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
