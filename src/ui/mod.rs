mod pagination;
mod search_bar;
mod ticket_table;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputFocus, Mode};

pub fn render(frame: &mut Frame, app: &App) {
    let show_pagination = app.mode == Mode::Listing && !app.loading;

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
    ];
    if show_pagination {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    search_bar::render(frame, app, chunks[1]);
    ticket_table::render(frame, app, chunks[2]);
    if show_pagination {
        pagination::render(frame, app, chunks[3]);
    }
    render_status_bar(frame, app, chunks[chunks.len() - 1]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.mode {
        Mode::Listing => "tix - Tickets".to_string(),
        Mode::Lookup(id) => format!("tix - Ticket {}", id),
    };

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(error) = &app.error {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if app.loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = match app.focus {
            InputFocus::Search => "Enter: search | Esc: cancel",
            InputFocus::Table => {
                "/: search | h/l: page | j/k: move | r: refresh | c: clear search | q: quit"
            }
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}
