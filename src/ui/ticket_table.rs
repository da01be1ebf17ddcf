use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::types::TicketStatus;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tickets ({}) ", app.tickets.len()));

    if app.loading {
        let loading = Paragraph::new("Loading tickets...")
            .block(Block::default().borders(Borders::ALL).title(" Tickets "))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(loading, area);
        return;
    }

    if app.tickets.is_empty() {
        let empty = Paragraph::new("No tickets found")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    // id(5) + nro(8) + category(12) + requester(12) + assignee(12) + status(8)
    // + created(16) + assigned(16) + separators(9)
    let fixed = 98;
    let flex = w.saturating_sub(fixed).max(20);
    let title_w = (flex * 2 / 5).max(10);
    let desc_w = flex.saturating_sub(title_w + 1).max(10);

    let items: Vec<ListItem> = app
        .tickets
        .iter()
        .enumerate()
        .map(|(i, ticket)| {
            let style = if i == app.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let status_color = match ticket.status {
                TicketStatus::Active => Color::Green,
                TicketStatus::Inactive => Color::Red,
            };

            let category = ticket.category.as_deref().unwrap_or("no category");
            let requester = ticket.requester.as_deref().unwrap_or("unknown");
            let assignee = ticket.assignee.as_deref().unwrap_or("unassigned");

            let line = Line::from(vec![
                Span::styled(format!("{:<5}", ticket.id), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(
                    format!("{:<8}", truncate(&ticket.number, 8)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<12}", truncate(category, 12)),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(" "),
                Span::styled(format!("{:<title_w$}", truncate(&ticket.title, title_w)), style),
                Span::raw(" "),
                Span::styled(
                    format!("{:<desc_w$}", truncate(&ticket.description, desc_w)),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<12}", truncate(requester, 12)),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<12}", truncate(assignee, 12)),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<8}", ticket.status),
                    Style::default().fg(status_color),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<16}", fmt_instant(ticket.created_at)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<16}", fmt_instant(ticket.assigned_at)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn fmt_instant(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fmt_instant_renders_placeholder_when_absent() {
        assert_eq!(fmt_instant(None), "-");
        assert_eq!(
            fmt_instant(Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single()),
            "2024-05-01 10:30"
        );
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_is_multibyte_safe() {
        assert_eq!(truncate("Impresora dañada en el piso 3", 12), "Impresora...");
    }
}
