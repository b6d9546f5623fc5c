//! Conversation view rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::connectivity::ConnectivityState;
use crate::format::{Segment, format_links};
use crate::store::{Message, MessageKind, Sender};
use crate::tui::app::App;
use crate::tui::ui::helpers::{classification_label, format_timestamp};

/// Renders the screen

pub fn render_chat(f: &mut Frame, app: &App) {
    let size = f.size();

    // Create layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title + connectivity indicator
            Constraint::Min(5),    // Message history
            Constraint::Length(3), // Input box
            Constraint::Length(3), // Help
        ])
        .split(size);

    render_title(f, app, chunks[0]);
    render_history(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
    render_help(f, app, chunks[3]);
}

fn render_title(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let (status_symbol, status_color) = match app.connectivity.state() {
        ConnectivityState::Checking => ("⏳ ", Color::Yellow),
        ConnectivityState::Online => ("● ", Color::Green),
        ConnectivityState::Offline => ("✗ ", Color::Red),
    };

    let status_label = app.connectivity.state().label().to_string();
    let title_line = Line::from(vec![
        Span::styled(
            "Chatterm",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(status_symbol, Style::default().fg(status_color)),
        Span::styled(
            status_label,
            Style::default().fg(status_color),
        ),
    ]);

    let title = Paragraph::new(title_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_history(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if app.store.is_empty() && !app.is_pending() {
        let empty_msg = Paragraph::new("No messages yet. Type below and press Enter to send.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Messages"));
        f.render_widget(empty_msg, area);
        return;
    }

    let mut lines: Vec<Line> = app.store.all().iter().map(message_line).collect();
    if app.is_pending() {
        lines.push(Line::from(Span::styled(
            "Assistant is typing...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Window pinned to the bottom, shifted up by the scroll offset
    let total = lines.len();
    let visible_height = area.height.saturating_sub(2) as usize;
    let end = total.saturating_sub(app.scroll_offset.min(total));
    let start = end.saturating_sub(visible_height);

    let window: Vec<Line> = lines[start..end].to_vec();
    let messages_widget = Paragraph::new(window).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Messages ({}/{})", end, total)),
    );
    f.render_widget(messages_widget, area);
}

/// One rendered row per message: timestamp, sender label, content
fn message_line(msg: &Message) -> Line<'static> {
    let timestamp = format_timestamp(msg.timestamp);

    let mut spans = vec![Span::styled(
        format!("[{}] ", timestamp),
        Style::default().fg(Color::DarkGray),
    )];

    if msg.kind == MessageKind::Error {
        spans.push(Span::styled(
            "✗ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            msg.text.clone(),
            Style::default().fg(Color::Red),
        ));
        return Line::from(spans);
    }

    let (sender_label, sender_color) = match msg.sender {
        Sender::User => ("You", Color::Green),
        Sender::Assistant => ("Assistant", Color::Blue),
    };
    spans.push(Span::styled(
        format!("{}: ", sender_label),
        Style::default()
            .fg(sender_color)
            .add_modifier(Modifier::BOLD),
    ));

    // Only non-error assistant text goes through link detection; user text
    // is always literal.
    match msg.sender {
        Sender::Assistant => {
            for segment in format_links(&msg.text) {
                match segment {
                    Segment::Plain(text) => {
                        spans.push(Span::styled(text, Style::default().fg(Color::White)));
                    }
                    Segment::Link(url) => {
                        spans.push(Span::styled(
                            url,
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::UNDERLINED),
                        ));
                    }
                }
            }
        }
        Sender::User => {
            spans.push(Span::styled(
                msg.text.clone(),
                Style::default().fg(Color::White),
            ));
        }
    }

    if let Some(metadata) = &msg.metadata {
        if let Some(count) = metadata.products_found {
            spans.push(Span::styled(
                format!("  · {} products found", count),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(classification) = &metadata.classification {
            spans.push(Span::styled(
                format!("  · {}", classification_label(classification)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    Line::from(spans)
}

fn render_input(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let (title, style) = if app.is_pending() {
        (
            "Waiting for reply...",
            Style::default().fg(Color::DarkGray),
        )
    } else if app.connectivity.is_offline() {
        (
            "Backend offline - press r to recheck",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        ("Type your message", Style::default().fg(Color::Yellow))
    };

    let input_widget = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input_widget, area);
}

fn render_help(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let help_text = if app.connectivity.is_offline() {
        "r: Recheck connection | ↑/↓: Scroll | Esc: Quit"
    } else {
        "Enter: Send | Ctrl+V: Paste | ↑/↓: Scroll | Esc: Quit"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
