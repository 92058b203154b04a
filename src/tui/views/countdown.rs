use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;

pub fn draw_countdown(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Spacer
            Constraint::Length(12), // Timer display
            Constraint::Min(0),     // Rest
        ])
        .split(area);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);

    draw_timer_panel(frame, app, inner[1]);
}

fn draw_timer_panel(frame: &mut Frame, app: &App, area: Rect) {
    let expired = !app.countdown.is_running() && app.countdown.remaining_secs() == 0;

    let (state_text, state_color) = if app.countdown.is_running() {
        ("Work period in progress", Color::Green)
    } else if expired {
        ("Time is up", Color::Red)
    } else {
        ("Waiting - switch away from this terminal to begin", Color::DarkGray)
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", state_text),
            Style::default().fg(state_color),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", app.countdown.display()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(msg) = &app.message {
        content.push(Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(Color::Green),
        )));
        content.push(Line::from(""));
    }

    if app.show_reset {
        content.push(Line::from(Span::styled(
            "  Press [r] to reset for the next round",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let border_color = if app.countdown.is_running() {
        Color::Green
    } else if expired {
        Color::Red
    } else {
        Color::White
    };

    let timer_block = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Pomodoro ")
            .style(Style::default().fg(border_color)),
    );

    frame.render_widget(timer_block, area);
}
