//! Profile screen view.

use plate_core::profile::{LOADING_TEXT, ProfileState, ProfileView};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Two lines per card row (label, value) plus the borders.
const CARD_HEIGHT: u16 = 5 * 2 + 2;

pub const LOGOUT_BUTTON: &str = "[ Logout ]";

const KEY_HINTS: &str = "l/Enter logout · Esc back · q quit";

/// Renders the profile screen for the given state.
pub fn render_profile(frame: &mut Frame, profile: &ProfileState, area: Rect) {
    match profile.profile() {
        None => render_loading(frame, area),
        Some(profile) => render_loaded(frame, &profile.view(), area),
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line_area = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let para = Paragraph::new(LOADING_TEXT)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(para, line_area);
}

fn render_loaded(frame: &mut Frame, view: &ProfileView<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Header
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Avatar
            Constraint::Length(1),           // Spacer
            Constraint::Length(CARD_HEIGHT), // Card
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Logout button
            Constraint::Min(0),
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled("← ", Style::default().fg(Color::Gray)),
        Span::styled("Profile", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let avatar = Line::from(vec![
        Span::styled("◉ ", Style::default().fg(Color::Cyan)),
        Span::styled(view.avatar, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(avatar).alignment(Alignment::Center),
        chunks[2],
    );

    let mut lines = Vec::with_capacity(10);
    for (label, value) in view.rows() {
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    frame.render_widget(Paragraph::new(lines).block(card), chunks[4]);

    let button = Paragraph::new(LOGOUT_BUTTON)
        .style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(button, chunks[6]);

    let hints = Paragraph::new(KEY_HINTS)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[8]);
}
