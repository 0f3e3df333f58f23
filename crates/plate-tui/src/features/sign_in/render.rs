//! Sign-in screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

pub const SIGNED_OUT_NOTICE: &str = "You are signed out.";

/// Renders the signed-out notice, vertically centered.
pub fn render_sign_in(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            SIGNED_OUT_NOTICE,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::styled(
            "Run `plate login --email <email>` to sign in again.",
            Style::default().fg(Color::Gray),
        ),
        Line::default(),
        Line::styled("q quit", Style::default().fg(Color::DarkGray)),
    ];

    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, Rect::new(area.x, top, area.width, height));
}
