//! Login screen

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::views::centered_rect;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let box_area = centered_rect(50, 35, area);

    let username_marker = if app.login.password_focused { "" } else { "█" };
    let password_marker = if app.login.password_focused { "█" } else { "" };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Username: ", theme.hint()),
            Span::raw(format!("{}{}", app.login.username, username_marker)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Password: ", theme.hint()),
            Span::raw(format!(
                "{}{}",
                "•".repeat(app.login.password.chars().count()),
                password_marker
            )),
        ]),
    ];

    let block = Block::default()
        .title(" Sign in ")
        .borders(Borders::ALL)
        .style(theme.base());

    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}
