//! Add-product form with the per-size quantity grid

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use stockroom_core::COLOR_SUGGESTIONS;

use crate::app::{App, DRAFT_TEXT_FIELDS};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .title(" Add product ")
        .borders(Borders::ALL)
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let labels = [
        "Product id",
        "Name",
        "Color",
        "Price",
        "Brand",
        "Category",
        "Remarks",
    ];
    let values = [
        &app.draft.base_id,
        &app.draft.name,
        &app.draft.color,
        &app.draft.price,
        &app.draft.brand,
        &app.draft.category,
        &app.draft.remarks,
    ];

    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        lines.push(field_line(label, value, app.draft_focus == i, theme));
        if *label == "Color" {
            lines.push(Line::from(Span::styled(
                format!("    e.g. {}", COLOR_SUGGESTIONS.join(", ")),
                theme.hint(),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines), columns[0]);

    let mut size_lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Quantity per size", theme.header())),
        Line::from(""),
    ];
    for (i, (size, quantity)) in app.draft.quantities.iter().enumerate() {
        size_lines.push(field_line(
            &format!("Size {size}"),
            quantity,
            app.draft_focus == DRAFT_TEXT_FIELDS + i,
            theme,
        ));
    }
    size_lines.push(Line::from(""));
    size_lines.push(Line::from(Span::styled(
        "  Sizes left blank or at 0 are not created",
        theme.hint(),
    )));
    frame.render_widget(Paragraph::new(size_lines), columns[1]);
}

fn field_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let marker = if focused { "█" } else { "" };
    let label_style = if focused { theme.header() } else { theme.hint() };
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), label_style),
        Span::raw(format!("{value}{marker}")),
    ])
}
