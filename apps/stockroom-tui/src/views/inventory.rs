//! Inventory table with search, totals, and the adjustment prompt

use chrono::DateTime;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use stockroom_core::{AdjustmentKind, ItemRecord};

use crate::app::App;
use crate::screen::InventoryInput;
use crate::views::centered_rect;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let view = app.current_view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search line
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Totals
        ])
        .split(area);

    let search_marker = if app.input == InventoryInput::Search {
        "█"
    } else {
        ""
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled(" Search (id or name): ", theme.hint()),
        Span::raw(format!("{}{}", app.search_query, search_marker)),
    ]));
    frame.render_widget(search, chunks[0]);

    let selected = app.selected.min(view.rows.len().saturating_sub(1));
    let header = Row::new([
        "ID", "Product", "Size", "Color", "Qty", "Price", "Brand", "Category", "Updated",
    ])
    .style(theme.header());

    let rows = view.rows.iter().enumerate().map(|(i, record)| {
        let style = if i == selected {
            theme.highlight()
        } else {
            Style::default()
        };
        Row::new([
            record.composite_id.clone(),
            record.product_name.clone(),
            record.size.clone(),
            record.color.clone(),
            record.quantity.to_string(),
            record.price.clone().unwrap_or_default(),
            record.brand.clone().unwrap_or_default(),
            record.category.clone().unwrap_or_default(),
            format_updated(record),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(22),
        Constraint::Min(14),
        Constraint::Length(4),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(16),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Product Inventory ")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, chunks[1]);

    let totals = Paragraph::new(format!(
        " {} rows | total quantity {}",
        view.rows.len(),
        view.total_quantity
    ))
    .style(theme.hint());
    frame.render_widget(totals, chunks[2]);

    if let InventoryInput::Adjust(kind) = app.input {
        render_adjust_prompt(frame, area, app, kind);
    }
}

fn format_updated(record: &ItemRecord) -> String {
    // Epoch means the sheet had no readable timestamp for the row
    if record.last_updated == DateTime::UNIX_EPOCH {
        "-".to_string()
    } else {
        record.last_updated.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn render_adjust_prompt(frame: &mut Frame, area: Rect, app: &App, kind: AdjustmentKind) {
    let theme = &app.theme;
    let (title, verb) = match kind {
        AdjustmentKind::Receive => (" Receive stock ", "receive"),
        AdjustmentKind::Dispatch => (" Dispatch stock ", "dispatch"),
    };

    let lines = vec![
        Line::from(""),
        Line::from(format!("  Quantity to {}: {}█", verb, app.amount_buffer)),
        Line::from(""),
        Line::from(Span::styled("  Enter apply | Esc cancel", theme.hint())),
    ];

    let prompt_area = centered_rect(40, 25, area);
    frame.render_widget(Clear, prompt_area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(theme.base()),
        ),
        prompt_area,
    );
}
