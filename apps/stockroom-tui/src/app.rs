//! Application state and main render loop

use std::fs::File;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tokio::runtime::Runtime;
use tracing::warn;

use sheetrow_client::RowClient;
use stockroom_core::{
    adjust_item, expand_draft, project, write_csv, AccessPolicy, AdjustError, AdjustmentKind,
    InventoryCache, InventoryView, ItemRecord, ProductDraft, Role, StockroomConfig, SIZE_RUN,
};

use crate::screen::{InventoryInput, Screen};
use crate::theme::Theme;
use crate::views;

/// Where `e` writes the CSV.
pub const EXPORT_FILE: &str = "inventory-export.csv";

/// Number of free-text fields on the add-product form before the size grid.
pub const DRAFT_TEXT_FIELDS: usize = 7;

/// Login form buffers.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub password_focused: bool,
}

/// Main application state.
///
/// Store calls run to completion on the owned runtime before the event
/// loop sees another key, so exactly one operation is ever in flight and
/// the cache is only touched by that operation.
pub struct App {
    pub screen: Screen,
    pub theme: Theme,
    pub role: Option<Role>,
    pub login: LoginForm,
    pub search_query: String,
    pub input: InventoryInput,
    pub amount_buffer: String,
    pub selected: usize,
    pub draft: ProductDraft,
    pub draft_focus: usize,
    pub status: Option<String>,
    policy: AccessPolicy,
    cache: InventoryCache,
    client: RowClient,
    key_field: String,
    runtime: Runtime,
}

impl App {
    pub fn new(config: StockroomConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = RowClient::new(&config.store.url)?;
        let runtime = Runtime::new()?;

        Ok(Self {
            screen: Screen::Login,
            theme: Theme::dark(),
            role: None,
            login: LoginForm::default(),
            search_query: String::new(),
            input: InventoryInput::Browse,
            amount_buffer: String::new(),
            selected: 0,
            draft: ProductDraft::new(),
            draft_focus: 0,
            status: None,
            policy: config.access_policy(),
            cache: InventoryCache::new(),
            client,
            key_field: config.store.key_field,
            runtime,
        })
    }

    /// The projection the inventory screen is showing right now.
    /// Recomputed on every call; the cache is the only state.
    pub fn current_view(&self) -> InventoryView {
        project(self.cache.items(), &self.search_query)
    }

    pub fn total_draft_fields() -> usize {
        DRAFT_TEXT_FIELDS + SIZE_RUN.len()
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();
        frame.render_widget(Block::default().style(self.theme.base()), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(0),    // Screen content
                Constraint::Length(1), // Status line
            ])
            .split(size);

        self.render_title_bar(frame, chunks[0]);

        match self.screen {
            Screen::Login => views::login::render(frame, chunks[1], self),
            Screen::Inventory => views::inventory::render(frame, chunks[1], self),
            Screen::AddProduct => views::add_product::render(frame, chunks[1], self),
        }

        self.render_status_line(frame, chunks[2]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" stockroom ", self.theme.header()),
            Span::raw(format!("| {} ", self.screen)),
        ];
        if let Some(role) = self.role {
            spans.push(Span::styled(
                format!("| {} ({}) ", self.login.username, role),
                self.theme.hint(),
            ));
        }
        spans.push(Span::styled(
            format!("| {} theme ", self.theme.name),
            self.theme.hint(),
        ));

        let bar = Paragraph::new(Line::from(spans));
        frame.render_widget(bar, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.status {
            Some(message) => (message.clone(), self.theme.warning()),
            None => (self.default_hint().to_string(), self.theme.hint()),
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn default_hint(&self) -> &'static str {
        match self.screen {
            Screen::Login => "Enter sign in | Tab switch field | Esc quit",
            Screen::Inventory => {
                "/ search | j/k move | + receive | - dispatch | a add | r refresh | e export | t theme | q quit"
            }
            Screen::AddProduct => "Tab/Down next field | Enter submit | Esc back",
        }
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        match self.screen {
            Screen::Login => self.handle_login_key(code),
            Screen::Inventory => self.handle_inventory_key(code),
            Screen::AddProduct => {
                self.handle_add_product_key(code);
                false
            }
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.password_focused = !self.login.password_focused;
            }
            KeyCode::Enter => self.try_login(),
            KeyCode::Backspace => {
                self.focused_login_buffer().pop();
            }
            KeyCode::Char(c) => {
                self.focused_login_buffer().push(c);
            }
            _ => {}
        }
        false
    }

    fn focused_login_buffer(&mut self) -> &mut String {
        if self.login.password_focused {
            &mut self.login.password
        } else {
            &mut self.login.username
        }
    }

    fn try_login(&mut self) {
        match self
            .policy
            .authenticate(&self.login.username, &self.login.password)
        {
            Some(role) => {
                self.role = Some(role);
                self.screen = Screen::Inventory;
                self.status = None;
                self.refresh();
            }
            None => {
                self.login.password.clear();
                self.status = Some("Invalid username or password.".to_string());
            }
        }
    }

    fn handle_inventory_key(&mut self, code: KeyCode) -> bool {
        match self.input {
            InventoryInput::Browse => self.handle_browse_key(code),
            InventoryInput::Search => {
                self.handle_search_key(code);
                false
            }
            InventoryInput::Adjust(kind) => {
                self.handle_adjust_key(code, kind);
                false
            }
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => {
                self.input = InventoryInput::Search;
                self.status = None;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.current_view().rows.len();
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('t') => self.theme = self.theme.toggled(),
            KeyCode::Char('a') => {
                if self.role.is_some_and(Role::can_add_products) {
                    self.screen = Screen::AddProduct;
                    self.status = None;
                } else {
                    self.status = Some("Only the owner can add products.".to_string());
                }
            }
            KeyCode::Char('+') => self.open_adjust_prompt(AdjustmentKind::Receive),
            KeyCode::Char('-') => self.open_adjust_prompt(AdjustmentKind::Dispatch),
            KeyCode::Esc => {
                self.search_query.clear();
                self.selected = 0;
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => self.input = InventoryInput::Browse,
            KeyCode::Backspace => {
                self.search_query.pop();
                self.selected = 0;
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.selected = 0;
            }
            _ => {}
        }
    }

    fn handle_adjust_key(&mut self, code: KeyCode, kind: AdjustmentKind) {
        match code {
            KeyCode::Esc => self.input = InventoryInput::Browse,
            KeyCode::Enter => {
                self.input = InventoryInput::Browse;
                // Blank or unparseable input aborts with no store call
                if let Ok(amount) = self.amount_buffer.parse::<u32>() {
                    if amount > 0 {
                        self.apply_adjustment_op(kind, amount);
                    }
                }
            }
            KeyCode::Backspace => {
                self.amount_buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() && self.amount_buffer.len() < 6 => {
                self.amount_buffer.push(c);
            }
            _ => {}
        }
    }

    fn open_adjust_prompt(&mut self, kind: AdjustmentKind) {
        let allowed = match kind {
            AdjustmentKind::Receive => self.role.is_some_and(Role::can_receive_stock),
            AdjustmentKind::Dispatch => self.role.is_some_and(Role::can_dispatch_stock),
        };
        if !allowed {
            self.status = Some("Only the owner can receive stock.".to_string());
            return;
        }
        if self.selected_id().is_none() {
            self.status = Some("No row selected.".to_string());
            return;
        }
        self.amount_buffer.clear();
        self.input = InventoryInput::Adjust(kind);
        self.status = None;
    }

    fn handle_add_product_key(&mut self, code: KeyCode) {
        let field_count = Self::total_draft_fields();
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Inventory;
                self.status = None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.draft_focus = (self.draft_focus + 1) % field_count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.draft_focus = (self.draft_focus + field_count - 1) % field_count;
            }
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Backspace => {
                self.focused_draft_buffer().pop();
            }
            KeyCode::Char(c) => {
                // Size slots take digits only; everything else is free text
                if self.draft_focus >= DRAFT_TEXT_FIELDS && !c.is_ascii_digit() {
                    return;
                }
                self.focused_draft_buffer().push(c);
            }
            _ => {}
        }
    }

    fn focused_draft_buffer(&mut self) -> &mut String {
        match self.draft_focus {
            0 => &mut self.draft.base_id,
            1 => &mut self.draft.name,
            2 => &mut self.draft.color,
            3 => &mut self.draft.price,
            4 => &mut self.draft.brand,
            5 => &mut self.draft.category,
            6 => &mut self.draft.remarks,
            n => &mut self.draft.quantities[n - DRAFT_TEXT_FIELDS].1,
        }
    }

    /// Composite id of the row the cursor is on, under the current view.
    fn selected_id(&self) -> Option<String> {
        let view = self.current_view();
        if view.rows.is_empty() {
            return None;
        }
        let index = self.selected.min(view.rows.len() - 1);
        Some(view.rows[index].composite_id.clone())
    }

    /// Re-list the collection and swap the cache.
    fn refresh(&mut self) {
        match self.runtime.block_on(self.client.list::<ItemRecord>()) {
            Ok(rows) => {
                let count = rows.len();
                self.cache.replace_all(rows);
                self.selected = 0;
                self.status = Some(format!("Loaded {count} rows."));
            }
            Err(err) => {
                warn!(%err, "fetch failed");
                self.status = Some(format!("Fetch failed: {err}"));
            }
        }
    }

    /// Expand the draft and insert the rows one by one, upserting each
    /// stored row as it lands. A failure partway leaves the inserted
    /// prefix in the store; there is no rollback.
    fn submit_draft(&mut self) {
        let records = match expand_draft(&self.draft, Utc::now()) {
            Ok(records) => records,
            Err(err) => {
                self.status = Some(err.to_string());
                return;
            }
        };
        if records.is_empty() {
            self.status = Some("No sizes with stock entered.".to_string());
            return;
        }

        let total = records.len();
        for (done, record) in records.into_iter().enumerate() {
            match self.runtime.block_on(self.client.insert(&record)) {
                Ok(stored) => self.cache.upsert(stored),
                Err(err) => {
                    warn!(%err, "add failed");
                    self.status = Some(format!("Add failed after {done} of {total} rows: {err}"));
                    return;
                }
            }
        }

        self.draft.clear();
        self.draft_focus = 0;
        self.screen = Screen::Inventory;
        self.status = Some(format!("Added {total} size rows."));
    }

    /// Apply one adjustment to the selected row and replace it in the store.
    fn apply_adjustment_op(&mut self, kind: AdjustmentKind, amount: u32) {
        let Some(id) = self.selected_id() else { return };

        let updated = match adjust_item(&self.cache, &id, kind, amount, Utc::now()) {
            Ok(updated) => updated,
            // A row that vanished from the cache aborts silently
            Err(AdjustError::UnknownItem(_)) => return,
            Err(err) => {
                self.status = Some(err.to_string());
                return;
            }
        };

        match self.runtime.block_on(self.client.replace(
            &self.key_field,
            &updated.composite_id,
            &updated,
        )) {
            Ok(stored) => {
                self.cache.upsert(stored);
                self.status = Some(format!("{kind} {amount} × {id}."));
            }
            Err(err) => {
                warn!(%err, "update failed");
                self.status = Some(format!("Update failed: {err}"));
            }
        }
    }

    /// Write the rows currently on screen to [`EXPORT_FILE`].
    fn export(&mut self) {
        let view = self.current_view();
        let result = File::create(EXPORT_FILE)
            .map_err(stockroom_core::ExportError::from)
            .and_then(|file| write_csv(&view.rows, file));

        match result {
            Ok(count) => {
                self.status = Some(format!("Exported {count} rows to {EXPORT_FILE}."));
            }
            Err(err) => {
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }
}
