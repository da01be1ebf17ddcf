use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::client::TicketService;
use crate::event::Event;
use crate::types::Ticket;

/// Which query the visible tickets came from. The renderer branches on
/// this; pagination only exists in listing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Listing,
    Lookup(String),
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    Table,
    Search,
}

pub struct App {
    pub tickets: Vec<Ticket>,
    pub loading: bool,
    pub search_input: String,
    /// Zero-based index of the last listing page fetched. Kept as-is
    /// while a lookup result is shown.
    pub page: u32,
    pub total_pages: u32,
    pub mode: Mode,
    pub error: Option<String>,
    pub focus: InputFocus,
    /// Table cursor, presentation only.
    pub selected: usize,
    pub should_quit: bool,
    load_seq: u64,
    service: Arc<dyn TicketService>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(service: Arc<dyn TicketService>, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tickets: Vec::new(),
            loading: true,
            search_input: String::new(),
            page: 0,
            total_pages: 0,
            mode: Mode::Listing,
            error: None,
            focus: InputFocus::default(),
            selected: 0,
            should_quit: false,
            load_seq: 0,
            service,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadPage(0),
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        match self.focus {
            InputFocus::Search => match key.code {
                KeyCode::Esc => Action::ExitSearch,
                KeyCode::Enter => Action::SearchSubmit,
                KeyCode::Backspace => Action::SearchBackspace,
                KeyCode::Char(c) => Action::SearchInput(c),
                _ => Action::None,
            },
            InputFocus::Table => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                KeyCode::Char('/') | KeyCode::Char('s') => Action::EnterSearch,
                KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
                KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
                KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
                KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
                KeyCode::Char('r') => Action::Refresh,
                KeyCode::Char('c') => Action::ClearSearch,
                _ => Action::None,
            },
        }
    }

    pub fn update(&mut self, action: Action) {
        if self.error.is_some() && !matches!(action, Action::Quit) {
            self.error = None;
        }

        match action {
            Action::Quit => self.should_quit = true,

            Action::CursorUp => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            Action::CursorDown => {
                if !self.tickets.is_empty() && self.selected < self.tickets.len() - 1 {
                    self.selected += 1;
                }
            }

            Action::LoadPage(page) => self.load_page(page),
            Action::NextPage => {
                if self.mode == Mode::Listing && self.page + 1 < self.total_pages {
                    self.load_page(self.page + 1);
                }
            }
            Action::PrevPage => {
                if self.mode == Mode::Listing && self.page > 0 {
                    self.load_page(self.page - 1);
                }
            }
            Action::Refresh => match self.mode.clone() {
                Mode::Listing => self.load_page(self.page),
                Mode::Lookup(id) => self.spawn_lookup(id),
            },

            Action::EnterSearch => self.focus = InputFocus::Search,
            Action::ExitSearch => self.focus = InputFocus::Table,
            Action::SearchInput(c) => self.search_input.push(c),
            Action::SearchBackspace => {
                self.search_input.pop();
            }
            Action::SearchSubmit => {
                self.focus = InputFocus::Table;
                self.search();
            }
            Action::ClearSearch => {
                self.search_input.clear();
                self.focus = InputFocus::Table;
                self.search();
            }

            Action::PageLoaded { page, load_id } => {
                if !self.is_current(load_id) {
                    return;
                }
                self.loading = false;
                self.tickets = page.tickets;
                self.page = page.number;
                self.total_pages = page.total_pages;
                self.selected = 0;
            }
            Action::PageFailed { message, load_id } => {
                if !self.is_current(load_id) {
                    return;
                }
                // Listing state stays as it was before the failed fetch.
                self.loading = false;
                self.error = Some(message);
            }
            Action::LookupLoaded { ticket, load_id } => {
                if !self.is_current(load_id) {
                    return;
                }
                self.loading = false;
                self.tickets = vec![*ticket];
                self.selected = 0;
            }
            Action::LookupFailed { message, load_id } => {
                if !self.is_current(load_id) {
                    return;
                }
                self.loading = false;
                self.tickets.clear();
                self.selected = 0;
                self.error = Some(message);
            }

            Action::None => {}
        }
    }

    /// A completion is applied only if it belongs to the most recently
    /// issued request; anything older lost the race and is dropped,
    /// loading flag included (the newer request still owns it).
    fn is_current(&self, load_id: u64) -> bool {
        if load_id == self.load_seq {
            true
        } else {
            tracing::debug!(load_id, current = self.load_seq, "dropping stale fetch result");
            false
        }
    }

    fn next_load_id(&mut self) -> u64 {
        self.load_seq += 1;
        self.load_seq
    }

    fn search(&mut self) {
        if self.search_input.is_empty() {
            // An empty id always goes back to the first listing page.
            self.load_page(0);
            return;
        }
        let id = self.search_input.clone();
        self.mode = Mode::Lookup(id.clone());
        self.spawn_lookup(id);
    }

    fn load_page(&mut self, page: u32) {
        self.mode = Mode::Listing;
        self.loading = true;
        let load_id = self.next_load_id();
        let tx = self.action_tx.clone();
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            match service.fetch_page(page).await {
                Ok(result) => {
                    tx.send(Action::PageLoaded {
                        page: result,
                        load_id,
                    })
                    .ok();
                }
                Err(e) => {
                    tracing::warn!(page, error = %e, "page fetch failed");
                    tx.send(Action::PageFailed {
                        message: e.to_string(),
                        load_id,
                    })
                    .ok();
                }
            }
        });
    }

    fn spawn_lookup(&mut self, id: String) {
        self.loading = true;
        let load_id = self.next_load_id();
        let tx = self.action_tx.clone();
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            match service.fetch_ticket(&id).await {
                Ok(ticket) => {
                    tx.send(Action::LookupLoaded {
                        ticket: Box::new(ticket),
                        load_id,
                    })
                    .ok();
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "ticket lookup failed");
                    tx.send(Action::LookupFailed {
                        message: e.to_string(),
                        load_id,
                    })
                    .ok();
                }
            }
        });
    }
}
