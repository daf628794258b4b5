use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use cantoria_core::{Database, LyricRecord};
use cantoria_etl::Config;
use cantoria_search::Session;

use crate::commands;

pub mod record_detail;
pub mod results_list;

/// Which view the TUI is currently displaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Results,
    /// Detail view for the result at the given index.
    Detail(usize),
}

/// Application state for the browse TUI.
#[derive(Debug)]
pub struct App {
    session: Session,
    pub view: View,
    pub query: String,
    pub results: Vec<LyricRecord>,
    pub selected: usize,
    pub list_offset: usize, // First visible result in the list
    pub detail_scroll: u16,
    pub should_quit: bool,
}

impl App {
    fn new(session: Session, results: Vec<LyricRecord>) -> Self {
        Self {
            session,
            view: View::Results,
            query: String::new(),
            results,
            selected: 0,
            list_offset: 0,
            detail_scroll: 0,
            should_quit: false,
        }
    }

    /// Re-run the search for the current query and reset the selection.
    fn refresh(&mut self) {
        self.results = self.session.search(&self.query);
        self.selected = 0;
        self.list_offset = 0;
    }

    /// Clear the query and show the whole catalog again.
    fn reset_query(&mut self) {
        self.query.clear();
        self.refresh();
    }

    fn handle_key(&mut self, key: KeyCode) {
        match &self.view {
            View::Results => self.handle_results_key(key),
            View::Detail(_) => self.handle_detail_key(key),
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        // Assume reasonable viewport height (refined in render)
        const VIEWPORT_HEIGHT: usize = 20;

        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                    // Scroll down if selection goes below visible area
                    if self.selected >= self.list_offset + VIEWPORT_HEIGHT {
                        self.list_offset = self.selected - VIEWPORT_HEIGHT + 1;
                    }
                }
            }
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    // Scroll up if selection goes above visible area
                    if self.selected < self.list_offset {
                        self.list_offset = self.selected;
                    }
                }
            }
            KeyCode::Enter => {
                // The sentinel row has no detail view
                if let Some(record) = self.results.get(self.selected) {
                    if !record.is_sentinel() {
                        self.detail_scroll = 0;
                        self.view = View::Detail(self.selected);
                    }
                }
            }
            // Every keystroke in the search box re-runs the search
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refresh();
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refresh();
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                self.view = View::Results;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }
}

/// Run the browse TUI.
///
/// Initializes the session (seeding an empty database), sets up the
/// terminal, runs the main event loop, and restores the terminal on exit
/// (including on error).
pub async fn run_tui(config: &Config, asset: Option<String>) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    let session = Session::new(db, commands::seeder_for(config, asset)?);

    let results = session.initialize().await;
    let app = App::new(session, results);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| match &app.view {
            View::Results => results_list::render(frame, &app),
            View::Detail(idx) => record_detail::render(frame, &app, *idx),
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('c') => app.should_quit = true,
                        KeyCode::Char('u') => app.reset_query(),
                        _ => {}
                    }
                } else {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
