use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::App;

/// Render the search view: title, input box, result table, help bar.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search input
            Constraint::Min(5),    // Result table
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_help(frame, chunks[3]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let shown = if app.results.iter().any(|r| r.is_sentinel()) {
        0
    } else {
        app.results.len()
    };
    let title = Paragraph::new(format!("Canti & Lyrics    {} canti", shown))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(format!("{}\u{258f}", app.query))
        .block(Block::default().borders(Borders::ALL).title("Ricerca"));
    frame.render_widget(input, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Titolo").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Categoria"),
    ])
    .height(1);

    // Calculate visible range based on viewport
    // area.height - 2 for borders - 1 for header
    let viewport_height = (area.height.saturating_sub(3)) as usize;
    let visible_start = app.list_offset;
    let visible_end = (visible_start + viewport_height).min(app.results.len());

    // Only render visible results
    let rows: Vec<Row> = app
        .results
        .iter()
        .enumerate()
        .skip(visible_start)
        .take(viewport_height)
        .map(|(i, record)| {
            let style = if record.is_sentinel() {
                Style::default().fg(Color::Yellow)
            } else if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let id = if record.is_sentinel() {
                "-".to_string()
            } else {
                format!("{}", record.id)
            };
            Row::new(vec![
                Cell::from(id),
                Cell::from(record.display_title().to_string()),
                Cell::from(record.category.clone()),
            ])
            .style(style)
        })
        .collect();

    let title = if app.results.len() > viewport_height {
        format!(
            "Risultati [{}-{} of {}]",
            visible_start + 1,
            visible_end,
            app.results.len()
        )
    } else {
        "Risultati".to_string()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(30),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help =
        Paragraph::new("  Type to search  \u{2191}/\u{2193} Select  Enter Open  ^U Clear  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
