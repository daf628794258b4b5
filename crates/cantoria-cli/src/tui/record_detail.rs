use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use cantoria_core::Attachment;

use super::App;

/// Render the detail view for the result at the given index.
pub fn render(frame: &mut Frame, app: &App, idx: usize) {
    let area = frame.area();

    let Some(record) = app.results.get(idx) else {
        let msg = Paragraph::new("Record not found").style(Style::default().fg(Color::Red));
        frame.render_widget(msg, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title header
            Constraint::Length(4), // Category / notes / attachments
            Constraint::Min(5),    // Lyric body
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_header(frame, record, chunks[0]);
    render_meta(frame, record, chunks[1]);
    render_text(frame, app, record, chunks[2]);
    render_help(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, record: &cantoria_core::LyricRecord, area: Rect) {
    let header = Paragraph::new(format!("{} \u{2014} {}", record.id, record.display_title()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_meta(frame: &mut Frame, record: &cantoria_core::LyricRecord, area: Rect) {
    let category = if record.category.is_empty() {
        "-"
    } else {
        &record.category
    };
    let notes = if record.notes.is_empty() {
        "-"
    } else {
        &record.notes
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("  Categoria: ", Style::default().fg(Color::Cyan)),
            Span::raw(category),
            Span::styled("    Note: ", Style::default().fg(Color::Cyan)),
            Span::raw(notes),
        ]),
        Line::from(vec![
            Span::styled("  Allegati: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                "foto {}  audio {}  doc {}",
                describe(record.photo.as_ref()),
                describe(record.audio.as_ref()),
                describe(record.doc.as_ref()),
            )),
        ]),
    ];

    let meta = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(meta, area);
}

fn render_text(frame: &mut Frame, app: &App, record: &cantoria_core::LyricRecord, area: Rect) {
    let body = if record.text.is_empty() {
        Text::from(Span::styled(
            "  (nessun testo)",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Text::from(record.text.as_str())
    };

    let text = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Testo"));
    frame.render_widget(text, area);
}

fn describe(attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(a) if !a.media_type.is_empty() => a.media_type.clone(),
        Some(_) => "(senza tipo)".to_string(),
        None => "-".to_string(),
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("  \u{2191}/k \u{2193}/j Scroll  b/Esc Back  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
