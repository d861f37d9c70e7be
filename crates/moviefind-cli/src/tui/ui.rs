//! TUI rendering logic for the browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::state::BrowserState;

/// Text shown while a lookup is in flight.
const LOADING_TEXT: &str = "Loading...";

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(5),    // results
            Constraint::Length(6), // detail
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_search_box(frame, chunks[0], state);
    draw_results(frame, chunks[1], state);
    draw_detail(frame, chunks[2], state);
    draw_footer(frame, chunks[3]);
}

/// Draws the search input.
fn draw_search_box(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let title = if state.input.is_empty() {
        " Search (default listing) "
    } else {
        " Search "
    };
    let input = Paragraph::new(format!("{}_", state.input))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

/// Draws exactly one of the loading line, the message, or the result table.
fn draw_results(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let block = Block::default().borders(Borders::ALL).title(" Movies ");

    if state.view.is_loading {
        let loading = Paragraph::new(LOADING_TEXT)
            .style(Style::default().fg(Color::Cyan))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if !state.view.error_message.is_empty() {
        let message = Paragraph::new(state.view.error_message.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let header = Row::new(vec!["Title", "Description"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .view
        .movies
        .iter()
        .map(|m| {
            let style = if m.description.is_some() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                m.title.clone(),
                m.description_or_placeholder().to_owned(),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Percentage(35), Constraint::Percentage(65)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title_bottom(format!(" {} results ", state.view.movies.len())))
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws the full description and image URL of the selected record.
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let lines = state.current_movie().map_or_else(Vec::new, |m| {
        vec![
            Line::from(format!("Image: {}", m.image_url_or_placeholder())),
            Line::from(m.description_or_placeholder().to_owned()),
        ]
    });
    let title = state
        .current_movie()
        .map_or_else(|| String::from(" Detail "), |m| format!(" {} ", m.title));

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(detail, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(
        "Type to search  Backspace: delete  Esc: clear  \u{2191}\u{2193}: move  Ctrl-C: quit",
    );
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
