//! TUI rendering logic for the browser.

use cinehub_browse::detail::TitleDetail;
use cinehub_browse::person::PersonProfile;
use cinehub_browse::watch::WatchSession;
use cinehub_browse::{Category, EMPTY_RESULTS_MESSAGE, PageEntry};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Tabs, Wrap};

use super::state::{BrowserState, DetailPane, InputMode};

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs + search
            Constraint::Min(5),    // results + detail
            Constraint::Length(3), // pagination
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_results(frame, pane_chunks[0], state);
    draw_detail(frame, pane_chunks[1], state);
    draw_pagination(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);
}

/// Draws category tabs and the search box.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let current = state.machine.state().category;
    let titles: Vec<String> = Category::BROWSABLE
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {}", i.saturating_add(1), c.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(Category::BROWSABLE.iter().position(|c| *c == current))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" CineHub "));
    frame.render_widget(tabs, header_chunks[0]);

    let (search_text, search_style) = if state.input_mode == InputMode::Search {
        (
            format!("{}_", state.search_input),
            Style::default().fg(Color::Yellow),
        )
    } else if current == Category::Search {
        (state.machine.state().search_term.clone(), Style::default())
    } else {
        (String::new(), Style::default())
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[1]);
}

/// Draws the result table (left pane).
fn draw_results(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let listing = state.machine.state();
    let title = format!(" {} ", listing.category.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if state.machine.is_loading() && listing.results.is_empty() {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if listing.is_empty() {
        let empty = Paragraph::new(EMPTY_RESULTS_MESSAGE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Title", "Type", "Year", "Rating"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = listing
        .results
        .iter()
        .map(|item| {
            Row::new(vec![
                item.display_title.clone(),
                item.media_type.to_string(),
                item.release_year()
                    .map_or_else(|| String::from("--"), |y| y.to_string()),
                format!("{:.1}", item.vote_average),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws the detail pane (right pane).
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let (title, lines) = match &state.detail {
        DetailPane::Preview => (String::from(" Overview "), preview_lines(state)),
        DetailPane::Loading(route) => (
            format!(" {route} "),
            vec![Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            ))],
        ),
        DetailPane::Title(detail) => (
            format!(" {} ", detail.title),
            title_lines(detail, state.cast_cursor),
        ),
        DetailPane::Person(person) => (format!(" {} ", person.name), person_lines(person)),
        DetailPane::Watch(session) => (String::from(" Watch "), watch_lines(session)),
        DetailPane::Error(message) => (
            String::from(" Error "),
            vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))],
        ),
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(detail, area);
}

fn label(name: &str) -> Span<'static> {
    Span::styled(
        format!("{name}: "),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn field(name: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![label(name), Span::raw(value.into())])
}

fn preview_lines(state: &BrowserState) -> Vec<Line<'static>> {
    let Some(item) = state.selected_item() else {
        return Vec::new();
    };
    let mut lines = vec![
        Line::from(Span::styled(
            item.display_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        field("Released", item.release_date.clone().unwrap_or_default()),
        field("Rating", format!("{:.1}", item.vote_average)),
    ];
    if let Some(poster) = &item.poster_url {
        lines.push(field("Poster", poster.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(item.overview.clone().unwrap_or_default()));
    lines
}

fn title_lines(detail: &TitleDetail, cast_cursor: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(tagline) = &detail.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(original) = &detail.original_title {
        lines.push(field("Original", original.clone()));
    }
    if let Some(date) = &detail.release_date {
        lines.push(field("Released", date.clone()));
    }
    if let Some(runtime) = detail.runtime_minutes {
        lines.push(field("Runtime", format!("{runtime} min")));
    }
    if let Some(seasons) = detail.season_count {
        lines.push(field("Seasons", seasons.to_string()));
    }
    if !detail.genres.is_empty() {
        lines.push(field("Genres", detail.genres.join(", ")));
    }
    lines.push(field("Rating", format!("{:.1}", detail.vote_average)));
    if !detail.directors.is_empty() {
        lines.push(field("Directed by", detail.directors.join(", ")));
    }
    if !detail.providers.is_empty() {
        let p = &detail.providers;
        lines.push(field(&format!("Stream ({})", p.region), p.flatrate.join(", ")));
        lines.push(field("Rent", p.rent.join(", ")));
        lines.push(field("Buy", p.buy.join(", ")));
    }
    if let Some(trailer) = &detail.trailer {
        lines.push(field("Trailer", trailer.url.clone()));
    }
    if let Some(overview) = &detail.overview {
        lines.push(Line::from(""));
        lines.push(Line::from(overview.clone()));
    }
    if !detail.cast.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(label("Cast (c: next, i: open)")));
        for (i, member) in detail.cast.iter().enumerate() {
            let text = member.character.as_ref().map_or_else(
                || member.name.clone(),
                |character| format!("{} as {character}", member.name),
            );
            let style = if i == cast_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {text}"), style)));
        }
    }
    lines
}

fn person_lines(person: &PersonProfile) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(department) = &person.known_for_department {
        lines.push(field("Known for", department.clone()));
    }
    if let Some(birthday) = &person.birthday {
        lines.push(field("Born", birthday.clone()));
    }
    if let Some(place) = &person.place_of_birth {
        lines.push(field("Birthplace", place.clone()));
    }
    if let Some(biography) = &person.biography {
        lines.push(Line::from(""));
        lines.push(Line::from(biography.clone()));
    }
    if !person.filmography.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(label("Known for")));
        for entry in &person.filmography {
            let year = entry
                .year
                .map_or_else(|| String::from("----"), |y| y.to_string());
            lines.push(Line::from(format!("  {year}  {} ({})", entry.title, entry.media)));
        }
    }
    lines
}

fn watch_lines(session: &WatchSession) -> Vec<Line<'static>> {
    let mut lines = vec![field(
        "Title",
        session
            .title()
            .map_or_else(|| format!("{} {}", session.media(), session.id()), String::from),
    )];
    let Some(season) = session.selected_season() else {
        lines.push(Line::from("o: open player"));
        return lines;
    };
    lines.push(field(
        "Season",
        format!("{} / {} ([ ])", season.name, session.seasons().len()),
    ));
    lines.push(Line::from(label("Episodes (, .)")));
    for episode in &season.episodes {
        let style = if episode.number == session.episode() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {:>3}. {}", episode.number, episode.name),
            style,
        )));
    }
    lines
}

/// Draws the page selector.
fn draw_pagination(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let listing = state.machine.state();
    let mut spans = vec![Span::raw("< ")];
    for entry in listing.pagination() {
        match entry {
            PageEntry::Page(page) if page == listing.current_page => spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            PageEntry::Page(page) => spans.push(Span::raw(page.to_string())),
            PageEntry::Ellipsis => spans.push(Span::raw("…")),
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(">"));

    let pagination = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Pages "));
    frame.render_widget(pagination, area);
}

/// Draws the footer with the current route and key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help = match state.input_mode {
        InputMode::Normal => {
            "Tab/1-4: category  /: search  n/p: page  Enter: details  t: trailer  w: watch  o: open  Esc: back  q: quit"
        }
        InputMode::Search => "Type to search  Enter: submit  Esc: cancel",
    };
    let busy = if state.machine.is_loading() || state.is_detail_loading() {
        "  ⟳"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            format!("{}{busy}  ", state.machine.route()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]);

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
