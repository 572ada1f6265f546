//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use ditto_core::cart::format_price;
use ditto_core::feature::visible_rows;
use ditto_core::labels::ModalStep;
use ditto_core::services::{BadgeVariant, CardPrice};
use ditto_core::stores::DeliveryStatus;

use super::app::{App, Item, View};

/// Render the current view.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    match app.current_view {
        View::Services => render_services(f, app, chunks[0]),
        View::Stores => render_stores(f, app, chunks[0]),
        View::Help => render_help(f, chunks[0]),
    }

    if app.modal_open() {
        let area = f.area();
        render_label_modal(f, app, area);
    }

    render_status_bar(f, app, chunks[1]);
}

fn render_services(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(36)])
        .split(area);

    let state = &app.state;
    let cards = state.cards();
    let header_cells = ["", "Service", "Note", "Price"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = app.items().into_iter().enumerate().map(|(i, item)| {
        let (mark, title, note, price): (&str, String, Span, String) = match item {
            Item::AddOn(add_on) => (
                checkbox(state.selection().is_selected(add_on)),
                add_on.row_title().to_string(),
                Span::raw(""),
                format_price(add_on.price()),
            ),
            Item::Service(feature) => {
                let card = cards.iter().find(|c| c.feature == feature);
                let mark = match card {
                    Some(c) if c.disabled => "[-]",
                    Some(c) => checkbox(c.checked),
                    None => "   ",
                };
                let note = card
                    .and_then(|c| {
                        c.badge
                            .map(|b| {
                                let color = match b.variant {
                                    BadgeVariant::Green => Color::Green,
                                    BadgeVariant::Grey => Color::DarkGray,
                                };
                                Span::styled(b.text, Style::default().fg(color))
                            })
                            .or(c.disabled_message.map(|m| {
                                Span::styled(m, Style::default().fg(Color::Cyan))
                            }))
                    })
                    .unwrap_or_else(|| Span::raw(""));
                let price = match card.map(|c| c.price) {
                    Some(CardPrice::Free) => "Free".to_string(),
                    Some(CardPrice::Price(amount)) => format_price(amount),
                    _ => String::new(),
                };
                (mark, feature.title().to_string(), note, price)
            }
            Item::Provider(provider) => (
                checkbox(state.provider_enabled(provider)),
                format!("  {}", provider.name()),
                Span::styled("fingerprint provider", Style::default().fg(Color::DarkGray)),
                String::new(),
            ),
            Item::Label => (
                " ▾ ",
                format!(
                    "  Label: {}",
                    state
                        .labels()
                        .active()
                        .map(|l| l.name.as_str())
                        .unwrap_or("(none)")
                ),
                Span::styled("Enter: add/upgrade  h/l: pick", Style::default().fg(Color::DarkGray)),
                String::new(),
            ),
            Item::PrimaryGenre => (
                " ▾ ",
                format!("  Primary genre: {}", state.primary_genre()),
                Span::raw(""),
                String::new(),
            ),
            Item::SecondaryGenre => (
                " ▾ ",
                format!("  Secondary genre: {}", state.secondary_genre()),
                Span::raw(""),
                String::new(),
            ),
        };

        let style = if i == app.selected {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(mark),
            Cell::from(title),
            Cell::from(note),
            Cell::from(price),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Percentage(40),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(format!(
        " Services ({} plan) ",
        state.plan().display_name()
    )));
    f.render_widget(table, chunks[0]);

    render_cart(f, app, chunks[1]);
}

fn render_cart(f: &mut Frame, app: &App, area: Rect) {
    let cart = app.state.cart();
    let mut lines: Vec<Line> = Vec::new();
    if cart.is_empty() {
        lines.push(Line::from(Span::styled(
            "No services selected",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for item in &cart.items {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<26}", item.name)),
            Span::raw(format!("{:>6}", format_price(item.price))),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<26}", "Total"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:>6}", cart.formatted_total()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    let checkout = if cart.checkout_enabled() {
        Span::styled("Checkout available", Style::default().fg(Color::Green))
    } else {
        Span::styled("Checkout disabled", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(checkout));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Cart ({}) ", cart.item_count())),
    );
    f.render_widget(panel, area);
}

fn render_stores(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary = app.catalog.summary();
    let header_cells = ["Store", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = app.catalog.delivered().iter().enumerate().map(|(i, store)| {
        let style = if i == app.selected_store {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(store.name.clone()),
            Cell::from(delivery_colored(store.status)),
        ])
        .style(style)
    });

    let table = Table::new(rows, [Constraint::Percentage(70), Constraint::Length(10)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Stores ({} sent, {} rejected) ",
            summary.sent, summary.rejected
        )));
    f.render_widget(table, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary.available as u16 + 2),
            Constraint::Min(5),
        ])
        .split(chunks[1]);

    let available: Vec<Line> = app
        .catalog
        .available()
        .iter()
        .map(|s| Line::from(format!("  {}", s.name)))
        .collect();
    let available = Paragraph::new(available).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Available stores ({}) ", summary.available)),
    );
    f.render_widget(available, right[0]);

    render_distribution_options(f, app, right[1]);
}

fn render_distribution_options(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (feature, state) in visible_rows(app.state.plan()) {
        let (toggle, color) = match (state.disabled, state.enabled) {
            (true, _) => ("locked", Color::DarkGray),
            (false, true) => ("on", Color::Green),
            (false, false) => ("off", Color::Red),
        };
        lines.push(Line::from(vec![
            Span::styled(
                feature.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("[{toggle}]"), Style::default().fg(color)),
        ]));
        if !state.badge.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", state.badge),
                Style::default().fg(Color::Cyan),
            )));
        }
        if let Some(helper) = state.helper {
            lines.push(Line::from(format!("  {helper}")));
        }
        if state.disabled {
            lines.push(Line::from(Span::styled(
                "  Upgrade to change this setting",
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Distribution options "),
    );
    f.render_widget(panel, area);
}

fn render_label_modal(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered(area, 56, 14);
    f.render_widget(Clear, popup);

    let (title, lines) = match app.modal_step() {
        Some(ModalStep::Select) => {
            let mut lines = vec![Line::from("Choose a label for Beatport:"), Line::from("")];
            let labels = app.state.labels().labels();
            for (i, label) in labels.iter().enumerate() {
                let tag = if label.is_beatport_label {
                    Span::styled(" beatport", Style::default().fg(Color::Green))
                } else {
                    Span::styled(" needs setup", Style::default().fg(Color::DarkGray))
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}", label.name), cursor_style(i == app.modal_cursor)),
                    tag,
                ]));
            }
            lines.push(Line::from(Span::styled(
                "  + Create a Beatport Label",
                cursor_style(app.modal_cursor == labels.len()).fg(Color::Cyan),
            )));
            (" Beatport label ", lines)
        }
        Some(ModalStep::Add) => (
            " Create a Beatport label ",
            vec![
                Line::from("Label name:"),
                Line::from(Span::styled(
                    format!("> {}_", app.input),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter: create  Left: back  Esc: close",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        Some(ModalStep::Upgrade) => {
            let name = app
                .state
                .modal()
                .and_then(|m| m.label_to_upgrade())
                .unwrap_or("");
            (
                " Set up label on Beatport ",
                vec![
                    Line::from(format!("{name} is not set up on Beatport yet.")),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Enter: set up  Left: back  Esc: close",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
            )
        }
        None => return,
    };

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(modal, popup);
}

fn render_help(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let text = vec![
        Line::from(""),
        section("  Navigation"),
        Line::from("    j/Down    Move down"),
        Line::from("    k/Up      Move up"),
        Line::from("    Tab       Toggle Services / Stores"),
        Line::from("    Esc/q     Back / Quit"),
        Line::from(""),
        section("  Services"),
        Line::from("    Space     Toggle selected row"),
        Line::from("    Enter     Toggle, or open the label dialog"),
        Line::from("    h/l       Previous / next label or genre"),
        Line::from(""),
        section("  Label dialog"),
        Line::from("    Enter     Confirm"),
        Line::from("    Left      Back"),
        Line::from("    Esc       Close"),
        Line::from(""),
        section("  Other"),
        Line::from("    ?         Show this help"),
        Line::from("    Ctrl-C    Quit"),
        Line::from(""),
    ];

    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.current_view {
        View::Services => "Services",
        View::Stores => "Stores",
        View::Help => "Help",
    };

    let cart = app.state.cart();
    let status_msg = app.status_message.as_deref().unwrap_or("");

    let bar = Line::from(vec![
        Span::styled(
            format!(" {view_name} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            app.state.plan().display_name(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        if cart.is_empty() {
            Span::styled("cart empty", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                format!("{} in cart, {}", cart.item_count(), cart.formatted_total()),
                Style::default().fg(Color::Yellow),
            )
        },
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Red)),
        Span::raw("  q:quit  ?:help  Tab:switch view"),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}

// -- Helpers --

fn checkbox(on: bool) -> &'static str {
    if on { "[x]" } else { "[ ]" }
}

fn cursor_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn delivery_colored(status: DeliveryStatus) -> Span<'static> {
    let color = match status {
        DeliveryStatus::Sent => Color::Green,
        DeliveryStatus::Rejected => Color::Red,
    };
    Span::styled(status.to_string(), Style::default().fg(color))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::backend::TestBackend;

    use ditto_core::Plan;
    use ditto_core::labels::LabelRegistry;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn services_view_shows_plan_and_cart() {
        let app = App::new(Plan::Pro, LabelRegistry::default());
        let screen = draw(&app);
        assert!(screen.contains("Services (Pro plan)"), "{screen}");
        assert!(screen.contains("Included with Pro"), "{screen}");
        assert!(screen.contains("No services selected"), "{screen}");
    }

    #[test]
    fn stores_view_shows_distribution_options() {
        let mut app = App::new(Plan::Starter, LabelRegistry::default());
        app.cycle_view();
        let screen = draw(&app);
        assert!(screen.contains("26 sent, 3 rejected"), "{screen}");
        assert!(screen.contains("Distribution options"), "{screen}");
        assert!(screen.contains("Upgrade to change this setting"), "{screen}");
    }

    #[test]
    fn modal_overlay_lists_labels() {
        let mut app = App::new(Plan::DittoPlusRls, LabelRegistry::default());
        app.apply(ditto_core::ServicesEvent::OpenLabelModal).unwrap();
        let screen = draw(&app);
        assert!(screen.contains("Beatport label"), "{screen}");
        assert!(screen.contains("Create a Beatport Label"), "{screen}");
    }
}
