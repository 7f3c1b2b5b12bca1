//! Pure rendering: `AppState` in, widgets out.
//!
//! Every screen is a single centered card. Nothing here mutates state.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::forms::Form;
use crate::state::{AppState, Dashboard, Screen, TwoFactor};

const CARD_WIDTH: u16 = 56;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Keyboard hint shown at the bottom of the card.
struct Hint {
    key: &'static str,
    action: &'static str,
}

/// Renders the active screen.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    match &state.screen {
        Screen::Login(form) => render_form_card(
            state,
            frame,
            area,
            "LBX Banking",
            form,
            &[
                Hint { key: "Enter", action: "sign in" },
                Hint { key: "Tab", action: "next field" },
                Hint { key: "Ctrl+N", action: "create account" },
                Hint { key: "Esc", action: "quit" },
            ],
        ),
        Screen::Register(form) => render_form_card(
            state,
            frame,
            area,
            "Create account",
            form,
            &[
                Hint { key: "Enter", action: "create" },
                Hint { key: "Tab", action: "next field" },
                Hint { key: "Esc", action: "back" },
            ],
        ),
        Screen::TwoFactor(tfa) => render_two_factor(state, frame, area, tfa),
        Screen::Dashboard(dash) => render_dashboard(state, frame, area, dash),
    }
}

// ============================================================================
// Screens
// ============================================================================

fn render_form_card(
    state: &AppState,
    frame: &mut Frame,
    area: Rect,
    title: &str,
    form: &Form,
    hints: &[Hint],
) {
    // Two rows per field plus notices and the hint line
    let height = (form.fields.len() as u16) * 2 + 5;
    let card = render_card(state, frame, area, title, height);

    let mut y = card.y;
    y = render_notices(state, frame, area, card, y);
    render_form(frame, area, card, &mut y, form);
    render_hints(frame, area, card, hints);
}

fn render_two_factor(state: &AppState, frame: &mut Frame, area: Rect, tfa: &TwoFactor) {
    let card = render_card(state, frame, area, "One-time code", 9);

    let mut y = card.y;
    y = render_notices(state, frame, area, card, y);

    let intro = Paragraph::new(Line::from(Span::styled(
        "Enter the code sent to your phone.",
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(intro, line_rect(area, card, y));
    y += 2;

    render_form(frame, area, card, &mut y, &tfa.form);
    render_hints(
        frame,
        area,
        card,
        &[
            Hint { key: "Enter", action: "confirm" },
            Hint { key: "Esc", action: "back" },
        ],
    );
}

fn render_dashboard(state: &AppState, frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let card = render_card(state, frame, area, "Dashboard", 14);

    let mut y = card.y;
    y = render_notices(state, frame, area, card, y);

    let account = &dash.account;
    let owner = Line::from(vec![
        Span::styled("Account holder  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            fit(&account.owner_name, card.width.saturating_sub(16) as usize),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(owner), line_rect(area, card, y));
    y += 1;

    let numbers = Line::from(vec![
        Span::styled("Agency / Number ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} / {}", account.agency, account.number),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(numbers), line_rect(area, card, y));
    y += 1;

    let balance = Line::from(vec![
        Span::styled("Balance         ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("R$ {:.2}", account.balance),
            Style::default()
                .fg(balance_color(account.balance))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(balance), line_rect(area, card, y));
    y += 2;

    // Transaction kind selector
    let kind = Line::from(vec![
        Span::styled("Type  ", Style::default().fg(Color::DarkGray)),
        Span::styled("◂ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            dash.kind.label(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▸", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(kind), line_rect(area, card, y));
    y += 1;

    render_form(frame, area, card, &mut y, &dash.form);
    render_hints(
        frame,
        area,
        card,
        &[
            Hint { key: "Enter", action: "submit" },
            Hint { key: "◂ ▸", action: "type" },
            Hint { key: "Ctrl+R", action: "refresh" },
            Hint { key: "Esc", action: "sign out" },
        ],
    );
}

// ============================================================================
// Building blocks
// ============================================================================

/// Draws the bordered card and returns its inner area.
fn render_card(state: &AppState, frame: &mut Frame, area: Rect, title: &str, height: u16) -> Rect {
    let width = CARD_WIDTH.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let card = Rect::new(
        (area.width.saturating_sub(width)) / 2,
        (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, card);

    let title = if state.is_busy() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        format!(" {title} {spinner} ")
    } else {
        format!(" {title} ")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, card);

    Rect::new(
        card.x + 2,
        card.y + 1,
        card.width.saturating_sub(4),
        card.height.saturating_sub(2),
    )
}

/// Red for an overdrawn balance, green otherwise.
fn balance_color(balance: f64) -> Color {
    if balance < 0.0 {
        Color::Red
    } else {
        Color::Green
    }
}

/// Renders the error/success line at the top of the card. Returns the
/// next free row.
fn render_notices(state: &AppState, frame: &mut Frame, area: Rect, card: Rect, y: u16) -> u16 {
    let line = if let Some(error) = &state.notice.error {
        Line::from(Span::styled(
            fit(error, card.width as usize),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(success) = &state.notice.success {
        Line::from(Span::styled(
            fit(success, card.width as usize),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), line_rect(area, card, y));
    y + 2
}

/// Renders a form's fields starting at `*y`, two rows per field.
fn render_form(frame: &mut Frame, area: Rect, card: Rect, y: &mut u16, form: &Form) {
    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;

        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(field.label, label_style))),
            line_rect(area, card, *y),
        );
        *y += 1;

        let max_width = card.width.saturating_sub(3) as usize;
        let value = field.display_value();
        let mut spans = vec![Span::styled("> ", Style::default().fg(Color::Cyan))];
        if value.is_empty() && !focused {
            spans.push(Span::styled(
                fit(field.placeholder, max_width),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                fit_tail(&value, max_width),
                Style::default().fg(Color::White),
            ));
            if focused {
                spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), line_rect(area, card, *y));
        *y += 1;
    }
}

fn render_hints(frame: &mut Frame, area: Rect, card: Rect, hints: &[Hint]) {
    let y = card.y + card.height.saturating_sub(1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, line_rect(area, card, y));
}

/// One card row, clamped to the frame. Rows past the bottom edge of a
/// small terminal collapse to an empty rect instead of panicking in
/// the buffer.
fn line_rect(area: Rect, card: Rect, y: u16) -> Rect {
    Rect::new(card.x, y, card.width, 1).intersection(area)
}

/// Truncates to `max` columns, keeping the head.
fn fit(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let budget = max.saturating_sub(1);
    for c in text.chars() {
        if out.width() + c.to_string().width() > budget {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

/// Truncates to `max` columns, keeping the tail (cursor end stays visible).
fn fit_tail(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut tail: Vec<char> = Vec::new();
    let mut width = 0;
    for c in text.chars().rev() {
        let w = c.to_string().width();
        if width + w > budget {
            break;
        }
        width += w;
        tail.push(c);
    }
    let mut out = String::from("…");
    out.extend(tail.into_iter().rev());
    out
}

#[cfg(test)]
mod tests {
    use lbx_core::config::Config;
    use lbx_core::types::Account;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn dashboard_state(balance: f64) -> AppState {
        let mut state = AppState::new(Config::default());
        state.screen = Screen::dashboard(
            "acc-42".to_string(),
            "jwt-token".to_string(),
            Account {
                owner_name: "Renan Lima".to_string(),
                agency: "0001".to_string(),
                number: "123456".to_string(),
                balance,
            },
        );
        state
    }

    fn draw(state: &AppState, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(state, frame)).unwrap();
        terminal
    }

    #[test]
    fn test_balance_color_follows_sign() {
        assert_eq!(balance_color(150.0), Color::Green);
        assert_eq!(balance_color(0.0), Color::Green);
        assert_eq!(balance_color(-42.5), Color::Red);
    }

    #[test]
    fn test_negative_balance_renders_red() {
        let terminal = draw(&dashboard_state(-42.5), 80, 24);

        // Locate the "R$ -" run of the balance line and check its style
        let buffer = terminal.backend().buffer();
        let mut found = false;
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width.saturating_sub(3) {
                if buffer.cell((x, y)).is_some_and(|c| c.symbol() == "R")
                    && buffer.cell((x + 1, y)).is_some_and(|c| c.symbol() == "$")
                    && buffer.cell((x + 3, y)).is_some_and(|c| c.symbol() == "-")
                {
                    found = true;
                    let cell = buffer.cell((x, y)).unwrap();
                    assert_eq!(cell.style().fg, Some(Color::Red));
                }
            }
        }
        assert!(found, "balance line not rendered");
    }

    #[test]
    fn test_dashboard_renders_on_tiny_terminal() {
        draw(&dashboard_state(100.0), 20, 5);
    }

    #[test]
    fn test_every_screen_renders_on_tiny_terminal() {
        for screen in [
            Screen::login(),
            Screen::register(),
            Screen::two_factor("acc-42".to_string()),
        ] {
            let mut state = AppState::new(Config::default());
            state.screen = screen;
            state.notice.set_error("Something went wrong.");
            draw(&state, 20, 5);
            draw(&state, 2, 2);
        }
        draw(&dashboard_state(-1.0), 2, 2);
    }

    #[test]
    fn test_fit_keeps_short_text() {
        assert_eq!(fit("hello", 10), "hello");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("hello world", 6), "hello…");
    }

    #[test]
    fn test_fit_tail_keeps_cursor_end() {
        assert_eq!(fit_tail("1234567890", 5), "…7890");
    }
}
