//! Ratatui TUI frontend for the table client.
//!
//! Pure UI module: terminal lifecycle, rendering, and input → intent
//! mapping. The felt arrives as recorded [`DrawCommand`]s and is painted on
//! a braille canvas; control state is read from a [`ControlPanel`]. This
//! module has no networking dependencies.

use std::f64::consts::TAU;
use std::io::{self, Stdout};
use std::str::FromStr;

use cardroom_core::controls::ControlPanel;
use cardroom_core::felt::DrawCommand;
use cardroom_core::geometry::{Point, point_on_ellipse};
use cardroom_core::protocol::{ActionKind, InputField};
use cardroom_core::replay::{ReplayStatus, ReplayStep};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, Paragraph, Wrap,
        canvas::{Canvas, Circle, Context, Points, Rectangle},
    },
};

/// Dots sampled around each ellipse outline.
const ELLIPSE_SAMPLES: usize = 240;

// ---------------------------------------------------------------------------
// UserIntent: result of processing user input
// ---------------------------------------------------------------------------

/// The result of processing a user input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// No action needed (e.g. the event was purely cosmetic).
    None,
    /// The user wants to close the client.
    Quit,
    /// Send the selected action.
    Dispatch(ActionKind),
    /// New text for an input field.
    Input { field: InputField, value: String },
    /// Previous/next in a hand history.
    Replay(ReplayStep),
}

// ---------------------------------------------------------------------------
// TUI-only state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TuiState {
    /// Index into [`ActionKind::ALL`].
    selected: usize,
    show_help: bool,
    /// Server notification waiting to be acknowledged.
    notice: Option<String>,
    status: String,
    picture: Vec<DrawCommand>,
}

fn is_enabled(panel: &ControlPanel, index: usize) -> bool {
    !panel.button(ActionKind::ALL[index]).disabled
}

/// Next enabled control after `current`, wrapping. Stays put when nothing
/// else is enabled.
fn step_selection(panel: &ControlPanel, current: usize, forward: bool) -> usize {
    let count = ActionKind::ALL.len();
    (1..=count)
        .map(|offset| {
            if forward {
                (current + offset) % count
            } else {
                (current + count - offset % count) % count
            }
        })
        .find(|&index| is_enabled(panel, index))
        .unwrap_or(current)
}

/// Keep the selection on an enabled control after the panel changes.
fn settle_selection(panel: &ControlPanel, current: usize) -> usize {
    if is_enabled(panel, current) {
        current
    } else {
        step_selection(panel, current, true)
    }
}

impl TuiState {
    fn selected_kind(&self) -> ActionKind {
        ActionKind::ALL[self.selected % ActionKind::ALL.len()]
    }

    /// Keys shared by both views. `Some` when the key was consumed.
    fn common_key(&mut self, code: KeyCode) -> Option<UserIntent> {
        if self.notice.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                self.notice = None;
            }
            return Some(UserIntent::None);
        }
        match code {
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                Some(UserIntent::None)
            }
            KeyCode::Esc => Some(UserIntent::Quit),
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                Some(UserIntent::None)
            }
            _ if self.show_help => Some(UserIntent::None),
            _ => None,
        }
    }

    fn table_key(&mut self, code: KeyCode, panel: &ControlPanel) -> UserIntent {
        if let Some(intent) = self.common_key(code) {
            return intent;
        }
        let kind = self.selected_kind();
        let field = kind.input().filter(|&field| !panel.input(field).disabled);
        match code {
            KeyCode::Left | KeyCode::Up => {
                self.selected = step_selection(panel, self.selected, false);
                UserIntent::None
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                self.selected = step_selection(panel, self.selected, true);
                UserIntent::None
            }
            KeyCode::Enter if !panel.button(kind).disabled => UserIntent::Dispatch(kind),
            KeyCode::Char(c) => match field {
                Some(field) => {
                    let mut value = panel.input(field).value.clone();
                    value.push(c);
                    UserIntent::Input { field, value }
                }
                None => UserIntent::None,
            },
            KeyCode::Backspace => match field {
                Some(field) => {
                    let mut value = panel.input(field).value.clone();
                    value.pop();
                    UserIntent::Input { field, value }
                }
                None => UserIntent::None,
            },
            KeyCode::Delete => match field {
                Some(field) => UserIntent::Input {
                    field,
                    value: String::new(),
                },
                None => UserIntent::None,
            },
            _ => UserIntent::None,
        }
    }

    fn replay_key(&mut self, code: KeyCode) -> UserIntent {
        if let Some(intent) = self.common_key(code) {
            return intent;
        }
        match code {
            KeyCode::Left => UserIntent::Replay(ReplayStep::Previous),
            KeyCode::Right => UserIntent::Replay(ReplayStep::Next),
            _ => UserIntent::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API: Tui struct
// ---------------------------------------------------------------------------

/// Owns the ratatui terminal and all UI-layer state.
///
/// The client orchestrator ([`crate::client`]) hands over a new picture on
/// every draw tick, calls one of the `render_*` methods, and polls input
/// between socket events.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: TuiState,
}

impl Tui {
    /// Set up the terminal (raw mode, alternate screen) and return a ready `Tui`.
    pub fn setup() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            state: TuiState::default(),
        })
    }

    /// Restore the terminal to its original state.
    pub fn teardown(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Replace the felt picture shown on the next render.
    pub fn set_picture(&mut self, picture: Vec<DrawCommand>) {
        self.state.picture = picture;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.state.status = status.into();
    }

    /// Show a server notification until the user dismisses it.
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.state.notice = Some(message.into());
    }

    pub fn on_panel_changed(&mut self, panel: &ControlPanel) {
        self.state.selected = settle_selection(panel, self.state.selected);
    }

    pub fn render_table(&mut self, panel: &ControlPanel) -> io::Result<()> {
        let state = &self.state;
        self.terminal.draw(|f| {
            let controls_height = 5;
            let [felt, controls, status] = split_screen(f.area(), controls_height);
            render_felt(f, &state.picture, felt);
            render_controls(f, panel, state.selected, controls);
            render_status(f, &state.status, status);
            render_popups(f, state, TABLE_HELP);
        })?;
        Ok(())
    }

    pub fn render_replay(&mut self, replay: &ReplayStatus) -> io::Result<()> {
        let state = &self.state;
        self.terminal.draw(|f| {
            let [felt, bar, status] = split_screen(f.area(), 3);
            render_felt(f, &state.picture, felt);
            render_replay_bar(f, replay, bar);
            render_status(f, &state.status, status);
            render_popups(f, state, REPLAY_HELP);
        })?;
        Ok(())
    }

    /// Poll for a key press without blocking and map it for the table view.
    pub fn poll_table_input(&mut self, panel: &ControlPanel) -> io::Result<UserIntent> {
        Ok(match poll_key()? {
            Some(code) => self.state.table_key(code, panel),
            None => UserIntent::None,
        })
    }

    /// `true` when Esc was pressed. Used while the table is offline and the
    /// panel cannot be read.
    pub fn poll_quit(&mut self) -> io::Result<bool> {
        Ok(poll_key()? == Some(KeyCode::Esc))
    }

    /// Poll for a key press without blocking and map it for a hand history.
    pub fn poll_replay_input(&mut self) -> io::Result<UserIntent> {
        Ok(match poll_key()? {
            Some(code) => self.state.replay_key(code),
            None => UserIntent::None,
        })
    }
}

fn poll_key() -> io::Result<Option<KeyCode>> {
    if !event::poll(std::time::Duration::from_millis(0))? {
        return Ok(None);
    }
    let Event::Key(key) = event::read()? else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    Ok(Some(key.code))
}

// ---------------------------------------------------------------------------
// Felt canvas
// ---------------------------------------------------------------------------

/// Terminal color for a CSS color name. The three felt defaults that
/// ratatui does not know by name are mapped explicitly.
fn css_color(name: &str) -> Color {
    match name.trim().to_ascii_lowercase().as_str() {
        "saddlebrown" => Color::Rgb(139, 69, 19),
        "seagreen" => Color::Rgb(46, 139, 87),
        "darkblue" => Color::Rgb(0, 0, 139),
        other => Color::from_str(other).unwrap_or(Color::White),
    }
}

/// World-coordinate bounds of a `width` × `height` cell area. A cell is
/// about twice as tall as it is wide, so one world unit spans
/// `min(width, 2 * height)` cell widths in both directions.
fn world_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let width = f64::from(width.max(1));
    let height = f64::from(height.max(1)) * 2.0;
    let unit = width.min(height);
    let half_x = width / unit / 2.0;
    let half_y = height / unit / 2.0;
    ([-half_x, half_x], [-half_y, half_y])
}

/// Left edge for `chars` glyphs centered on `center_x`.
fn label_x(center_x: f64, chars: usize, cell_width: f64) -> f64 {
    center_x - chars as f64 * cell_width / 2.0
}

fn ellipse_outline(center: Point, width: f64, height: f64) -> Vec<(f64, f64)> {
    (0..ELLIPSE_SAMPLES)
        .map(|i| {
            let angle = TAU * i as f64 / ELLIPSE_SAMPLES as f64;
            let p = point_on_ellipse(center, width, height, angle);
            (p.x, p.y)
        })
        .collect()
}

fn paint(ctx: &mut Context<'_>, picture: &[DrawCommand], cell_width: f64) {
    for command in picture {
        match command {
            DrawCommand::Clear { .. } => {}
            DrawCommand::Ellipse {
                center,
                width,
                height,
                color,
            } => {
                let coords = ellipse_outline(*center, *width, *height);
                ctx.draw(&Points {
                    coords: &coords,
                    color: css_color(color),
                });
            }
            DrawCommand::RoundedRect {
                center,
                width,
                height,
                color,
                ..
            } => ctx.draw(&Rectangle {
                x: center.x - width / 2.0,
                y: center.y - height / 2.0,
                width: *width,
                height: *height,
                color: css_color(color),
            }),
            DrawCommand::Circle {
                center,
                diameter,
                color,
            } => ctx.draw(&Circle {
                x: center.x,
                y: center.y,
                radius: diameter / 2.0,
                color: css_color(color),
            }),
            DrawCommand::Text {
                text,
                center,
                color,
                ..
            } => {
                let x = label_x(center.x, text.chars().count(), cell_width);
                ctx.print(
                    x,
                    center.y,
                    Span::styled(text.clone(), Style::default().fg(css_color(color))),
                );
            }
        }
    }
}

fn render_felt(frame: &mut Frame, picture: &[DrawCommand], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Table ")
        .title_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    let (x_bounds, y_bounds) = world_bounds(inner.width, inner.height);
    let cell_width = (x_bounds[1] - x_bounds[0]) / f64::from(inner.width.max(1));
    let background = picture
        .iter()
        .find_map(|command| match command {
            DrawCommand::Clear { color } => Some(css_color(color)),
            _ => None,
        })
        .unwrap_or(Color::Reset);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| paint(ctx, picture, cell_width));
    frame.render_widget(canvas, area);
}

// ---------------------------------------------------------------------------
// Controls, status and popups
// ---------------------------------------------------------------------------

fn split_screen(area: Rect, bar_height: u16) -> [Rect; 3] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(bar_height),
            Constraint::Length(1),
        ])
        .split(area);
    [rows[0], rows[1], rows[2]]
}

/// Button text, with the input in brackets for actions that take one.
fn control_text(panel: &ControlPanel, kind: ActionKind) -> String {
    let label = &panel.button(kind).label;
    match kind.input() {
        Some(field) => {
            let input = panel.input(field);
            let value = if input.value.is_empty() {
                field.placeholder()
            } else {
                input.value.as_str()
            };
            format!(" {label} [{value}] ")
        }
        None => format!(" {label} "),
    }
}

fn render_controls(frame: &mut Frame, panel: &ControlPanel, selected: usize, area: Rect) {
    let mut spans = Vec::with_capacity(ActionKind::ALL.len() * 2);
    for (index, (kind, control)) in panel.buttons().enumerate() {
        let mut style = if control.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        if index == selected && !control.disabled {
            style = style.bg(Color::Blue).fg(Color::Black).bold();
        }
        spans.push(Span::styled(control_text(panel, kind), style));
        spans.push(Span::raw(" "));
    }

    let controls = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Controls ")
                .title_style(Style::default().fg(Color::Blue).bold()),
        );
    frame.render_widget(controls, area);
}

fn render_replay_bar(frame: &mut Frame, replay: &ReplayStatus, area: Rect) {
    let arrow = |label: &'static str, disabled: bool| {
        let color = if disabled { Color::DarkGray } else { Color::White };
        Span::styled(label, Style::default().fg(color).bold())
    };
    let line = Line::from(vec![
        arrow(" ← Previous ", replay.previous_disabled),
        Span::raw(format!(" {} / {} ", replay.position, replay.total)),
        arrow(" Next → ", replay.next_disabled),
    ])
    .centered();

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Hand history ")
            .title_style(Style::default().fg(Color::Blue).bold()),
    );
    frame.render_widget(bar, area);
}

fn render_status(frame: &mut Frame, status: &str, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {status} "), Style::default().fg(Color::Gray)),
        Span::styled(" F1 help  Esc quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_popups(frame: &mut Frame, state: &TuiState, help: &[(&str, &str)]) {
    if state.show_help {
        render_help_popup(frame, help);
    }
    if let Some(notice) = &state.notice {
        render_notice_popup(frame, notice);
    }
}

const TABLE_HELP: &[(&str, &str)] = &[
    ("Left/Right", "Select an available action"),
    ("Enter", "Send the selected action"),
    ("Typing", "Edit the selected action's input"),
    ("Backspace", "Delete the last character"),
    ("Delete", "Clear the input"),
    ("F1", "Toggle this help"),
    ("ESC", "Quit"),
];

const REPLAY_HELP: &[(&str, &str)] = &[
    ("Left", "Previous frame"),
    ("Right", "Next frame"),
    ("F1", "Toggle this help"),
    ("ESC", "Quit"),
];

fn render_help_popup(frame: &mut Frame, entries: &[(&str, &str)]) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "CONTROLS",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
    ];
    lines.extend(
        entries
            .iter()
            .map(|(key, what)| Line::from(format!("  {key:<14}{what}"))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press ESC or F1 to close",
        Style::default().fg(Color::DarkGray),
    )));

    let help = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(Style::default().fg(Color::Cyan).bold())
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(help, area);
}

fn render_notice_popup(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let notice = Paragraph::new(Text::from(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Notice ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(notice, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_core::protocol::ActionDescriptor;

    fn panel(json: &str) -> ControlPanel {
        let descriptor: ActionDescriptor = serde_json::from_str(json).unwrap();
        ControlPanel::from_descriptor(&descriptor)
    }

    fn index_of(kind: ActionKind) -> usize {
        ActionKind::ALL.iter().position(|&k| k == kind).unwrap()
    }

    #[test]
    fn css_names_map_to_terminal_colors() {
        assert_eq!(css_color("seagreen"), Color::Rgb(46, 139, 87));
        assert_eq!(css_color("SaddleBrown"), Color::Rgb(139, 69, 19));
        assert_eq!(css_color("darkblue"), Color::Rgb(0, 0, 139));
        assert_eq!(css_color("red"), Color::Red);
        assert_eq!(css_color("#102030"), Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(css_color("no-such-color"), Color::White);
    }

    #[test]
    fn world_bounds_keep_the_table_round() {
        // 80 columns × 20 rows: height is the limiting side.
        let (x, y) = world_bounds(80, 20);
        assert_eq!(x, [-1.0, 1.0]);
        assert_eq!(y, [-0.5, 0.5]);

        // 40 columns × 40 rows: width is the limiting side.
        let (x, y) = world_bounds(40, 40);
        assert_eq!(x, [-0.5, 0.5]);
        assert_eq!(y, [-1.0, 1.0]);
    }

    #[test]
    fn labels_are_centered_on_their_anchor() {
        assert_eq!(label_x(0.0, 4, 0.025), -0.05);
        assert_eq!(label_x(0.5, 0, 0.025), 0.5);
    }

    #[test]
    fn ellipse_outline_starts_on_the_right() {
        let coords = ellipse_outline(Point::ORIGIN, 2.0, 1.0);
        assert_eq!(coords.len(), ELLIPSE_SAMPLES);
        let (x, y) = coords[0];
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn selection_skips_disabled_controls_and_wraps() {
        let panel = panel(r#"{"f": true, "cc": 20, "l": true}"#);
        let fold = index_of(ActionKind::Fold);
        let call = index_of(ActionKind::CheckOrCall);
        let leave = index_of(ActionKind::Leave);

        assert_eq!(step_selection(&panel, fold, true), call);
        assert_eq!(step_selection(&panel, call, true), leave);
        assert_eq!(step_selection(&panel, leave, false), call);
        assert_eq!(settle_selection(&panel, 0), leave);
        assert_eq!(settle_selection(&panel, fold), fold);

        let idle = ControlPanel::new();
        assert_eq!(step_selection(&idle, 3, true), 3);
    }

    #[test]
    fn enter_dispatches_only_enabled_controls() {
        let panel = panel(r#"{"f": true}"#);
        let mut state = TuiState::default();
        assert_eq!(state.table_key(KeyCode::Enter, &panel), UserIntent::None);

        state.selected = settle_selection(&panel, state.selected);
        assert_eq!(
            state.table_key(KeyCode::Enter, &panel),
            UserIntent::Dispatch(ActionKind::Fold)
        );
    }

    #[test]
    fn typing_edits_the_selected_input() {
        let mut panel = panel(r#"{"cbr": [false, true, 20, 500]}"#);
        let mut state = TuiState {
            selected: index_of(ActionKind::CompleteBetOrRaiseTo),
            ..TuiState::default()
        };

        assert_eq!(
            state.table_key(KeyCode::Delete, &panel),
            UserIntent::Input {
                field: InputField::BetAmount,
                value: String::new(),
            }
        );
        panel.set_input(InputField::BetAmount, "4");
        assert_eq!(
            state.table_key(KeyCode::Char('0'), &panel),
            UserIntent::Input {
                field: InputField::BetAmount,
                value: "40".into(),
            }
        );
        assert_eq!(
            state.table_key(KeyCode::Backspace, &panel),
            UserIntent::Input {
                field: InputField::BetAmount,
                value: String::new(),
            }
        );
    }

    #[test]
    fn typing_without_an_input_does_nothing() {
        let panel = panel(r#"{"f": true}"#);
        let mut state = TuiState {
            selected: index_of(ActionKind::Fold),
            ..TuiState::default()
        };
        assert_eq!(state.table_key(KeyCode::Char('x'), &panel), UserIntent::None);
    }

    #[test]
    fn notices_swallow_keys_until_dismissed() {
        let panel = panel(r#"{"f": true}"#);
        let mut state = TuiState {
            selected: index_of(ActionKind::Fold),
            notice: Some("Seat taken".into()),
            ..TuiState::default()
        };
        assert_eq!(state.table_key(KeyCode::Esc, &panel), UserIntent::None);
        assert!(state.notice.is_none());
        assert_eq!(state.table_key(KeyCode::Esc, &panel), UserIntent::Quit);
    }

    #[test]
    fn help_closes_before_quitting() {
        let mut state = TuiState::default();
        assert_eq!(state.replay_key(KeyCode::F(1)), UserIntent::None);
        assert!(state.show_help);
        assert_eq!(state.replay_key(KeyCode::Right), UserIntent::None);
        assert_eq!(state.replay_key(KeyCode::Esc), UserIntent::None);
        assert_eq!(
            state.replay_key(KeyCode::Right),
            UserIntent::Replay(ReplayStep::Next)
        );
        assert_eq!(
            state.replay_key(KeyCode::Left),
            UserIntent::Replay(ReplayStep::Previous)
        );
        assert_eq!(state.replay_key(KeyCode::Esc), UserIntent::Quit);
    }

    #[test]
    fn control_text_shows_input_or_placeholder() {
        let panel = panel(r#"{"j": [1, 3], "f": true}"#);
        assert_eq!(control_text(&panel, ActionKind::Join), " Join [1, 3] ");
        assert_eq!(control_text(&panel, ActionKind::Fold), " Fold ");
        assert_eq!(
            control_text(&panel, ActionKind::CompleteBetOrRaiseTo),
            format!(
                " {} [Amount] ",
                panel.button(ActionKind::CompleteBetOrRaiseTo).label
            )
        );
    }
}
