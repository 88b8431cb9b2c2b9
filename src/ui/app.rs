use std::mem;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::auth::{Credentials, Session};
use crate::models::Winner;
use crate::raffle::Raffle;
use crate::report::stats::{
    average_per_day, draws_by_date, recent_winners, top_department, Overview,
};
use crate::store::WinnerStore;

use super::forms::{LoginField, LoginForm};
use super::helpers::{
    centered_rect, cycle_department, department_filter_label, format_draw_date, surface_error,
};
use super::screens::{DrawScreen, Screen, WinnersScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Winners listed on the dashboard.
const RECENT_WINNERS: usize = 5;
/// Days shown in the analytics draw history.
const HISTORY_DAYS: usize = 7;
/// Width of the widest bar in the analytics charts.
const BAR_WIDTH: usize = 30;
const LOGIN_REJECTED: &str = "Invalid username or password";

/// Modal states layered over the current screen.
enum Mode {
    Normal,
    Searching(SearchState),
    ConfirmClear,
}

/// State for an active inline search on the winners screen.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App<S> {
    raffle: Raffle<S>,
    credentials: Credentials,
    session: Session,
    export_dir: PathBuf,
    /// Snapshot of the store, refreshed after every mutation.
    winners: Vec<Winner>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    last_export: Option<PathBuf>,
}

impl<S: WinnerStore> App<S> {
    pub fn new(raffle: Raffle<S>, credentials: Credentials, export_dir: PathBuf) -> Self {
        let winners = raffle.winners();
        Self {
            raffle,
            credentials,
            session: Session::new(),
            export_dir,
            winners,
            screen: Screen::Login(LoginForm::default()),
            mode: Mode::Normal,
            status: None,
            last_export: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state),
            Mode::ConfirmClear => self.handle_confirm_clear(code),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if let Screen::Login(form) = &mut self.screen {
            let mut logged_in = false;
            match code {
                KeyCode::Esc => *exit = true,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    form.toggle_field()
                }
                KeyCode::Backspace => form.backspace(),
                KeyCode::Enter => {
                    if self
                        .session
                        .login(&self.credentials, &form.username, &form.password)
                    {
                        logged_in = true;
                    } else {
                        form.reject(LOGIN_REJECTED);
                    }
                }
                KeyCode::Char(ch) => {
                    if form.push_char(ch) {
                        form.error = None;
                    }
                }
                _ => {}
            }

            if logged_in {
                self.open_dashboard();
                self.set_status("Logged in.", StatusKind::Info);
            }
            return Ok(Mode::Normal);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                *exit = true;
                return Ok(Mode::Normal);
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.clear_status();
                self.open_dashboard();
                return Ok(Mode::Normal);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.clear_status();
                self.open_draw();
                return Ok(Mode::Normal);
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.clear_status();
                self.open_winners();
                return Ok(Mode::Normal);
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                self.screen = Screen::Analytics;
                return Ok(Mode::Normal);
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.session.logout();
                self.screen = Screen::Login(LoginForm::default());
                self.set_status("Logged out.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            _ => {}
        }

        match &mut self.screen {
            Screen::Login(_) => Ok(Mode::Normal),
            Screen::Dashboard | Screen::Analytics => Ok(Mode::Normal),
            Screen::Draw(draw) => {
                match code {
                    KeyCode::Esc => self.open_dashboard(),
                    KeyCode::Char(ch) => {
                        draw.count.push_char(ch);
                    }
                    KeyCode::Backspace => draw.count.backspace(),
                    KeyCode::Tab | KeyCode::Right | KeyCode::BackTab | KeyCode::Left => {
                        let forward = matches!(code, KeyCode::Tab | KeyCode::Right);
                        draw.department = cycle_department(draw.department, forward);
                        draw.selected = 0;
                        draw.set_eligible(self.raffle.eligible(draw.department));
                    }
                    KeyCode::Up => draw.move_selection(-1),
                    KeyCode::Down => draw.move_selection(1),
                    KeyCode::PageUp => draw.move_selection(-5),
                    KeyCode::PageDown => draw.move_selection(5),
                    KeyCode::Enter => self.perform_draw(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Winners(list) => {
                match code {
                    KeyCode::Esc => self.open_dashboard(),
                    KeyCode::Up => list.move_selection(-1),
                    KeyCode::Down => list.move_selection(1),
                    KeyCode::PageUp => list.move_selection(-5),
                    KeyCode::PageDown => list.move_selection(5),
                    KeyCode::Home => list.select_first(),
                    KeyCode::End => list.select_last(),
                    KeyCode::Tab | KeyCode::BackTab => {
                        let forward = code == KeyCode::Tab;
                        list.set_department(cycle_department(list.filter.department, forward));
                    }
                    KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char('/') => {
                        return Ok(Mode::Searching(SearchState {
                            query: list.filter.query.clone(),
                        }));
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') => self.export_filtered(),
                    KeyCode::Char('o') | KeyCode::Char('O') => self.open_last_export(),
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        if self.winners.is_empty() {
                            self.set_status("There are no winners to clear.", StatusKind::Error);
                        } else {
                            return Ok(Mode::ConfirmClear);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        let keep_open = match code {
            KeyCode::Esc => {
                state.query.clear();
                false
            }
            KeyCode::Enter => false,
            KeyCode::Backspace => {
                state.query.pop();
                true
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
                true
            }
            _ => true,
        };

        if let Screen::Winners(list) = &mut self.screen {
            list.set_query(state.query.clone());
        }

        if keep_open {
            Mode::Searching(state)
        } else {
            Mode::Normal
        }
    }

    fn handle_confirm_clear(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Clear cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.raffle.clear().context("failed to clear winners") {
                    Ok(()) => {
                        self.refresh_winners();
                        self.set_status("All winners cleared.", StatusKind::Info);
                        Mode::Normal
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Mode::ConfirmClear
                    }
                }
            }
            _ => Mode::ConfirmClear,
        }
    }

    fn perform_draw(&mut self) {
        let Screen::Draw(draw) = &mut self.screen else {
            return;
        };

        let count = match draw.count.parse() {
            Ok(count) => count,
            Err(message) => {
                self.set_status(message, StatusKind::Error);
                return;
            }
        };
        let department = draw.department;
        let result = self
            .raffle
            .draw(count, department)
            .context("failed to record winners");
        draw.set_eligible(self.raffle.eligible(department));

        match result {
            Ok(drawn) if drawn.is_empty() => {
                self.refresh_winners();
                self.set_status("No eligible contestants left to draw.", StatusKind::Error);
            }
            Ok(drawn) => {
                let message = match drawn.len() {
                    1 => format!("Congratulations {}!", drawn[0].name),
                    n if n < count => format!("Only {n} eligible contestants left; all drawn."),
                    n => format!("Drew {n} winners."),
                };
                draw.last_draw = drawn;
                self.refresh_winners();
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => {
                self.refresh_winners();
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    fn export_filtered(&mut self) {
        let Screen::Winners(list) = &self.screen else {
            return;
        };
        if list.filtered.is_empty() {
            self.set_status("Nothing to export.", StatusKind::Error);
            return;
        }

        let rows = list.filtered.len();
        let result = self
            .raffle
            .export(&self.export_dir, &list.filtered)
            .context("failed to export winners");
        match result {
            Ok(path) => {
                self.set_status(
                    format!("Exported {rows} winners to {}.", path.display()),
                    StatusKind::Info,
                );
                self.last_export = Some(path);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn open_last_export(&mut self) {
        let result = self
            .last_export
            .as_ref()
            .ok_or_else(|| anyhow!("Export the winners first (press E)."))
            .and_then(|path| {
                open_path(path)
                    .with_context(|| format!("failed to open {}", path.display()))
                    .map(|_| path.clone())
            });

        match result {
            Ok(path) => self.set_status(format!("Opened {}.", path.display()), StatusKind::Info),
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn open_dashboard(&mut self) {
        self.refresh_winners();
        self.screen = Screen::Dashboard;
    }

    fn open_draw(&mut self) {
        self.screen = Screen::Draw(DrawScreen::new(self.raffle.eligible(None)));
    }

    fn open_winners(&mut self) {
        self.refresh_winners();
        self.screen = Screen::Winners(WinnersScreen::new(self.winners.clone()));
    }

    fn refresh_winners(&mut self) {
        self.winners = self.raffle.winners();
        if let Screen::Winners(list) = &mut self.screen {
            list.set_winners(self.winners.clone());
        }
    }

    fn overview(&self) -> Overview {
        Overview::compute(self.raffle.roster(), &self.winners)
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, content_area, form),
            Screen::Dashboard => self.draw_dashboard(frame, content_area),
            Screen::Draw(draw) => self.draw_draw_screen(frame, content_area, draw),
            Screen::Winners(list) => self.draw_winners(frame, content_area, list),
            Screen::Analytics => self.draw_analytics(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::ConfirmClear => self.draw_confirm_clear(frame, area),
            Mode::Normal => {}
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Discovery Contest")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Username", LoginField::Username),
            form.build_line("Password", LoginField::Password),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to log in | Tab to switch | Esc to quit",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (prefix, row) = match form.active {
            LoginField::Username => ("Username: ".len() as u16, 0),
            LoginField::Password => ("Password: ".len() as u16, 1),
        };
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect) {
        let overview = self.overview();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let logged_in = self
            .session
            .login_time()
            .map(|at| format_draw_date(&at))
            .unwrap_or_else(|| "-".to_string());
        let headline = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Total contestants: ", label_style()),
                Span::raw(overview.total_contestants.to_string()),
                Span::styled("   Total winners: ", label_style()),
                Span::raw(overview.total_winners.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Departments: ", label_style()),
                Span::raw(overview.departments.len().to_string()),
                Span::styled("   Remaining pool: ", label_style()),
                Span::raw(overview.remaining_pool.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Logged in: ", label_style()),
                Span::raw(logged_in),
            ]),
        ])
        .block(
            Block::default()
                .title("Contest Dashboard")
                .borders(Borders::ALL),
        );
        frame.render_widget(headline, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let mut department_lines = Vec::new();
        for stats in &overview.departments {
            department_lines.push(Line::from(vec![
                Span::styled(format!("{:<26}", stats.department.label()), label_style()),
                Span::raw(format!(
                    "{} contestants, {} winners",
                    stats.total, stats.winners
                )),
            ]));
        }
        frame.render_widget(
            Paragraph::new(department_lines)
                .block(Block::default().title("By Department").borders(Borders::ALL)),
            columns[0],
        );

        let recent = recent_winners(&self.winners, RECENT_WINNERS);
        let recent_lines: Vec<Line> = if recent.is_empty() {
            vec![Line::from(Span::styled(
                "No winners yet. Press R to start a draw.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            recent
                .iter()
                .map(|winner| {
                    Line::from(format!(
                        "{:<22} {:<14} {}",
                        winner.name,
                        winner.department.short_label(),
                        format_draw_date(&winner.draw_date)
                    ))
                })
                .collect()
        };
        frame.render_widget(
            Paragraph::new(recent_lines)
                .block(Block::default().title("Recent Winners").borders(Borders::ALL)),
            columns[1],
        );
    }

    fn draw_draw_screen(&self, frame: &mut Frame, area: Rect, draw: &DrawScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let settings = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Department: ", label_style()),
                Span::raw(department_filter_label(draw.department)),
            ]),
            Line::from(vec![
                Span::styled("Winners to draw: ", label_style()),
                Span::styled(
                    if draw.count.value.is_empty() {
                        "<required>".to_string()
                    } else {
                        draw.count.value.clone()
                    },
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(vec![
                Span::styled("Eligible: ", label_style()),
                Span::raw(draw.eligible.len().to_string()),
                Span::styled("   Winners so far: ", label_style()),
                Span::raw(self.winners.len().to_string()),
            ]),
        ])
        .block(Block::default().title("Raffle Draw").borders(Borders::ALL));
        frame.render_widget(settings, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        let eligible_block = Block::default()
            .title("Eligible Contestants")
            .borders(Borders::ALL);
        if draw.eligible.is_empty() {
            let message = Paragraph::new("Everyone in this pool has already won.")
                .alignment(Alignment::Center)
                .block(eligible_block);
            frame.render_widget(message, columns[0]);
        } else {
            let items: Vec<ListItem> = draw
                .eligible
                .iter()
                .map(|contestant| {
                    ListItem::new(format!(
                        "{:<24} {:<14} {}",
                        contestant.name,
                        contestant.department.short_label(),
                        contestant.supervisor
                    ))
                })
                .collect();
            let list = List::new(items)
                .block(eligible_block)
                .highlight_style(Style::default().fg(Color::Yellow))
                .highlight_symbol("> ");
            let mut list_state = ListState::default();
            list_state.select(Some(draw.selected));
            frame.render_stateful_widget(list, columns[0], &mut list_state);
        }

        let result_lines: Vec<Line> = if draw.last_draw.is_empty() {
            vec![Line::from(Span::styled(
                "Press Enter to draw.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            draw.last_draw
                .iter()
                .enumerate()
                .map(|(index, winner)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:>2}. ", index + 1),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::styled(
                            winner.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(" ({})", winner.department.short_label())),
                    ])
                })
                .collect()
        };
        frame.render_widget(
            Paragraph::new(result_lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Latest Winners").borders(Borders::ALL)),
            columns[1],
        );
    }

    fn draw_winners(&self, frame: &mut Frame, area: Rect, list: &WinnersScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let overview = self.overview();
        let mut counts = vec![
            Span::styled("Total: ", label_style()),
            Span::raw(overview.total_winners.to_string()),
        ];
        for stats in &overview.departments {
            counts.push(Span::styled(
                format!("   {}: ", stats.department.short_label()),
                label_style(),
            ));
            counts.push(Span::raw(stats.winners.to_string()));
        }
        let query = if list.filter.query.is_empty() {
            "-".to_string()
        } else {
            list.filter.query.clone()
        };
        let header = Paragraph::new(vec![
            Line::from(counts),
            Line::from(vec![
                Span::styled("Filter: ", label_style()),
                Span::raw(department_filter_label(list.filter.department)),
                Span::styled("   Search: ", label_style()),
                Span::raw(query),
            ]),
        ])
        .block(Block::default().title("Winners").borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let title = list.title();
        let block = Block::default().title(title).borders(Borders::ALL);
        if list.filtered.is_empty() {
            let text = if list.winners.is_empty() {
                "No winners yet. Start a raffle draw to see winners here!"
            } else {
                "No results found. Try adjusting your search or filter."
            };
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center).block(block),
                chunks[1],
            );
            return;
        }

        let items: Vec<ListItem> = list
            .filtered
            .iter()
            .enumerate()
            .map(|(index, winner)| {
                ListItem::new(format!(
                    "{:>3}. {:<24} {:<24} {:<18} {}",
                    index + 1,
                    winner.name,
                    winner.department.label(),
                    winner.supervisor,
                    format_draw_date(&winner.draw_date)
                ))
            })
            .collect();
        let widget = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(list.selected));
        frame.render_stateful_widget(widget, chunks[1], &mut list_state);
    }

    fn draw_analytics(&self, frame: &mut Frame, area: Rect) {
        let overview = self.overview();
        let history = draws_by_date(&self.winners, HISTORY_DAYS);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(overview.departments.len() as u16 * 2 + 2),
                Constraint::Min(0),
            ])
            .split(area);

        let average = average_per_day(self.winners.len(), history.len());
        let top = top_department(&overview.departments)
            .filter(|stats| stats.winners > 0)
            .map(|stats| format!("{} ({} winners)", stats.department.label(), stats.winners))
            .unwrap_or_else(|| "-".to_string());
        let summary = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Win rate: ", label_style()),
                Span::raw(format!("{}% of total pool", overview.win_rate_percent)),
                Span::styled("   Active days: ", label_style()),
                Span::raw(history.len().to_string()),
                Span::styled("   Avg per day: ", label_style()),
                Span::raw(average.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Top department: ", label_style()),
                Span::raw(top),
            ]),
        ])
        .block(
            Block::default()
                .title("Analytics Dashboard")
                .borders(Borders::ALL),
        );
        frame.render_widget(summary, chunks[0]);

        let max_total = overview
            .departments
            .iter()
            .map(|stats| stats.total)
            .max()
            .unwrap_or(0);
        let mut department_lines = Vec::new();
        for stats in &overview.departments {
            department_lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", stats.department.short_label()), label_style()),
                Span::styled(bar(stats.total, max_total), Style::default().fg(Color::Blue)),
                Span::raw(format!(" {} contestants", stats.total)),
            ]));
            department_lines.push(Line::from(vec![
                Span::raw(format!("{:<14}", "")),
                Span::styled(bar(stats.winners, max_total), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {} winners ({}%)", stats.winners, stats.percentage)),
            ]));
        }
        frame.render_widget(
            Paragraph::new(department_lines).block(
                Block::default()
                    .title("Department Statistics")
                    .borders(Borders::ALL),
            ),
            chunks[1],
        );

        let max_day = history.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let history_lines: Vec<Line> = if history.is_empty() {
            vec![Line::from(Span::styled(
                "No draws yet.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            history
                .iter()
                .map(|(day, count)| {
                    Line::from(vec![
                        Span::styled(format!("{:<12}", day.format("%b %-d").to_string()), label_style()),
                        Span::styled(bar(*count, max_day), Style::default().fg(Color::Green)),
                        Span::raw(format!(" {count}")),
                    ])
                })
                .collect()
        };
        frame.render_widget(
            Paragraph::new(history_lines)
                .block(Block::default().title("Recent Draws").borders(Borders::ALL)),
            chunks[2],
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_clear(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Clear All Winners?")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Remove all {} winner records?",
                self.winners.len()
            )),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.screen, &self.mode) {
            (_, Mode::Searching(_)) => hint_line(&[("[Enter]", "Apply"), ("[Esc]", "Clear search")]),
            (_, Mode::ConfirmClear) => hint_line(&[("[Y]", "Confirm"), ("[N]", "Cancel")]),
            (Screen::Login(_), _) => hint_line(&[
                ("[Tab]", "Switch field"),
                ("[Enter]", "Log in"),
                ("[Esc]", "Quit"),
            ]),
            (Screen::Draw(_), _) => hint_line(&[
                ("[0-9]", "Count"),
                ("[Tab]", "Department"),
                ("[Enter]", "Draw"),
                ("[H/W/A]", "Navigate"),
                ("[Q]", "Quit"),
            ]),
            (Screen::Winners(_), _) => hint_line(&[
                ("[F]", "Search"),
                ("[Tab]", "Department"),
                ("[E]", "Export CSV"),
                ("[O]", "Open export"),
                ("[C]", "Clear all"),
                ("[H/R/A]", "Navigate"),
            ]),
            (Screen::Dashboard | Screen::Analytics, _) => hint_line(&[
                ("[R]", "Draw"),
                ("[W]", "Winners"),
                ("[A]", "Analytics"),
                ("[H]", "Dashboard"),
                ("[L]", "Log out"),
                ("[Q]", "Quit"),
            ]),
        }
    }
}

/// Footer line of `[key] action` pairs.
fn hint_line(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, action) in pairs {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(format!(" {action}   ")));
    }
    Line::from(spans)
}

fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Horizontal bar scaled so `max` fills the chart width.
fn bar(value: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (value * BAR_WIDTH).div_ceil(max);
    "#".repeat(width)
}
