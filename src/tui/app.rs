use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::{GlobalConfig, ThemeConfig};
use crate::model::{self, BoardSnapshot, Task, TaskStatus};
use crate::service::{self, ServiceError, TaskService};
use crate::store::MoveOutcome;

use super::board::BoardState;
use super::input::{InputMode, LineEditor};

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;
type LoadResult = std::result::Result<BoardSnapshot, ServiceError>;

/// How long the event loop waits for a key before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Card height: one title line plus borders
const CARD_HEIGHT: u16 = 3;

/// Placeholder cards per column while loading
const SKELETON_CARDS: usize = 3;

/// Helper to convert hex color string to ratatui Color
fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Build footer help text based on current UI state
fn build_footer_text(input_mode: InputMode, loading: bool) -> String {
    if loading {
        return " Loading board...  [q] quit ".to_string();
    }
    match input_mode {
        InputMode::Normal => {
            " [h/l] column  [j/k] task  [o] new  [r/<] move left  [m/>] move right  [q] quit ".to_string()
        }
        InputMode::InputTitle => " Enter task title... [Esc] cancel [Enter] add ".to_string(),
    }
}

/// Application state (separate from terminal for borrow checker)
pub(crate) struct AppState {
    should_quit: bool,
    board: BoardState,
    input_mode: InputMode,
    editor: LineEditor,
    config: GlobalConfig,
    load_error: Option<String>,
    // Animation frame counter for the loading skeleton
    tick: usize,
}

impl AppState {
    pub(crate) fn new(config: GlobalConfig) -> Self {
        Self {
            should_quit: false,
            board: BoardState::new(),
            input_mode: InputMode::Normal,
            editor: LineEditor::new(),
            config,
            load_error: None,
            tick: 0,
        }
    }

    fn is_loading(&self) -> bool {
        self.board.store.is_loading()
    }

    /// Take the joined result of the initial fetch
    fn apply_load_result(&mut self, result: LoadResult) {
        match result {
            Ok(snapshot) => {
                if self.board.store.finish_loading(snapshot) {
                    self.board.selected_column = 0;
                    self.board.selected_row = 0;
                    self.load_error = None;
                }
            }
            Err(err) => {
                error!(error = ?err, "failed to load board");
                self.load_error = Some(err.to_string());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Nothing to act on until the board has data
        if self.is_loading() {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::InputTitle => self.handle_title_input(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Left => self.board.select_left(),
            KeyCode::Char('l') | KeyCode::Right => self.board.select_right(),
            KeyCode::Char('j') | KeyCode::Down => self.board.select_down(),
            KeyCode::Char('k') | KeyCode::Up => self.board.select_up(),
            KeyCode::Char('o') => {
                self.editor.clear();
                self.input_mode = InputMode::InputTitle;
            }
            KeyCode::Char('m') | KeyCode::Char('>') => self.move_selected(model::Direction::Right),
            KeyCode::Char('r') | KeyCode::Char('<') => self.move_selected(model::Direction::Left),
            _ => {}
        }
    }

    fn move_selected(&mut self, direction: model::Direction) {
        if let Some(MoveOutcome::NotFound) = self.board.move_selected_task(direction) {
            warn!("selected task vanished before move");
        }
    }

    fn handle_title_input(&mut self, key: KeyEvent) {
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => {
                self.editor.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                // Blank titles keep the creator open, like a disabled submit button
                if self.board.create_task(self.editor.text()) {
                    self.editor.clear();
                    self.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Left if has_alt => self.editor.word_left(),
            KeyCode::Right if has_alt => self.editor.word_right(),
            // macOS: Option+Left/Right sends Alt+b / Alt+f
            KeyCode::Char('b') if has_alt => self.editor.word_left(),
            KeyCode::Char('f') if has_alt => self.editor.word_right(),
            KeyCode::Left => self.editor.left(),
            KeyCode::Right => self.editor.right(),
            KeyCode::Home => self.editor.home(),
            KeyCode::End => self.editor.end(),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Delete => self.editor.delete(),
            KeyCode::Char(c) => self.editor.insert(c),
            _ => {}
        }
    }
}

pub struct App {
    terminal: Terminal,
    state: AppState,
    service: Arc<dyn TaskService>,
    load_rx: Option<mpsc::Receiver<LoadResult>>,
}

impl App {
    pub fn new(config: GlobalConfig, service: Arc<dyn TaskService>) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state: AppState::new(config),
            service,
            load_rx: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.start_loading();

        while !self.state.should_quit {
            self.draw()?;
            self.poll_load_result();

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.state.handle_key(key);
                    }
                }
            }

            self.state.tick = self.state.tick.wrapping_add(1);
        }

        info!("quitting");
        Ok(())
    }

    /// Fetch tasks and columns in the background; the result arrives on `load_rx`
    fn start_loading(&mut self) {
        let (tx, rx) = mpsc::channel();
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service::load_snapshot(service.as_ref()).await;
            let _ = tx.send(result);
        });
        self.load_rx = Some(rx);
        info!("initial load started");
    }

    fn poll_load_result(&mut self) {
        let received = match &self.load_rx {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match received {
            Ok(result) => {
                self.state.apply_load_result(result);
                self.load_rx = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("board loader exited without a result");
                self.state.load_error = Some("loader stopped unexpectedly".to_string());
                self.load_rx = None;
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        self.terminal.draw(|frame| draw(state, frame))?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

fn draw(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, board, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let theme = &state.config.theme;

    // Header
    let header_text = if let Some(err) = &state.load_error {
        format!(" Task Board - failed to load: {} ", err)
    } else if state.is_loading() {
        " Task Board - loading... ".to_string()
    } else {
        format!(" Task Board - {} tasks ", state.board.store.tasks().len())
    };
    let header_color = if state.load_error.is_some() { Color::Red } else { Color::Cyan };
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(header_color).bold())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    if state.is_loading() {
        draw_skeleton(state, frame, chunks[1]);
    } else {
        draw_columns(state, frame, chunks[1]);
    }

    // Footer with help
    let footer_text = build_footer_text(state.input_mode, state.is_loading());
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(hex_to_color(&theme.color_dimmed)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    if state.input_mode == InputMode::InputTitle {
        draw_task_creator(state, frame, area);
    }
}

fn draw_columns(state: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &state.config.theme;
    let store = &state.board.store;
    let column_count = store.columns().len();

    if column_count == 0 {
        let empty = Paragraph::new(" No columns configured ")
            .style(Style::default().fg(hex_to_color(&theme.color_dimmed)))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, column_count as u32); column_count])
        .split(area);

    for (i, column) in store.columns().iter().enumerate() {
        let tasks = state.board.tasks_in_column(i);
        let is_selected_column = state.board.selected_column == i;

        let title = format!(" {} ({}) ", column.title, tasks.len());
        let (border_style, title_style) = if is_selected_column {
            (
                Style::default().fg(hex_to_color(&theme.color_selected)),
                Style::default().fg(hex_to_color(&theme.color_selected)),
            )
        } else {
            (
                Style::default().fg(hex_to_color(&theme.color_normal)),
                Style::default().fg(hex_to_color(&theme.color_column_header)),
            )
        };

        let column_block = Block::default()
            .title(title)
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner_area = column_block.inner(columns[i]);
        frame.render_widget(column_block, columns[i]);

        let max_visible_cards = (inner_area.height / CARD_HEIGHT) as usize;

        // Keep the selected card in view
        let scroll_offset = if is_selected_column && state.board.selected_row >= max_visible_cards {
            state.board.selected_row + 1 - max_visible_cards
        } else {
            0
        };

        for (j, task) in tasks.iter().skip(scroll_offset).take(max_visible_cards).enumerate() {
            let is_selected = is_selected_column && state.board.selected_row == scroll_offset + j;
            let card_area = Rect {
                x: inner_area.x,
                y: inner_area.y + (j as u16 * CARD_HEIGHT),
                width: inner_area.width,
                height: CARD_HEIGHT,
            };
            let can_left = store.can_move(task, model::Direction::Left);
            let can_right = store.can_move(task, model::Direction::Right);
            draw_task_card(frame, task, card_area, is_selected, (can_left, can_right), theme);
        }
    }
}

/// Card with `←` / `→` move arrows; an arrow is dimmed when that move is not allowed
fn draw_task_card(
    frame: &mut Frame,
    task: &Task,
    area: Rect,
    is_selected: bool,
    (can_left, can_right): (bool, bool),
    theme: &ThemeConfig,
) {
    let border_style = if is_selected {
        Style::default().fg(hex_to_color(&theme.color_selected))
    } else {
        Style::default().fg(hex_to_color(&theme.color_normal))
    };
    let title_style = if is_selected {
        Style::default().fg(hex_to_color(&theme.color_selected)).bold()
    } else {
        Style::default().fg(hex_to_color(&theme.color_text))
    };
    let border_type = if is_selected { BorderType::Thick } else { BorderType::Plain };

    let card_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .border_type(border_type);
    let inner = card_block.inner(area);
    frame.render_widget(card_block, area);

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let left = Paragraph::new("←").style(arrow_style(can_left, &theme.color_move_left, theme));
    frame.render_widget(left, parts[0]);

    let title = truncate_title(&task.title, parts[1].width as usize);
    frame.render_widget(Paragraph::new(title).style(title_style).centered(), parts[1]);

    let right = Paragraph::new("→")
        .style(arrow_style(can_right, &theme.color_move_right, theme))
        .right_aligned();
    frame.render_widget(right, parts[2]);
}

fn arrow_style(enabled: bool, color: &str, theme: &ThemeConfig) -> Style {
    if enabled {
        Style::default().fg(hex_to_color(color)).bold()
    } else {
        Style::default().fg(hex_to_color(&theme.color_dimmed)).dim()
    }
}

/// Placeholder columns with a shimmer that sweeps across each card
fn draw_skeleton(state: &AppState, frame: &mut Frame, area: Rect) {
    let dimmed = Style::default().fg(hex_to_color(&state.config.theme.color_dimmed));
    let column_count = TaskStatus::flow().len();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, column_count as u32); column_count])
        .split(area);

    for column_area in columns.iter() {
        let block = Block::default()
            .title(" ░░░░░░ ")
            .borders(Borders::ALL)
            .border_style(dimmed);
        let inner = block.inner(*column_area);
        frame.render_widget(block, *column_area);

        for row in 0..SKELETON_CARDS {
            let y = inner.y + row as u16 * CARD_HEIGHT;
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: CARD_HEIGHT,
            };
            let card = Block::default().borders(Borders::ALL).border_style(dimmed);
            let card_inner = card.inner(card_area);
            frame.render_widget(card, card_area);
            let bar = skeleton_bar(card_inner.width as usize, state.tick, row);
            frame.render_widget(Paragraph::new(bar).style(dimmed), card_inner);
        }
    }
}

/// One shimmer line: a bright band moving left to right, offset per row
fn skeleton_bar(width: usize, tick: usize, row: usize) -> String {
    const BAND: usize = 4;
    if width == 0 {
        return String::new();
    }
    let start = (tick + row * 3) % (width + BAND);
    (0..width)
        .map(|x| if x + BAND > start && x <= start { '▓' } else { '░' })
        .collect()
}

fn draw_task_creator(state: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &state.config.theme;
    let input_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, input_area);

    let (before_cursor, after_cursor) = state.editor.split_at_cursor();
    let text = format!("Title: {}█{}", before_cursor, after_cursor);

    // Dim the border while there is nothing to submit
    let border_color = if state.editor.is_blank() {
        &theme.color_dimmed
    } else {
        &theme.color_selected
    };

    let input = Paragraph::new(text)
        .style(Style::default().fg(hex_to_color(&theme.color_text)))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" New Task ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_to_color(border_color))),
        );
    frame.render_widget(input, input_area);
}

/// Truncate to `max_len` chars, marking the cut with "..." (char-safe for UTF-8)
fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

/// Helper function to create a centered rect
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
#[path = "app_tests.rs"]
mod tests;
