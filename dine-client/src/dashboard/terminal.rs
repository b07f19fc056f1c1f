//! Terminal front end
//!
//! Full-screen dashboard drawn with ratatui on crossterm, with a tui-input
//! command line. Keys are read on a blocking thread; finished lines go into
//! the shell's command channel like any other operator input.

use super::context::DashboardContext;
use super::render::render_dashboard;
use super::shell::DashboardView;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

const MAX_NOTES: usize = 200;
const NOTES_HEIGHT: u16 = 8;
const KEY_POLL: Duration = Duration::from_millis(100);

/// What a key press amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter on a non-blank line
    Submit(String),
    /// Ctrl-C
    Quit,
    Edited,
    Ignored,
}

/// Screen state: last dashboard frame, message log and command line
pub struct TerminalScreen<B: Backend> {
    terminal: Terminal<B>,
    frame: String,
    notes: VecDeque<String>,
    input: Input,
}

pub type SharedScreen<B> = Arc<Mutex<TerminalScreen<B>>>;

impl TerminalScreen<CrosstermBackend<Stdout>> {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Self::new(Terminal::new(CrosstermBackend::new(stdout))?))
    }

    /// Give the terminal back to the shell
    pub fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl<B: Backend> TerminalScreen<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        let mut screen = Self {
            terminal,
            frame: String::new(),
            notes: VecDeque::new(),
            input: Input::default(),
        };
        screen.push_note("Type 'help' for commands, Ctrl-C to quit");
        screen
    }

    pub fn set_frame(&mut self, frame: String) {
        self.frame = frame;
    }

    pub fn push_note(&mut self, message: &str) {
        self.notes.extend(message.lines().map(str::to_string));
        while self.notes.len() > MAX_NOTES {
            self.notes.pop_front();
        }
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return KeyOutcome::Ignored;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyOutcome::Quit,
            KeyCode::Enter => {
                let line = self.input.value().trim().to_string();
                self.input.reset();
                if line.is_empty() {
                    return KeyOutcome::Edited;
                }
                self.push_note(&format!("> {}", line));
                KeyOutcome::Submit(line)
            }
            KeyCode::Esc => {
                self.input.reset();
                KeyOutcome::Edited
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                KeyOutcome::Edited
            }
        }
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let Self {
            terminal,
            frame,
            notes,
            input,
        } = self;
        terminal.draw(|f| ui(f, frame, notes, input))?;
        Ok(())
    }
}

fn ui(f: &mut Frame, frame: &str, notes: &VecDeque<String>, input: &Input) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),               // Dashboard
            Constraint::Length(NOTES_HEIGHT), // Messages
            Constraint::Length(3),            // Command line
        ])
        .split(f.area());

    let dashboard = Paragraph::new(frame).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" AutoDine "),
    );
    f.render_widget(dashboard, chunks[0]);

    let visible = chunks[1].height.saturating_sub(2) as usize;
    let lines: Vec<Line> = notes
        .iter()
        .skip(notes.len().saturating_sub(visible))
        .map(|note| Line::from(note.as_str()))
        .collect();
    let messages = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" Messages "));
    f.render_widget(messages, chunks[1]);

    let width = chunks[2].width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let command = Paragraph::new(input.value())
        .style(Style::default().fg(Color::Yellow))
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(" Command "));
    f.render_widget(command, chunks[2]);

    f.set_cursor_position((
        chunks[2].x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
        chunks[2].y + 1,
    ));
}

/// [`DashboardView`] drawing into a shared [`TerminalScreen`]
pub struct TerminalView<B: Backend> {
    screen: SharedScreen<B>,
}

impl<B: Backend> TerminalView<B> {
    pub fn new(screen: SharedScreen<B>) -> Self {
        Self { screen }
    }

    fn update(&self, change: impl FnOnce(&mut TerminalScreen<B>)) {
        let Ok(mut screen) = self.screen.lock() else {
            tracing::error!("Terminal screen lock poisoned");
            return;
        };
        change(&mut screen);
        if let Err(e) = screen.draw() {
            tracing::warn!(error = %e, "Failed to draw dashboard");
        }
    }
}

impl<B: Backend + Send> DashboardView for TerminalView<B> {
    fn refresh(&mut self, ctx: &DashboardContext) {
        self.update(|screen| screen.set_frame(render_dashboard(ctx, Local::now())));
    }

    fn notify(&mut self, message: &str) {
        self.update(|screen| screen.push_note(message));
    }
}

/// Blocking key loop; run it on `spawn_blocking`
///
/// Ctrl-C cancels `shutdown`. Returns when `shutdown` is cancelled or the
/// command channel closes.
pub fn read_keys<B: Backend>(
    screen: SharedScreen<B>,
    commands: mpsc::Sender<String>,
    shutdown: CancellationToken,
) -> io::Result<()> {
    while !shutdown.is_cancelled() {
        if !event::poll(KEY_POLL)? {
            continue;
        }
        let event = event::read()?;

        // lock released before sending so the shell can redraw meanwhile
        let outcome = {
            let mut screen = screen
                .lock()
                .map_err(|_| io::Error::other("terminal screen lock poisoned"))?;
            let outcome = match event {
                Event::Key(key) => screen.handle_key(key),
                Event::Resize(..) => KeyOutcome::Edited,
                _ => KeyOutcome::Ignored,
            };
            if outcome != KeyOutcome::Ignored {
                screen.draw()?;
            }
            outcome
        };

        match outcome {
            KeyOutcome::Quit => {
                tracing::info!("Ctrl-C pressed, shutting down");
                shutdown.cancel();
            }
            KeyOutcome::Submit(line) => {
                if commands.blocking_send(line).is_err() {
                    break;
                }
            }
            KeyOutcome::Edited | KeyOutcome::Ignored => {}
        }
    }
    Ok(())
}
