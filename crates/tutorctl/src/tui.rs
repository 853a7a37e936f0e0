//! TUI (Terminal User Interface) tutor
//!
//! Full-screen front-end for the tutoring session using ratatui.
//!
//! Layout, top to bottom:
//! - Title bar
//! - Concept selector (left) and example panel (right)
//! - Question panel with hint, answer input and feedback
//! - Status bar with key bindings

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info};
use tutor_common::{query, Feedback, SessionError, Store, TutorSession};

pub const TITLE: &str = "Physics Intelligent Tutoring System";
pub const NO_CONCEPTS: &str = "No concepts available";

/// TUI application state
pub struct TuiApp<'s> {
    session: TutorSession<'s>,
    /// Selector entries, from `list_individuals(concept_class)`
    concepts: Vec<String>,
    selected: usize,
    /// Answer input buffer
    input: String,
    /// Cursor position in chars
    cursor_pos: usize,
    feedback: Option<Feedback>,
    should_quit: bool,
}

impl<'s> TuiApp<'s> {
    /// Create the app and select the first concept, if any
    pub fn new(store: &'s Store, concept_class: &str) -> Self {
        let concepts = query::list_individuals(store, concept_class);
        info!(class = concept_class, count = concepts.len(), "TUI concepts loaded");

        let mut app = Self {
            session: TutorSession::new(store),
            concepts,
            selected: 0,
            input: String::new(),
            cursor_pos: 0,
            feedback: None,
            should_quit: false,
        };
        app.select_current();
        app
    }

    pub fn concepts(&self) -> &[String] {
        &self.concepts
    }

    pub fn selected_concept(&self) -> Option<&str> {
        self.concepts.get(self.selected).map(String::as_str)
    }

    pub fn session(&self) -> &TutorSession<'s> {
        &self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn select_current(&mut self) {
        if let Some(concept) = self.concepts.get(self.selected).cloned() {
            self.session.select(&concept);
            self.feedback = None;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.concepts.is_empty() {
            return;
        }
        let last = self.concepts.len() - 1;
        let next = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected + delta as usize).min(last)
        };
        if next != self.selected {
            self.selected = next;
            self.select_current();
        }
    }

    /// Submit the input; a new attempt after feedback re-arms the question
    fn submit(&mut self) {
        if self.session.was_correct().is_some() {
            if let Err(e) = self.session.retry() {
                debug!(error = %e, "retry skipped");
            }
        }

        self.feedback = Some(match self.session.submit(&self.input) {
            Ok(feedback) => feedback,
            Err(SessionError::NoConceptSelected) | Err(SessionError::AlreadySubmitted) => {
                Feedback::NoQuestion
            }
        });
        debug!(feedback = ?self.feedback, "TUI submission");
    }

    fn byte_pos(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn input_chars(&self) -> usize {
        self.input.chars().count()
    }

    /// Cursor column inside an answer field `field_width` cells wide
    /// (borders included), in display cells and clamped to the field
    pub fn cursor_column(&self, field_width: u16) -> u16 {
        let before = &self.input[..self.byte_pos(self.cursor_pos)];
        let width = u16::try_from(Line::from(before).width()).unwrap_or(u16::MAX);
        let last = field_width.saturating_sub(2).saturating_sub(1);
        width.min(last)
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match (key, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL)
            | (KeyCode::Esc, _) => {
                self.should_quit = true;
            }

            (KeyCode::Enter, _) => self.submit(),

            (KeyCode::Up, _) => self.move_selection(-1),
            (KeyCode::Down, _) => self.move_selection(1),
            (KeyCode::PageUp, _) => self.move_selection(-5),
            (KeyCode::PageDown, _) => self.move_selection(5),

            (KeyCode::Backspace, _) => {
                if self.cursor_pos > 0 {
                    let at = self.byte_pos(self.cursor_pos - 1);
                    self.input.remove(at);
                    self.cursor_pos -= 1;
                }
            }

            (KeyCode::Delete, _) => {
                if self.cursor_pos < self.input_chars() {
                    let at = self.byte_pos(self.cursor_pos);
                    self.input.remove(at);
                }
            }

            (KeyCode::Left, _) => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
            }

            (KeyCode::Right, _) => {
                if self.cursor_pos < self.input_chars() {
                    self.cursor_pos += 1;
                }
            }

            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor_pos = 0;
            }

            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor_pos = self.input_chars();
            }

            // Clear the answer
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.input.clear();
                self.cursor_pos = 0;
            }

            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                let at = self.byte_pos(self.cursor_pos);
                self.input.insert(at, c);
                self.cursor_pos += 1;
            }

            _ => {}
        }
    }

    pub fn example_text(&self) -> String {
        self.session.examples().join("\n")
    }

    pub fn question_line(&self) -> String {
        if self.session.question().is_some() {
            format!("Question: {}", self.session.question_text())
        } else {
            self.session.question_text()
        }
    }

    pub fn hint_line(&self) -> String {
        match self.session.hint() {
            Some(hint) => format!("Hint: {}", hint),
            None => "Hint: N/A".to_string(),
        }
    }

    pub fn feedback_line(&self) -> String {
        match &self.feedback {
            Some(feedback) => format!("Feedback: {}", feedback.message()),
            None => "Feedback: N/A".to_string(),
        }
    }
}

/// Run the TUI until the user quits
pub fn run(store: &Store, concept_class: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(store, concept_class);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main app loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp<'_>) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Draw the UI
fn ui(f: &mut Frame, app: &TuiApp<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Min(6),     // Concepts + examples
            Constraint::Length(11), // Question panel
            Constraint::Length(1),  // Status bar
        ])
        .split(f.size());

    render_title(f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[1]);

    render_concepts(f, app, columns[0]);
    render_examples(f, app, columns[1]);
    render_question(f, app, rows[2]);
    render_status(f, rows[3]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, area);
}

fn render_concepts(f: &mut Frame, app: &TuiApp<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Select a Physics Concept");

    if app.concepts.is_empty() {
        let empty = Paragraph::new(NO_CONCEPTS)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .concepts
        .iter()
        .map(|c| ListItem::new(c.as_str()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_examples(f: &mut Frame, app: &TuiApp<'_>, area: Rect) {
    let examples = Paragraph::new(app.example_text())
        .block(Block::default().borders(Borders::ALL).title("Example"))
        .wrap(Wrap { trim: false });
    f.render_widget(examples, area);
}

fn render_question(f: &mut Frame, app: &TuiApp<'_>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Question");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Question
            Constraint::Length(2), // Hint
            Constraint::Length(3), // Answer input
            Constraint::Min(1),    // Feedback
        ])
        .split(inner);

    let question = Paragraph::new(app.question_line()).wrap(Wrap { trim: true });
    f.render_widget(question, parts[0]);

    let hint = Paragraph::new(app.hint_line())
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: true });
    f.render_widget(hint, parts[1]);

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Answer (Enter to submit)"),
    );
    f.render_widget(input, parts[2]);
    f.set_cursor(
        parts[2].x.saturating_add(1).saturating_add(app.cursor_column(parts[2].width)),
        parts[2].y.saturating_add(1),
    );

    let color = match &app.feedback {
        Some(Feedback::Correct) => Color::Green,
        Some(_) => Color::Red,
        None => Color::DarkGray,
    };
    let feedback = Paragraph::new(Line::from(app.feedback_line()))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });
    f.render_widget(feedback, parts[3]);
}

fn render_status(f: &mut Frame, area: Rect) {
    let status = Paragraph::new("Up/Down=Concept | Enter=Submit | Ctrl+U=Clear | Esc/Ctrl+C=Quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, area);
}
