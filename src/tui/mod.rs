//! Terminal user interface.
//!
//! Two views switched with Tab: the chat (scrolling message list pinned to
//! the newest entry, input gated while a cycle is in flight) and the admin
//! panel (configuration presence plus static ingestion instructions). This
//! layer renders session snapshots and forwards submissions; no business
//! logic lives here.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::task::JoinHandle;
use tui_textarea::{Input, TextArea};

use crate::config::EnvStatus;
use crate::rag::pipeline::RagPipeline;
use crate::types::{Message, MessageRole, Result};

const INPUT_PLACEHOLDER: &str = "Ask about 3rd grade math, science...";

/// Which view is active.
#[derive(Clone, Copy, PartialEq)]
enum View {
    Chat,
    Admin,
}

/// Application state
pub struct App<'a> {
    pipeline: Arc<RagPipeline>,
    env_status: EnvStatus,
    input: TextArea<'a>,
    view: View,
    /// Lines scrolled up from the newest message; 0 means pinned to bottom.
    scroll_up: u16,
    in_flight: Option<JoinHandle<()>>,
    should_quit: bool,
    status: String,
}

impl App<'_> {
    pub fn new(pipeline: Arc<RagPipeline>, env_status: EnvStatus) -> Self {
        Self {
            pipeline,
            env_status,
            input: fresh_input(),
            view: View::Chat,
            scroll_up: 0,
            in_flight: None,
            should_quit: false,
            status: "Ready".to_string(),
        }
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        disable_raw_mode().ok();
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .ok();
        terminal.show_cursor().ok();

        result
    }

    async fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            self.poll_in_flight();

            terminal.draw(|f| self.ui(f))?;

            if event::poll(Duration::from_millis(100))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// A cycle is in flight: either the spawned task is still running or the
    /// session gate is still claimed.
    fn busy(&self) -> bool {
        self.in_flight.is_some() || self.pipeline.session().is_busy()
    }

    fn poll_in_flight(&mut self) {
        if let Some(handle) = &self.in_flight {
            if handle.is_finished() {
                self.in_flight = None;
                self.status = "Ready".to_string();
                // pin to the newest message
                self.scroll_up = 0;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let key = match event {
            Event::Key(key) => key,
            Event::Mouse(mouse) => {
                match mouse.kind {
                    event::MouseEventKind::ScrollUp => {
                        self.scroll_up = self.scroll_up.saturating_add(3);
                    }
                    event::MouseEventKind::ScrollDown => {
                        self.scroll_up = self.scroll_up.saturating_sub(3);
                    }
                    _ => {}
                }
                return;
            }
            _ => return,
        };

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            self.view = match self.view {
                View::Chat => View::Admin,
                View::Admin => View::Chat,
            };
            return;
        }

        if self.view != View::Chat {
            return;
        }

        match key.code {
            KeyCode::Up => self.scroll_up = self.scroll_up.saturating_add(1),
            KeyCode::Down => self.scroll_up = self.scroll_up.saturating_sub(1),
            KeyCode::PageUp => self.scroll_up = self.scroll_up.saturating_add(10),
            KeyCode::PageDown => self.scroll_up = self.scroll_up.saturating_sub(10),
            KeyCode::Home => self.scroll_up = u16::MAX,
            KeyCode::End => self.scroll_up = 0,
            KeyCode::Enter if key.modifiers.is_empty() => self.submit_input(),
            // the input control is disabled while a cycle is in flight
            _ if self.busy() => {}
            _ => {
                self.input.input(Input::from(key));
            }
        }
    }

    fn submit_input(&mut self) {
        if self.busy() {
            return;
        }

        let content = self.input.lines().join("\n");
        let question = content.trim().to_string();
        if question.is_empty() {
            return;
        }

        self.input = fresh_input();
        self.pipeline.session().append(Message::user(question.clone()));
        self.scroll_up = 0;
        self.status = "Thinking...".to_string();

        let pipeline = Arc::clone(&self.pipeline);
        self.in_flight = Some(tokio::spawn(async move {
            pipeline.answer(&question).await;
        }));
    }

    fn ui(&self, f: &mut Frame) {
        match self.view {
            View::Chat => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints([
                        Constraint::Min(3),    // Messages
                        Constraint::Length(3), // Input
                        Constraint::Length(1), // Status
                    ])
                    .split(f.area());

                self.render_messages(f, chunks[0]);
                self.render_input(f, chunks[1]);
                self.render_status(f, chunks[2]);
            }
            View::Admin => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints([Constraint::Min(3), Constraint::Length(1)])
                    .split(f.area());

                self.render_admin(f, chunks[0]);
                self.render_status(f, chunks[1]);
            }
        }
    }

    fn render_messages(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" NC 3rd Grade Curriculum Assistant ");
        let inner = block.inner(area);
        let width = inner.width.max(1) as usize;

        let mut lines: Vec<Line> = Vec::new();
        for msg in self.pipeline.session().messages() {
            let (prefix, style) = match msg.role {
                MessageRole::User => (
                    "You: ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                MessageRole::Assistant => (
                    "Assistant: ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            };

            lines.push(Line::from(Span::styled(prefix, style)));
            for content_line in msg.content.lines() {
                for chunk in wrap_chars(content_line, width.saturating_sub(2)) {
                    lines.push(Line::from(Span::raw(format!("  {chunk}"))));
                }
            }
            lines.push(Line::from(""));
        }

        if self.busy() {
            lines.push(Line::from(Span::styled(
                "Assistant is typing...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        // Pin to the bottom unless the user scrolled up.
        let total = lines.len() as u16;
        let max_offset = total.saturating_sub(inner.height);
        let offset = max_offset.saturating_sub(self.scroll_up.min(max_offset));

        let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
        f.render_widget(paragraph, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let (title, border_style) = if self.busy() {
            (
                " Input (processing...) ",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                " Input (Enter to send, Tab for admin) ",
                Style::default().fg(Color::Cyan),
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(&self.input, inner);
    }

    fn render_admin(&self, f: &mut Frame, area: Rect) {
        let section = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::DarkGray);

        let lines = vec![
            Line::from(Span::styled("Environment Status", section)),
            flag_line("Supabase URL", self.env_status.supabase_url),
            flag_line("Supabase Key", self.env_status.supabase_key),
            flag_line("Gemini API Key", self.env_status.gemini_key),
            Line::from(""),
            Line::from(Span::styled("Ingestion Instructions", section)),
            Line::from(Span::styled(
                "  The chat reads from the Supabase 'school' table. To import a PDF",
                muted,
            )),
            Line::from(Span::styled(
                "  with Gemini embeddings, run the offline ingestion tool locally:",
                muted,
            )),
            Line::from("    1. Install dependencies: pip install -r requirements.txt"),
            Line::from("    2. Place your PDF next to the script."),
            Line::from("    3. Run: python ingest.py \"your_file.pdf\""),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Administration (Tab for chat) "),
        );
        f.render_widget(paragraph, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let status_style = if self.busy() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let muted = Style::default().fg(Color::DarkGray);

        let status = Paragraph::new(Line::from(vec![
            Span::styled("Model: ", muted),
            Span::styled(
                self.pipeline.model_name().to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" | "),
            Span::styled(self.status.clone(), status_style),
            Span::raw(" | "),
            Span::styled("Tab: switch view", muted),
            Span::raw(" | "),
            Span::styled("Ctrl+C: quit", muted),
        ]));

        f.render_widget(status, area);
    }
}

fn fresh_input<'a>() -> TextArea<'a> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(Style::default());
    input.set_placeholder_text(INPUT_PLACEHOLDER);
    input
}

fn flag_line(name: &str, present: bool) -> Line<'static> {
    if present {
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(Color::Green)),
            Span::raw(name.to_string()),
        ])
    } else {
        Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(Color::Red)),
            Span::raw(name.to_string()),
            Span::styled(" (missing)", Style::default().fg(Color::Yellow)),
        ])
    }
}

fn wrap_chars(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

/// Run the TUI with the given pipeline
pub async fn run_tui(pipeline: Arc<RagPipeline>, env_status: EnvStatus) -> Result<()> {
    let mut app = App::new(pipeline, env_status);
    app.run().await
}

/// Simple non-TUI interactive mode (fallback)
pub async fn run_simple(pipeline: Arc<RagPipeline>) -> Result<()> {
    use std::io::{BufRead, Write};

    println!("SCOS Assist - NC 3rd Grade Curriculum Assistant");
    println!("Type 'quit' or 'exit' to leave.");
    println!("---");
    for message in pipeline.session().messages() {
        println!("{}\n", message.content);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        pipeline.session().append(Message::user(line));
        if let Some(message) = pipeline.answer(line).await {
            println!("\n{}\n", message.content);
        }
    }

    Ok(())
}
