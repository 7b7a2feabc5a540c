use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::clipboard::{ArboardClipboard, ClipboardWriter, Ownership};
use crate::error::HookError;
use crate::form::{FormState, HookApi};
use crate::hooks::{HookRequest, HookResponse};
use crate::tui::{TextInput, Theme};
use crate::utils::{pluralize, strip_controls_and_escapes};

const FLASH_SECS: f64 = 1.5;
const TOPIC_PLACEHOLDER: &str = "Enter your topic or idea...";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Focus {
    Topic,
    Platform,
    Tone,
    Hooks,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Topic => Focus::Platform,
            Focus::Platform => Focus::Tone,
            Focus::Tone => Focus::Hooks,
            Focus::Hooks => Focus::Topic,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Topic => Focus::Hooks,
            Focus::Platform => Focus::Topic,
            Focus::Tone => Focus::Platform,
            Focus::Hooks => Focus::Tone,
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
enum Action {
    Continue,
    Generate,
    Exit,
}

struct Status {
    message: String,
    is_error: bool,
    at: Instant,
}

struct FormScreen {
    form: FormState,
    topic: TextInput,
    focus: Focus,
    selected: usize,
    status: Option<Status>,
    clipboard: Option<Box<dyn ClipboardWriter>>,
}

impl FormScreen {
    fn new() -> Self {
        Self {
            form: FormState::new(),
            topic: TextInput::new(),
            focus: Focus::Topic,
            selected: 0,
            status: None,
            clipboard: None,
        }
    }

    fn flash(&mut self, message: impl Into<String>, is_error: bool) {
        self.status = Some(Status {
            message: message.into(),
            is_error,
            at: Instant::now(),
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
            return Action::Exit;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Action::Continue;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return Action::Continue;
            }
            KeyCode::Enter if self.focus == Focus::Hooks => {
                self.copy_selected();
                return Action::Continue;
            }
            KeyCode::Enter => {
                return if self.form.is_loading() {
                    Action::Continue
                } else {
                    Action::Generate
                };
            }
            _ => {}
        }

        match self.focus {
            Focus::Topic => match key.code {
                KeyCode::Char(c) if !ctrl => self.topic.insert_char(c),
                KeyCode::Backspace => self.topic.backspace(),
                KeyCode::Delete => self.topic.delete(),
                KeyCode::Left => self.topic.move_left(),
                KeyCode::Right => self.topic.move_right(),
                KeyCode::Home => self.topic.move_home(),
                KeyCode::End => self.topic.move_end(),
                _ => {}
            },
            Focus::Platform => match key.code {
                KeyCode::Left | KeyCode::Up => self.form.platform = self.form.platform.prev(),
                KeyCode::Right | KeyCode::Down => self.form.platform = self.form.platform.next(),
                _ => {}
            },
            Focus::Tone => match key.code {
                KeyCode::Left | KeyCode::Up => self.form.tone = self.form.tone.prev(),
                KeyCode::Right | KeyCode::Down => self.form.tone = self.form.tone.next(),
                _ => {}
            },
            Focus::Hooks => match key.code {
                KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                KeyCode::Down => {
                    if self.selected + 1 < self.form.hooks().len() {
                        self.selected += 1;
                    }
                }
                KeyCode::Char('c') => self.copy_selected(),
                KeyCode::Char('a') => self.copy_all(),
                _ => {}
            },
        }
        Action::Continue
    }

    /// Validates and enters loading. `None` means nothing should be sent.
    fn start(&mut self) -> Option<HookRequest> {
        self.form.topic = self.topic.value().to_string();
        match self.form.begin() {
            Ok(request) => Some(request),
            Err(err) => {
                self.flash(err.display_message(), true);
                None
            }
        }
    }

    fn settle(&mut self, outcome: Result<HookResponse, HookError>) {
        match self.form.finish(outcome) {
            Ok(count) => {
                self.selected = 0;
                self.flash(
                    format!("Hooks generated! {} ready to copy.", pluralize("hook", count)),
                    false,
                );
            }
            Err(err) => self.flash(
                format!("Error generating hooks: {}", err.display_message()),
                true,
            ),
        }
    }

    fn copy_selected(&mut self) {
        let index = self.selected;
        let result = self.with_clipboard(|form, clipboard| form.copy_hook(index, clipboard));
        match result {
            Ok(true) => self.flash("Copied to clipboard!", false),
            Ok(false) => {}
            Err(err) => self.flash(err.display_message(), true),
        }
    }

    fn copy_all(&mut self) {
        let result = self.with_clipboard(|form, clipboard| form.copy_all(clipboard));
        match result {
            Ok(true) => self.flash("All hooks copied!", false),
            Ok(false) => {}
            Err(err) => self.flash(err.display_message(), true),
        }
    }

    fn with_clipboard(
        &mut self,
        copy: impl FnOnce(&FormState, &mut dyn ClipboardWriter) -> Result<bool, HookError>,
    ) -> Result<bool, HookError> {
        if self.form.hooks().is_empty() {
            return Ok(false);
        }
        if self.clipboard.is_none() {
            self.clipboard = Some(Box::new(ArboardClipboard::new(Ownership::Session)?));
        }
        match self.clipboard.as_deref_mut() {
            Some(clipboard) => copy(&self.form, clipboard),
            None => Ok(false),
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area();

        let error_height = if self.form.error().is_some() { 3 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(error_height),
                Constraint::Min(5),
                Constraint::Length(4),
            ])
            .split(area);

        let topic_line = if self.topic.value().is_empty() {
            Line::styled(TOPIC_PLACEHOLDER, Theme::muted())
        } else {
            Line::from(self.topic.value().to_string())
        };
        frame.render_widget(
            Paragraph::new(topic_line).block(Theme::panel("Topic", self.focus == Focus::Topic)),
            rows[0],
        );

        let selectors = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(40),
                Constraint::Percentage(25),
            ])
            .split(rows[1]);

        let platform = self.form.platform;
        frame.render_widget(
            Paragraph::new(format!("‹ {} {} ›", platform.icon(), platform.label()))
                .block(Theme::panel("Platform", self.focus == Focus::Platform)),
            selectors[0],
        );
        let tone = self.form.tone;
        frame.render_widget(
            Paragraph::new(format!("‹ {} {} Tone ›", tone.icon(), tone.label()))
                .block(Theme::panel("Tone", self.focus == Focus::Tone)),
            selectors[1],
        );
        let button = if self.form.is_loading() {
            Line::styled("Loading...", Theme::muted())
        } else {
            Line::styled("Generate Hooks ⚡", Theme::label())
        };
        frame.render_widget(
            Paragraph::new(button).block(Theme::panel("Enter", false)),
            selectors[2],
        );

        if let Some(error) = self.form.error() {
            frame.render_widget(
                Paragraph::new(Line::styled(error.to_string(), Theme::danger()))
                    .block(Theme::panel("Error", false))
                    .wrap(Wrap { trim: true }),
                rows[2],
            );
        }

        let hooks_focused = self.focus == Focus::Hooks;
        let hook_lines: Vec<Line<'static>> = if self.form.hooks().is_empty() {
            vec![Line::styled(
                "No hooks yet. Press Enter to generate.",
                Theme::muted(),
            )]
        } else {
            self.form
                .hooks()
                .iter()
                .enumerate()
                .map(|(index, hook)| {
                    Line::styled(
                        format!("{}. {}", index + 1, strip_controls_and_escapes(hook)),
                        Theme::hook(hooks_focused && index == self.selected),
                    )
                })
                .collect()
        };
        frame.render_widget(
            Paragraph::new(hook_lines)
                .block(Theme::panel("Your viral-ready hooks 👇", hooks_focused))
                .wrap(Wrap { trim: false }),
            rows[3],
        );

        let mut help_lines = vec![Theme::key_hints(&[
            ("Tab", "focus"),
            ("←/→", "platform/tone"),
            ("Enter", "generate / copy"),
            ("a", "copy all"),
            ("Esc", "exit"),
        ])];
        if let Some(status) = &self.status
            && status.at.elapsed().as_secs_f64() < FLASH_SECS
        {
            let style = if status.is_error {
                Theme::danger()
            } else {
                Theme::success()
            };
            help_lines.push(Line::from(vec![Span::styled(status.message.clone(), style)]));
        }
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(Theme::panel("Help", false))
                .wrap(Wrap { trim: true }),
            rows[4],
        );

        if self.focus == Focus::Topic {
            let inner_width = rows[0].width.saturating_sub(2);
            let cursor_x = rows[0].x + 1 + (self.topic.cursor() as u16).min(inner_width);
            frame.set_cursor_position((cursor_x, rows[0].y + 1));
        }
    }
}

pub async fn run(api: &dyn HookApi) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let form_result = form_loop(&mut terminal, api).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    form_result
}

async fn form_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    api: &dyn HookApi,
) -> Result<()> {
    let mut screen = FormScreen::new();
    loop {
        terminal.draw(|frame| screen.draw(frame))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match screen.handle_key(key) {
            Action::Exit => break,
            Action::Continue => {}
            Action::Generate => {
                let Some(request) = screen.start() else {
                    continue;
                };
                terminal.draw(|frame| screen.draw(frame))?;
                let outcome = api.generate(&request).await;
                screen.settle(outcome);
                // keys pressed while loading are dropped
                while event::poll(Duration::ZERO)? {
                    event::read()?;
                }
            }
        }
    }
    Ok(())
}
