//! Full-screen browser: crossterm session, key mapping and effect execution
//!
//! The view model in `lz::status::view` decides what happens; this module
//! only translates terminal events into model events and carries out the
//! effects the model asks for.

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Stdout, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use anstream::{AutoStream, ColorChoice};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use lz::display::get_now;
use lz::git::{Repo, StatusSource};
use lz::shell_exec;
use lz::status::collect_snapshot;
use lz::status::view::{self, Effect, Event, Model, State};
use lz::styling::Theme;

/// Raw mode plus alternate screen for as long as the value lives.
struct TerminalSession {
    out: Stdout,
    /// Lines currently on screen, to redraw only what changed
    drawn: Vec<String>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide).inspect_err(|_| teardown_terminal())?;

        Ok(Self {
            out,
            drawn: Vec::new(),
        })
    }

    fn draw(&mut self, lines: &[String], height: usize) -> io::Result<()> {
        let lines = &lines[..lines.len().min(height)];

        for (row, line) in lines.iter().enumerate() {
            // Skip if content hasn't changed
            if self.drawn.get(row) == Some(line) {
                continue;
            }
            queue!(
                self.out,
                MoveTo(0, row as u16),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        if lines.len() < self.drawn.len() {
            queue!(
                self.out,
                MoveTo(0, lines.len() as u16),
                Clear(ClearType::FromCursorDown)
            )?;
        }

        self.drawn = lines.to_vec();
        self.out.flush()
    }

    /// Forget what is on screen so the next draw repaints every line.
    fn invalidate(&mut self) -> io::Result<()> {
        self.drawn.clear();
        execute!(self.out, Clear(ClearType::All))
    }

    /// Hand the terminal to `f` (an editor) and take it back afterwards.
    fn suspend<T>(&mut self, f: impl FnOnce() -> T) -> io::Result<T> {
        let result = {
            let _guard = TerminalSuspendGuard::new(&mut self.out)?;
            f()
        };
        self.invalidate()?;
        Ok(result)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show);
        teardown_terminal();
    }
}

struct TerminalSuspendGuard<'a> {
    out: &'a mut Stdout,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(out: &'a mut Stdout) -> io::Result<Self> {
        execute!(out, Show)?;
        disable_raw_mode()?;

        if let Err(err) = execute!(out, LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(out, EnterAlternateScreen, Hide);
            return Err(err);
        }
        Ok(Self { out })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.out, EnterAlternateScreen, Hide);
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

/// Map a key press to a model event. Esc backs out of the diff view and
/// quits from the list.
fn key_to_event(key: KeyEvent, in_detail: bool) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Quit),
            _ => None,
        };
    }

    let event = match key.code {
        KeyCode::Char('q') => Event::Quit,
        KeyCode::Esc if in_detail => Event::Back,
        KeyCode::Esc => Event::Quit,
        KeyCode::Up | KeyCode::Char('k') => Event::Up,
        KeyCode::Down | KeyCode::Char('j') => Event::Down,
        KeyCode::Home | KeyCode::Char('g') => Event::Top,
        KeyCode::End | KeyCode::Char('G') => Event::Bottom,
        KeyCode::PageUp => Event::PageUp,
        KeyCode::PageDown => Event::PageDown,
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Event::Select,
        KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => Event::Back,
        KeyCode::Char('e') => Event::Edit,
        _ => return None,
    };
    Some(event)
}

/// Block until the next terminal event the model cares about.
fn next_event(model: &Model) -> io::Result<Event> {
    let in_detail = matches!(model.state(), State::Detail(_));
    loop {
        match event::read()? {
            event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(event) = key_to_event(key, in_detail) {
                    return Ok(event);
                }
            }
            event::Event::Resize(width, height) => {
                return Ok(Event::Resize {
                    width: width as usize,
                    height: height as usize,
                });
            }
            _ => {}
        }
    }
}

fn resolve_editor_command() -> String {
    std::env::var("VISUAL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| std::env::var("EDITOR").ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_owned())
}

/// Build `<editor args...> <target>` running inside `dir`. `None` when the
/// editor command cannot be split into words.
fn editor_command(editor: &str, dir: &Path, target: &Path) -> Option<Command> {
    let words = shlex::split(editor)?;
    let (program, args) = words.split_first()?;

    let mut cmd = Command::new(program);
    cmd.args(args).arg(target).current_dir(dir);
    Some(cmd)
}

/// Stdin for the editor. Discovery may have drained a piped stdin, in which
/// case the editor reads from the controlling terminal instead.
fn editor_stdin(
    stdin_is_terminal: bool,
    open_tty: impl FnOnce() -> io::Result<File>,
) -> Option<Stdio> {
    if stdin_is_terminal {
        return None;
    }
    match open_tty() {
        Ok(tty) => Some(Stdio::from(tty)),
        Err(e) => {
            log::debug!("  ! cannot open the terminal for the editor: {e}");
            None
        }
    }
}

fn open_tty() -> io::Result<File> {
    OpenOptions::new().read(true).write(true).open("/dev/tty")
}

/// Run the editor attached to the terminal; true when it exits successfully.
fn open_editor(dir: &Path, target: &Path) -> bool {
    let editor = resolve_editor_command();
    let Some(mut cmd) = editor_command(&editor, dir, target) else {
        log::debug!("  ! cannot parse editor command {editor:?}");
        return false;
    };
    if let Some(stdin) = editor_stdin(io::stdin().is_terminal(), open_tty) {
        cmd.stdin(stdin);
    }

    let context = dir.file_name().map(|name| name.to_string_lossy());
    match shell_exec::run_attached(&mut cmd, context.as_deref()) {
        Ok(status) => status.success(),
        Err(e) => {
            log::debug!("  ! {editor} failed to start: {e}");
            false
        }
    }
}

fn theme_for_stdout() -> Theme {
    match AutoStream::choice(&io::stdout()) {
        ColorChoice::Never => Theme::plain(),
        _ => Theme::colored(),
    }
}

/// Browse `repos` until the user quits. Re-collects after every editor session.
pub fn run(repos: &[Repo], source: &impl StatusSource) -> anyhow::Result<()> {
    let theme = theme_for_stdout();
    let snapshot = collect_snapshot(repos, source, get_now());

    let mut session = TerminalSession::new()?;
    let (width, height) = terminal::size()?;
    let mut model = Model::new(snapshot, width as usize, height as usize);
    let mut height = height as usize;

    loop {
        session.draw(&view::render(&model, &theme), height)?;

        let event = next_event(&model)?;
        if let Event::Resize { height: h, .. } = event {
            height = h;
            session.invalidate()?;
        }

        // Effects chain: an editor session ends in a re-collection
        let mut effect = model.update(event);
        loop {
            effect = match effect {
                Effect::None => break,
                Effect::Quit => return Ok(()),
                Effect::LoadDiff {
                    entry,
                    file,
                    repo,
                    path,
                    code,
                } => {
                    let text = source.diff(&repo, &path, &code);
                    model.update(Event::DiffLoaded { entry, file, text })
                }
                Effect::OpenEditor { dir, target } => {
                    let success = session.suspend(|| open_editor(&dir, &target))?;
                    model.update(Event::EditorExited { success })
                }
                Effect::Recollect => {
                    let snapshot = collect_snapshot(repos, source, get_now());
                    model.update(Event::Refreshed(snapshot))
                }
            };
        }
    }
}
