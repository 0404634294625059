use std::io::{self, Stdout, Write};
use crossterm::{execute, queue};
use crossterm::event::{self, Event};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::warn;


/// What a line of output is for. Each role has a fixed color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Print,
    Program,
    Info,
    Input,
    Error,
}
impl Color {
    fn foreground(self) -> crossterm::style::Color {
        use crossterm::style::Color::*;

        match self {
            Color::Print => White,
            Color::Program => Cyan,
            Color::Info => Green,
            Color::Input => Yellow,
            Color::Error => Red,
        }
    }
}


/// Line output plus the few terminal operations shutdown needs.
pub trait Console {
    /// Writes `text` as a new line.
    fn log(&mut self, color: Color, text: &str);

    /// Overwrites the current line with `text`. The next `log` starts on a fresh line.
    fn replace(&mut self, color: Color, text: &str);

    fn is_fullscreen(&self) -> bool;

    /// Waits for a key through the full-screen surface.
    fn read_key(&mut self) -> io::Result<()>;

    /// Waits for a single key on a plain stream, without echo and without needing Enter.
    fn read_raw_key(&mut self) -> io::Result<()>;

    /// Tears down the rendering surface.
    fn end(&mut self);
}


/// Restores cooked mode when dropped.
struct RawMode;
impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}
impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {err}");
        }
    }
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(_) = event::read()? {
            return Ok(());
        }
    }
}


/// Console on stdout, either as a plain stream or on the alternate screen.
pub struct StdConsole {
    out: Stdout,
    fullscreen: bool,
    dangling: bool,
    ended: bool,
}
impl StdConsole {
    pub fn plain() -> Self {
        Self {
            out: io::stdout(),
            fullscreen: false,
            dangling: false,
            ended: false,
        }
    }

    pub fn fullscreen() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;

        Ok(Self {
            out,
            fullscreen: true,
            dangling: false,
            ended: false,
        })
    }

    fn newline(&self) -> &'static str {
        // Raw mode doesn't translate \n.
        if self.fullscreen { "\r\n" } else { "\n" }
    }

    fn write(&mut self, color: Color, text: &str, replace: bool) -> io::Result<()> {
        let newline = self.newline();
        let mut out = self.out.lock();

        if replace {
            queue!(out, Print('\r'), Clear(ClearType::CurrentLine))?;
        } else if self.dangling {
            queue!(out, Print(newline))?;
        }

        queue!(out, SetForegroundColor(color.foreground()))?;
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                queue!(out, Print(newline))?;
            }
            queue!(out, Print(line))?;
        }
        queue!(out, ResetColor)?;
        if !replace {
            queue!(out, Print(newline))?;
        }
        out.flush()?;

        self.dangling = replace;
        Ok(())
    }
}
impl Console for StdConsole {
    fn log(&mut self, color: Color, text: &str) {
        if let Err(err) = self.write(color, text, false) {
            warn!("Console write failed: {err}");
        }
    }

    fn replace(&mut self, color: Color, text: &str) {
        if let Err(err) = self.write(color, text, true) {
            warn!("Console write failed: {err}");
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn read_key(&mut self) -> io::Result<()> {
        wait_for_key()
    }

    fn read_raw_key(&mut self) -> io::Result<()> {
        let _raw = RawMode::enable()?;
        wait_for_key()
    }

    fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        if self.dangling {
            self.dangling = false;
            let newline = self.newline();
            if let Err(err) = execute!(self.out, Print(newline)) {
                warn!("Console write failed: {err}");
            }
        }
        if self.fullscreen {
            if let Err(err) = terminal::disable_raw_mode() {
                warn!("Failed to restore terminal mode: {err}");
            }
            if let Err(err) = execute!(self.out, LeaveAlternateScreen) {
                warn!("Failed to leave alternate screen: {err}");
            }
        }
    }
}
impl Drop for StdConsole {
    fn drop(&mut self) {
        self.end();
    }
}
