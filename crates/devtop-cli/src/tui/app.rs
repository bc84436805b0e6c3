//! Terminal side of the dashboard.
//!
//! Frames are painted into the alternate screen with ratatui. Every frame is
//! a full redraw: the screen is cleared and repainted from the top-left, so
//! anything written to stderr in between (e.g. log lines) is wiped.

use std::io::{self, Stdout};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use devtop_core::{Frame as DashFrame, FrameSink};

pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSink {
    /// Switch to the alternate screen, clear it and hide the cursor.
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    pub fn leave(mut self) -> io::Result<()> {
        let _ = std::panic::take_hook(); // remove our hook
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )
    }
}

impl FrameSink for TerminalSink {
    fn width(&mut self) -> io::Result<u16> {
        terminal::size().map(|(cols, _)| cols)
    }

    fn present(&mut self, frame: &DashFrame) -> io::Result<()> {
        self.terminal.clear()?;
        self.terminal.draw(|f| super::ui::draw(f, frame))?;
        Ok(())
    }
}
