//! Terminal control primitives used while blanking and restoring.

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use std::io::{self, Write};

pub fn hide_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Hide)
}

pub fn show_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Show)
}

/// Reset graphic rendition, clear the screen and home the cursor.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), Clear(ClearType::All), MoveTo(0, 0))
}

pub fn clear_line<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::UntilNewLine))
}

pub fn enter_alternate_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, EnterAlternateScreen)
}

pub fn leave_alternate_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, LeaveAlternateScreen)
}
