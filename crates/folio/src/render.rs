#![forbid(unsafe_code)]

//! Draws a [`Screen`] with crossterm.
//!
//! Every frame is a full redraw: each row is moved to, printed, and padded
//! to the terminal width. The palette overlay is boxed and drawn over the
//! top of the body.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use folio_palette::text::pad_to_width;

use crate::app::{Line, LineStyle, Screen};

/// Column where the palette box starts.
const OVERLAY_INSET: u16 = 2;

/// Draw `screen` on a `width` x `height` terminal.
pub fn draw<W: Write>(out: &mut W, screen: &Screen, width: u16, height: u16) -> io::Result<()> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    let cols = usize::from(width);
    let body_rows = height - 1;

    for row in 0..body_rows {
        let line = screen.body.get(usize::from(row));
        draw_line(out, 0, row, line, cols)?;
    }

    if !screen.overlay.is_empty() {
        let inner_cols = width.saturating_sub(OVERLAY_INSET * 2 + 2);
        let inner = usize::from(inner_cols);
        let border = format!("+{}+", "-".repeat(inner));
        let mut row = 1;
        queue!(out, MoveTo(OVERLAY_INSET, row), ResetColor, Print(&border))?;
        for line in &screen.overlay {
            row += 1;
            if row >= body_rows {
                break;
            }
            queue!(out, MoveTo(OVERLAY_INSET, row), Print("|"))?;
            draw_line(out, OVERLAY_INSET + 1, row, Some(line), inner)?;
            queue!(out, MoveTo(OVERLAY_INSET + 1 + inner_cols, row), Print("|"))?;
        }
        if row + 1 < body_rows {
            queue!(out, MoveTo(OVERLAY_INSET, row + 1), Print(&border))?;
        }
    }

    draw_line(out, 0, height - 1, Some(&screen.status), cols)?;
    out.flush()
}

fn draw_line<W: Write>(out: &mut W, col: u16, row: u16, line: Option<&Line>, cols: usize) -> io::Result<()> {
    queue!(out, MoveTo(col, row))?;
    let Some(line) = line else {
        return queue!(out, ResetColor, Print(" ".repeat(cols)));
    };
    apply_style(out, line.style)?;
    queue!(
        out,
        Print(pad_to_width(&line.text, cols)),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

fn apply_style<W: Write>(out: &mut W, style: LineStyle) -> io::Result<()> {
    match style {
        LineStyle::Title => queue!(out, SetAttribute(Attribute::Bold)),
        LineStyle::Body | LineStyle::Input => Ok(()),
        LineStyle::Divider | LineStyle::PaletteEmpty => {
            queue!(out, SetForegroundColor(Color::DarkGrey))
        }
        LineStyle::User => queue!(out, SetForegroundColor(Color::Cyan)),
        LineStyle::Assistant => queue!(out, SetForegroundColor(Color::Green)),
        LineStyle::Typing => queue!(
            out,
            SetAttribute(Attribute::Italic),
            SetForegroundColor(Color::DarkGrey)
        ),
        LineStyle::Chip { selected: true } | LineStyle::PaletteItem { selected: true } => {
            queue!(out, SetAttribute(Attribute::Reverse))
        }
        LineStyle::Chip { selected: false } => queue!(out, SetForegroundColor(Color::Yellow)),
        LineStyle::PaletteItem { selected: false } => Ok(()),
        LineStyle::PaletteQuery => queue!(out, SetAttribute(Attribute::Bold)),
        LineStyle::Status => queue!(
            out,
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Color::White)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_assistant::ConversationConfig;
    use folio_content::Content;
    use folio_core::{Event, KeyChord};
    use std::time::Instant;

    use crate::app::AppModel;

    fn render(app: &AppModel, width: u16, height: u16) -> String {
        let mut out = Vec::new();
        draw(&mut out, &app.view(width, height), width, height).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn app() -> AppModel {
        AppModel::new(
            Content::builtin(),
            ConversationConfig::default(),
            KeyChord::palette_default(),
        )
    }

    #[test]
    fn frame_contains_title_and_status() {
        let frame = render(&app(), 60, 10);
        assert!(frame.contains("Home  (/)"));
        assert!(frame.contains("Ctrl+K search"));
    }

    #[test]
    fn overlay_is_boxed() {
        let mut app = app();
        app.update(
            &Event::key_with(folio_core::KeyCode::Char('k'), folio_core::Modifiers::CTRL),
            Instant::now(),
        );
        let frame = render(&app, 40, 16);
        assert!(frame.contains("+----"));
        assert!(frame.contains("Search command or page"));
        assert!(frame.contains("Navigation  Home"));
    }

    #[test]
    fn zero_size_is_noop() {
        let mut out = Vec::new();
        draw(&mut out, &app().view(0, 0), 0, 0).unwrap();
        assert!(out.is_empty());
    }
}
