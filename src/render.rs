// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! Draws the popup's three views with crossterm, colored by the active theme.
//!
//! Layout of the main view:
//!
//! ```text
//! > query
//! ──────────────────────
//!   github.com · GitHub        <- list starts at LIST_TOP
//!   (local) · Docs
//! 2 tabs.                      <- status on the last row
//! ```

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

use tabfzf_switcher::settings::theme::ThemeColors;
use tabfzf_switcher::{Popup, SettingsPanel, Status, View};

/// First screen row of the tab list.
pub const LIST_TOP: u16 = 2;

const PROMPT: &str = "> ";

const HELP_LINES: [(&str, &str); 13] = [
    ("Up / Alt+P", "previous tab"),
    ("Down / Alt+N", "next tab"),
    ("Enter", "switch to the selected tab"),
    ("Esc", "close"),
    ("Ctrl+A / Ctrl+E", "start / end of line"),
    ("Alt+F / Alt+B", "word forward / backward"),
    ("Alt+D", "delete word forward"),
    ("Ctrl+D", "delete character forward"),
    ("Ctrl+K", "delete to end of line"),
    ("Alt+Backspace", "delete word backward"),
    ("Ctrl+H", "toggle this help"),
    ("F2", "settings"),
    ("Esc (here)", "back"),
];

/// Parses `#rrggbb` into a terminal color.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Terminal colors derived from a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
    pub active: Color,
    pub title: Color,
}

impl Palette {
    pub fn from_theme(colors: &ThemeColors) -> Self {
        let color = |hex: &str| hex_to_color(hex).unwrap_or(Color::Reset);
        Self {
            bg: color(&colors.bg),
            text: color(&colors.text),
            muted: color(&colors.muted),
            border: color(&colors.border),
            focus: color(&colors.focus),
            active: color(&colors.active),
            title: color(&colors.title),
        }
    }
}

/// Where the tab list landed on screen, for mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListLayout {
    pub top: u16,
    pub height: usize,
    /// Index of the first visible item.
    pub offset: usize,
}

impl ListLayout {
    /// Lays out a list on a screen `rows` high, scrolled so `selected` is visible.
    pub fn new(rows: u16, selected: usize) -> Self {
        let height = rows.saturating_sub(LIST_TOP + 1) as usize;
        Self {
            top: LIST_TOP,
            height,
            offset: scroll_offset(selected, height),
        }
    }

    /// The item index drawn on `screen_row`, if any.
    pub fn item_at(&self, screen_row: u16, len: usize) -> Option<usize> {
        let row = screen_row.checked_sub(self.top)? as usize;
        if row >= self.height {
            return None;
        }
        let index = self.offset + row;
        (index < len).then_some(index)
    }
}

/// First visible index so that `selected` fits in a window of `height` rows.
pub fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    selected.saturating_sub(height - 1)
}

/// Clips `text` to `width` terminal columns.
pub fn clip(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut clipped = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        clipped.push(ch);
    }
    clipped
}

fn text_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

/// Draws the current view. Returns the list layout of the main view.
pub fn draw<W: Write>(
    out: &mut W,
    popup: &Popup,
    settings: &SettingsPanel,
    settings_cursor: usize,
    (cols, rows): (u16, u16),
) -> io::Result<ListLayout> {
    let palette = Palette::from_theme(&settings.active_theme().colors);
    queue!(
        out,
        SetBackgroundColor(palette.bg),
        MoveTo(0, 0),
        Clear(ClearType::All),
        Hide
    )?;

    let layout = ListLayout::new(rows, popup.selected_index());
    if cols > 0 && rows > 0 {
        match popup.view() {
            View::Main => draw_main(out, popup, &palette, &layout, cols, rows)?,
            View::Help => draw_help(out, &palette, cols, rows)?,
            View::Settings => draw_settings(out, settings, settings_cursor, &palette, cols, rows)?,
        }
    }

    queue!(out, ResetColor)?;
    out.flush()?;
    Ok(layout)
}

fn draw_main<W: Write>(
    out: &mut W,
    popup: &Popup,
    palette: &Palette,
    layout: &ListLayout,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let width = cols as usize;

    // Query line, with the selection shown reversed.
    let chars = popup.query().chars();
    let selection = popup.query_selection();
    let before: String = chars[..selection.start].iter().collect();
    let selected: String = chars[selection.start..selection.end].iter().collect();
    let after: String = chars[selection.end..].iter().collect();
    queue!(
        out,
        MoveTo(0, 0),
        SetForegroundColor(palette.focus),
        Print(PROMPT),
        SetForegroundColor(palette.text),
        Print(&before),
        SetAttribute(Attribute::Reverse),
        Print(&selected),
        SetAttribute(Attribute::NoReverse),
        Print(&after)
    )?;

    if rows > 1 {
        queue!(
            out,
            MoveTo(0, 1),
            SetForegroundColor(palette.border),
            Print("─".repeat(width))
        )?;
    }

    let rows_shown = popup.rows();
    for (line, row) in rows_shown
        .iter()
        .skip(layout.offset)
        .take(layout.height)
        .enumerate()
    {
        let y = layout.top + line as u16;
        let label = format!("  {} · {}", row.domain, row.title);
        let shown = clip(&label, width);
        let padding = " ".repeat(width.saturating_sub(text_width(&shown)));
        if row.selected {
            queue!(
                out,
                MoveTo(0, y),
                SetBackgroundColor(palette.active),
                SetForegroundColor(palette.title),
                Print(&shown),
                Print(padding),
                SetBackgroundColor(palette.bg)
            )?;
        } else {
            queue!(
                out,
                MoveTo(0, y),
                SetForegroundColor(palette.text),
                Print(&shown)
            )?;
        }
    }

    draw_status(out, popup.status(), palette, width, rows - 1)?;

    let cursor_x = text_width(PROMPT) + text_width(&before);
    if cursor_x < width {
        queue!(out, MoveTo(cursor_x as u16, 0), Show)?;
    }
    Ok(())
}

fn draw_help<W: Write>(out: &mut W, palette: &Palette, cols: u16, rows: u16) -> io::Result<()> {
    let width = cols as usize;
    queue!(
        out,
        MoveTo(0, 0),
        SetForegroundColor(palette.title),
        Print(clip("Key bindings", width))
    )?;
    for (i, (keys, action)) in HELP_LINES.iter().enumerate() {
        let y = i as u16 + 2;
        if y >= rows {
            break;
        }
        queue!(
            out,
            MoveTo(0, y),
            SetForegroundColor(palette.focus),
            Print(clip(&format!("  {keys:<18}"), width)),
            SetForegroundColor(palette.text),
            Print(clip(action, width.saturating_sub(20)))
        )?;
    }
    Ok(())
}

fn draw_settings<W: Write>(
    out: &mut W,
    settings: &SettingsPanel,
    cursor: usize,
    palette: &Palette,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let width = cols as usize;
    queue!(
        out,
        MoveTo(0, 0),
        SetForegroundColor(palette.title),
        Print(clip("Themes (Enter apply, Delete remove, Esc back)", width))
    )?;

    let active_id = settings.themes().selected_id();
    let mut y = 2u16;
    for (i, theme) in settings.themes().themes().enumerate() {
        if y + 3 >= rows {
            break;
        }
        let marker = if theme.id == active_id { "*" } else { " " };
        let label = format!("{marker} {} ({:?})", theme.name, theme.source);
        let color = if i == cursor { palette.focus } else { palette.text };
        queue!(
            out,
            MoveTo(0, y),
            SetForegroundColor(color),
            Print(clip(&label, width))
        )?;
        y += 1;
    }

    let shortcut = match settings.shortcut_input() {
        "" => "(none)",
        current => current,
    };
    if y + 2 < rows {
        queue!(
            out,
            MoveTo(0, y + 1),
            SetForegroundColor(palette.muted),
            Print(clip(&format!("Shortcut: {shortcut}"), width))
        )?;
    }

    draw_status(out, settings.status(), palette, width, rows - 1)
}

fn draw_status<W: Write>(
    out: &mut W,
    status: &Status,
    palette: &Palette,
    width: usize,
    y: u16,
) -> io::Result<()> {
    let color = if status.is_error() { Color::Red } else { palette.muted };
    queue!(
        out,
        MoveTo(0, y),
        SetForegroundColor(color),
        Print(clip(&status.text, width))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_to_color("#0a0f14"), Some(Color::Rgb { r: 10, g: 15, b: 20 }));
        assert_eq!(hex_to_color("rgba(1, 2, 3, 0.5)"), None);
        assert_eq!(hex_to_color("#fff"), None);
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
        assert_eq!(scroll_offset(7, 0), 0);
    }

    #[test]
    fn maps_screen_rows_to_items() {
        let layout = ListLayout::new(10, 9);
        assert_eq!(layout.height, 7);
        assert_eq!(layout.offset, 3);
        assert_eq!(layout.item_at(LIST_TOP, 12), Some(3));
        assert_eq!(layout.item_at(0, 12), None);
        assert_eq!(layout.item_at(LIST_TOP + 7, 12), None);
        assert_eq!(layout.item_at(LIST_TOP + 1, 4), None);
    }

    #[test]
    fn clips_wide_characters() {
        assert_eq!(clip("abc", 2), "ab");
        assert_eq!(clip("日本語", 5), "日本");
    }

    #[test]
    fn draws_main_view_without_panicking() {
        use tabfzf_switcher::{SwitcherConfig, Tab};

        let popup = Popup::new(
            vec![Tab::new(1, 1).with_title("GitHub").with_url("https://github.com/")],
            None,
            &SwitcherConfig::default(),
        );
        let settings = SettingsPanel::default();
        let mut out = Vec::new();
        let layout = draw(&mut out, &popup, &settings, 0, (40, 6)).unwrap();
        assert_eq!(layout.height, 3);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("github.com · GitHub"));
        assert!(text.contains("1 tab."));
    }
}
