//! Parrot/neon palette and style helpers.
//!
//! Neon accents on a near-black background. Player lines take their roster
//! colour; everything else uses the tokens below.

use ratatui::style::{Color, Modifier, Style};

use deckstats_core::roster::player_colour;
use deckstats_core::PlayerId;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;
pub const TEXT_DIM: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn panel_border(emphasized: bool) -> Style {
    if emphasized {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(NEUTRAL)
    }
}

pub fn panel_title(emphasized: bool) -> Style {
    if emphasized {
        accent_bold()
    } else {
        Style::default().fg(TEXT)
    }
}

pub fn player_color(player: &PlayerId) -> Color {
    let (r, g, b) = player_colour(player);
    Color::Rgb(r, g, b)
}

/// Style of a player's line: bold when hovered.
pub fn line_style(player: &PlayerId, hovered: bool) -> Style {
    let style = Style::default().fg(player_color(player));
    if hovered {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rostered_player_keeps_channel_colour() {
        assert_eq!(player_color(&PlayerId::from("Grian")), Color::Rgb(0xdc, 0x14, 0x3c));
    }

    #[test]
    fn hovered_lines_are_bold() {
        let p = PlayerId::from("Grian");
        assert!(line_style(&p, true).add_modifier.contains(Modifier::BOLD));
        assert!(!line_style(&p, false).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn border_emphasis() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(NEUTRAL));
    }
}
