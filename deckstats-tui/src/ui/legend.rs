//! Player legend — colour swatch, current deck and visibility per player.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let isolated = app.interaction.isolated.is_some();
    let title = if isolated { " Players (isolated) " } else { " Players " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(isolated))
        .title(title)
        .title_style(theme::panel_title(isolated));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let skip = scroll_offset(app.cursor, inner.height as usize);
    let lines: Vec<Line> = app
        .series
        .iter()
        .enumerate()
        .skip(skip)
        .take(inner.height as usize)
        .map(|(i, s)| {
            let visible = app.interaction.is_visible(&s.player);
            let hovered = app.interaction.is_hovered(&s.player);

            let cursor = if i == app.cursor { "▶" } else { " " };
            let swatch_style = if visible {
                Style::default().fg(theme::player_color(&s.player))
            } else {
                theme::dim()
            };
            let mut name_style = if visible {
                Style::default().fg(theme::TEXT)
            } else {
                theme::dim()
            };
            if hovered {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }
            let stats = match s.latest() {
                Some(p) => format!(" {:>3} {:>6.0}", p.deck_size, p.deck_power),
                None => String::new(),
            };

            Line::from(vec![
                Span::styled(cursor, theme::accent_bold()),
                Span::styled(" ━━ ", swatch_style),
                Span::styled(s.player.as_str(), name_style),
                Span::styled(stats, theme::muted()),
            ])
        })
        .collect();

    if lines.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No players loaded.", theme::muted())),
            inner,
        );
    } else {
        f.render_widget(Paragraph::new(lines), inner);
    }
}

/// First legend row shown so the cursor stays on screen.
fn scroll_offset(cursor: usize, rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        (cursor + 1).saturating_sub(rows)
    }
}

/// Index of the legend entry at a terminal cell.
pub fn entry_at(area: Rect, app: &AppState, (col, row): (u16, u16)) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if !inner.contains((col, row).into()) {
        return None;
    }
    let index = scroll_offset(app.cursor, inner.height as usize) + usize::from(row - inner.y);
    (index < app.series.len()).then_some(index)
}
