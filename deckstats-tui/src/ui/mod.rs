//! Top-level UI layout — three stacked charts, player legend, status bar.

pub mod chart_panel;
pub mod legend;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use deckstats_core::Stat;

use crate::app::AppState;

const LEGEND_WIDTH: u16 = 34;

/// Where each part of the screen goes. Shared by drawing and mouse handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub charts: [(Stat, Rect); 3],
    pub legend: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn chart_at(&self, col: u16, row: u16) -> Option<(Stat, Rect)> {
        self.charts
            .iter()
            .copied()
            .find(|(_, rect)| rect.contains((col, row).into()))
    }
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    // Split: main area + 1-line status bar.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let legend_width = LEGEND_WIDTH.min(rows[0].width / 3);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(legend_width)])
        .split(rows[0]);

    let stacked = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(cols[0]);

    ScreenLayout {
        charts: [
            (Stat::Size, stacked[0]),
            (Stat::Power, stacked[1]),
            (Stat::Efficiency, stacked[2]),
        ],
        legend: cols[1],
        status: rows[1],
    }
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let layout = screen_layout(f.area());

    for (stat, rect) in layout.charts {
        chart_panel::render(f, rect, app, stat);
    }
    legend::render(f, layout.legend, app);
    status_bar::render(f, layout.status, app);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charts_share_the_left_column() {
        let layout = screen_layout(Rect::new(0, 0, 120, 40));
        let [(s0, a), (s1, b), (s2, c)] = layout.charts;
        assert_eq!((s0, s1, s2), (Stat::Size, Stat::Power, Stat::Efficiency));
        assert_eq!(a.x, b.x);
        assert_eq!(b.x, c.x);
        assert_eq!(a.width, 120 - LEGEND_WIDTH);
        assert_eq!(a.bottom(), b.y);
        assert_eq!(b.bottom(), c.y);
        assert_eq!(layout.status, Rect::new(0, 39, 120, 1));
        assert_eq!(layout.legend.x, 120 - LEGEND_WIDTH);
    }

    #[test]
    fn chart_lookup_by_cell() {
        let layout = screen_layout(Rect::new(0, 0, 120, 40));
        let power = layout.charts[1].1;
        assert_eq!(
            layout.chart_at(power.x + 1, power.y + 1).map(|(s, _)| s),
            Some(Stat::Power)
        );
        assert_eq!(layout.chart_at(119, 5), None);
    }

    #[test]
    fn narrow_terminals_shrink_the_legend() {
        let layout = screen_layout(Rect::new(0, 0, 60, 20));
        assert_eq!(layout.legend.width, 20);
    }
}
