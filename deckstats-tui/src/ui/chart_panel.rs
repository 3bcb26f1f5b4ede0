//! One statistic chart: a polyline per visible player.
//!
//! The hovered line is drawn last with a heavier marker and bold style so it
//! sits on top of every other line.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use deckstats_core::{PlayerId, Stat};

use crate::app::AppState;
use crate::hit_test::{hit_test, plot_area, AxisBounds};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, stat: Stat) {
    let block = chart_block(app, stat);
    let lines = app.visible_lines(stat);

    if lines.iter().all(|(_, points)| points.is_empty()) {
        let inner = block.inner(area);
        f.render_widget(block, area);
        render_empty(f, inner);
        return;
    }

    let bounds = app.bounds(stat);
    let (x_labels, y_labels) = axis_labels(stat, bounds);

    let datasets: Vec<Dataset> = lines
        .iter()
        .map(|(player, points)| {
            let hovered = app.interaction.is_hovered(player);
            Dataset::default()
                .marker(if hovered { Marker::HalfBlock } else { Marker::Braille })
                .graph_type(GraphType::Line)
                .style(theme::line_style(player, hovered))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Purchase", theme::muted()))
                .style(theme::muted())
                .bounds(bounds.x)
                .labels(x_labels.into_iter().map(|l| Span::styled(l, theme::muted()))),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(bounds.y)
                .labels(y_labels.into_iter().map(|l| Span::styled(l, theme::muted()))),
        );

    f.render_widget(chart, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No purchases to plot.", theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn chart_block(app: &AppState, stat: Stat) -> Block<'static> {
    let emphasized = app.interaction.hovered.is_some() || app.interaction.isolated.is_some();
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(emphasized))
        .title(format!(" {} ", stat.title()))
        .title_style(theme::panel_title(emphasized))
        .style(Style::default().bg(theme::BACKGROUND))
}

/// `(x labels, y labels)`: start, middle and end of each axis.
pub fn axis_labels(stat: Stat, bounds: &AxisBounds) -> (Vec<String>, Vec<String>) {
    let x_max = bounds.x[1];
    let x = vec![
        "0".to_string(),
        format!("{}", (x_max / 2.0).round() as usize),
        format!("{}", x_max as usize),
    ];

    let [lo, hi] = bounds.y;
    let mid = (lo + hi) / 2.0;
    let fmt = |v: f64| match stat {
        Stat::Efficiency => format!("{v:.1}"),
        Stat::Size | Stat::Power => format!("{v:.0}"),
    };
    (x, vec![fmt(lo), fmt(mid), fmt(hi)])
}

/// The cells the chart plots data into.
pub fn plot_rect(area: Rect, app: &AppState, stat: Stat) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let (_, y_labels) = axis_labels(stat, app.bounds(stat));
    let label_width = y_labels
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0);
    plot_area(inner, label_width)
}

/// The visible line under the pointer, if any.
pub fn line_at<'a>(app: &'a AppState, area: Rect, stat: Stat, pointer: (u16, u16)) -> Option<&'a PlayerId> {
    let plot = plot_rect(area, app, stat);
    let lines = app.visible_lines(stat);
    hit_test(plot, app.bounds(stat), &lines, pointer, app.hover_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit_test::to_cell;
    use deckstats_core::{PlayerStatSeries, StatPoint};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> AppState {
        let flat = PlayerStatSeries {
            player: PlayerId::from("Low"),
            points: (0..10).map(|i| StatPoint::new(i, i as u32 + 1, 0.0)).collect(),
        };
        let steep = PlayerStatSeries {
            player: PlayerId::from("High"),
            points: (0..10)
                .map(|i| StatPoint::new(i, i as u32 + 1, 100.0))
                .collect(),
        };
        AppState::new(vec![steep, flat], 1.5)
    }

    #[test]
    fn labels_match_the_statistic() {
        let bounds = AxisBounds {
            x: [0.0, 9.0],
            y: [0.0, 3.0],
        };
        let (x, y) = axis_labels(Stat::Efficiency, &bounds);
        assert_eq!(x, vec!["0", "5", "9"]);
        assert_eq!(y, vec!["0.0", "1.5", "3.0"]);
        let (_, y) = axis_labels(Stat::Size, &bounds);
        assert_eq!(y[2], "3");
    }

    #[test]
    fn pointer_on_a_line_finds_its_player() {
        let app = app();
        let area = Rect::new(0, 0, 80, 20);
        let plot = plot_rect(area, &app, Stat::Power);
        let (col, row) = to_cell(plot, app.bounds(Stat::Power), (4.0, 100.0));
        let hit = line_at(&app, area, Stat::Power, (col.round() as u16, row.round() as u16));
        assert_eq!(hit, Some(&PlayerId::from("High")));
    }

    #[test]
    fn pointer_between_lines_finds_nothing() {
        let app = app();
        let area = Rect::new(0, 0, 80, 20);
        let plot = plot_rect(area, &app, Stat::Power);
        let (col, row) = to_cell(plot, app.bounds(Stat::Power), (4.0, 50.0));
        assert_eq!(line_at(&app, area, Stat::Power, (col as u16, row as u16)), None);
    }

    #[test]
    fn renders_without_panicking() {
        let mut app = app();
        app.interact(deckstats_core::InteractionEvent::Hover(Some(PlayerId::from("Low"))));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, area, &app, Stat::Power);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let title: String = (1..12).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(title.contains("Deck Power"), "{title}");
    }

    #[test]
    fn empty_chart_shows_a_hint() {
        let app = AppState::new(vec![], 1.5);
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, area, &app, Stat::Size);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let row: String = (1..39).map(|x| buffer[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("No purchases"), "{row}");
    }
}
