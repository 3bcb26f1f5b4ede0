//! Property tests for pointer handling over the chart screen.
//!
//! 1. Hover only ever lands on a visible player
//! 2. A pointer on a plotted data point always hits some line
//! 3. Isolation survives any amount of pointer movement

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use proptest::prelude::*;
use ratatui::layout::Rect;

use deckstats_core::{PlayerId, PlayerStatSeries, Stat, StatPoint};
use deckstats_tui::hit_test::to_cell;
use deckstats_tui::input::handle_mouse;
use deckstats_tui::ui::{chart_panel, screen_layout};
use deckstats_tui::AppState;

const SCREEN: Rect = Rect::new(0, 0, 100, 36);

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_series(name: &'static str) -> impl Strategy<Value = PlayerStatSeries> {
    prop::collection::vec(0.0..500.0_f64, 1..20).prop_map(move |powers| PlayerStatSeries {
        player: PlayerId::from(name),
        points: powers
            .into_iter()
            .enumerate()
            .map(|(i, p)| StatPoint::new(i, i as u32 + 1, p))
            .collect(),
    })
}

fn arb_app() -> impl Strategy<Value = AppState> {
    (arb_series("Alpha"), arb_series("Bravo"), arb_series("Charlie"))
        .prop_map(|(a, b, c)| AppState::new(vec![a, b, c], 1.5))
}

fn arb_pointer() -> impl Strategy<Value = (u16, u16)> {
    (0..SCREEN.width, 0..SCREEN.height)
}

fn moved((column, row): (u16, u16)) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Moved,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn clicked((column, row): (u16, u16)) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn hover_is_always_visible(
        mut app in arb_app(),
        events in prop::collection::vec((arb_pointer(), any::<bool>()), 1..30),
    ) {
        for (pointer, click) in events {
            let event = if click { clicked(pointer) } else { moved(pointer) };
            handle_mouse(&mut app, event, SCREEN);
            if let Some(hovered) = &app.interaction.hovered {
                prop_assert!(app.interaction.is_visible(hovered));
            }
        }
    }

    #[test]
    fn data_points_are_hittable(app in arb_app(), pick in 0..3usize, at in 0..20usize) {
        let series = &app.series[pick];
        let point = &series.points[at % series.points.len()];
        let rect = screen_layout(SCREEN).charts[1].1;
        let plot = chart_panel::plot_rect(rect, &app, Stat::Power);
        let (col, row) = to_cell(plot, app.bounds(Stat::Power), (point.order_index as f64, point.deck_power));
        let pointer = (col.round() as u16, row.round() as u16);
        prop_assert!(chart_panel::line_at(&app, rect, Stat::Power, pointer).is_some());
    }

    #[test]
    fn movement_never_changes_isolation(
        mut app in arb_app(),
        pointers in prop::collection::vec(arb_pointer(), 0..30),
    ) {
        app.isolate_selected();
        let isolated = app.interaction.isolated.clone();
        for pointer in pointers {
            handle_mouse(&mut app, moved(pointer), SCREEN);
        }
        prop_assert_eq!(app.interaction.isolated, isolated);
    }
}
