//! Input dispatch — keys drive the legend cursor, the mouse drives the charts.
//!
//! Pointer over a chart line hovers it; a left click toggles isolation of the
//! line under the pointer. The legend accepts the same gestures per row.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use deckstats_core::{InteractionEvent, PlayerId};

use crate::app::AppState;
use crate::ui::{chart_panel, legend, screen_layout};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.move_cursor(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Enter | KeyCode::Char(' ') => app.isolate_selected(),
        KeyCode::Esc => app.interact(InteractionEvent::Reset),
        _ => {}
    }
}

/// `screen` is the full terminal area the UI was laid out in.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent, screen: Rect) {
    let layout = screen_layout(screen);
    let pointer = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved => {
            let target = target_at(app, screen, pointer);
            if target != app.interaction.hovered {
                app.interact(InteractionEvent::Hover(target));
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = legend::entry_at(layout.legend, app, pointer) {
                app.cursor = index;
                app.isolate_selected();
                return;
            }
            let target = target_at(app, screen, pointer);
            app.interact(InteractionEvent::Hover(target));
            app.interact(InteractionEvent::Click);
        }
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}

/// The player a pointer position refers to: a chart line or a legend row.
fn target_at(app: &AppState, screen: Rect, pointer: (u16, u16)) -> Option<PlayerId> {
    let layout = screen_layout(screen);
    if let Some((stat, rect)) = layout.chart_at(pointer.0, pointer.1) {
        return chart_panel::line_at(app, rect, stat, pointer).cloned();
    }
    legend::entry_at(layout.legend, app, pointer).map(|i| app.series[i].player.clone())
}
