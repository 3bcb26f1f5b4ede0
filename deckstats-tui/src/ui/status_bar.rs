//! Bottom status bar — key hints, data source, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Key hints
    spans.push(Span::styled(
        " j/k:select enter:isolate esc:all q:quit",
        theme::muted(),
    ));

    if !app.source.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(app.source.as_str(), theme::positive()));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
