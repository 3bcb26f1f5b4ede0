//! DeckStats TUI - interactive deck statistic charts
//!
//! Three stacked charts (deck size, power and efficiency) with one line per
//! player and a legend on the right:
//! - pointer over a line renders it bold and on top
//! - click a line to show only that player, click it again to show all
//! - j/k walks the legend, Enter isolates, Esc resets

pub mod app;
pub mod input;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use terminal::run;
