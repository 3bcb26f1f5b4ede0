//! Application state — single-owner, main-thread only.

use deckstats_core::{
    InteractionEvent, InteractionState, PlayerId, PlayerStatSeries, Stat,
};

use crate::hit_test::AxisBounds;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// One chart's data in draw order: the hovered line last.
pub type Lines<'a> = Vec<(&'a PlayerId, Vec<(f64, f64)>)>;

#[derive(Debug)]
pub struct AppState {
    /// Series ordered by player.
    pub series: Vec<PlayerStatSeries>,
    pub interaction: InteractionState,
    /// Legend selection.
    pub cursor: usize,
    pub running: bool,
    pub status_message: Option<(String, StatusLevel)>,
    pub hover_tolerance: f64,
    /// Where the data came from, shown in the status bar.
    pub source: String,
    bounds: [AxisBounds; 3],
}

impl AppState {
    pub fn new(series: Vec<PlayerStatSeries>, hover_tolerance: f64) -> Self {
        // axes stay fixed while lines are hidden or shown
        let bounds = Stat::ALL.map(|stat| {
            let points: Vec<(f64, f64)> = series.iter().flat_map(|s| s.xy(stat)).collect();
            AxisBounds::enclosing(&points)
        });
        Self {
            series,
            interaction: InteractionState::new(),
            cursor: 0,
            running: true,
            status_message: None,
            hover_tolerance,
            source: String::new(),
            bounds,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.series.iter().map(|s| &s.player)
    }

    pub fn selected_player(&self) -> Option<&PlayerId> {
        self.series.get(self.cursor).map(|s| &s.player)
    }

    pub fn bounds(&self, stat: Stat) -> &AxisBounds {
        match stat {
            Stat::Size => &self.bounds[0],
            Stat::Power => &self.bounds[1],
            Stat::Efficiency => &self.bounds[2],
        }
    }

    /// Visible lines for one statistic, in draw order.
    pub fn visible_lines(&self, stat: Stat) -> Lines<'_> {
        self.interaction
            .draw_order(self.players())
            .into_iter()
            .filter_map(|player| {
                let series = self.series.iter().find(|s| &s.player == player)?;
                Some((player, series.xy(stat)))
            })
            .collect()
    }

    /// Advance the interaction state and report isolation changes.
    pub fn interact(&mut self, event: InteractionEvent) {
        let before = self.interaction.isolated.clone();
        let state = std::mem::take(&mut self.interaction);
        self.interaction = state.apply(event);

        if self.interaction.isolated != before {
            let msg = match &self.interaction.isolated {
                Some(player) => format!("Showing only {player} (click again for all)"),
                None => "Showing all players".to_string(),
            };
            self.set_status(msg);
        }
    }

    /// Move the legend cursor and hover the selected line.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.series.is_empty() {
            return;
        }
        let last = self.series.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        let player = self.selected_player().cloned();
        self.interact(InteractionEvent::Hover(player));
        if self.interaction.hovered.is_none() {
            self.set_warning("Player is hidden; press Esc to show all");
        }
    }

    pub fn isolate_selected(&mut self) {
        if let Some(player) = self.selected_player().cloned() {
            self.interact(InteractionEvent::Isolate(player));
        }
    }
}
