//! Chart interaction state: hover emphasis and click-to-isolate.
//!
//! The state is a plain value advanced by [`InteractionState::apply`]. Hover
//! is transient and follows the pointer; isolation is sticky until toggled
//! off or reset. A hidden line can never be hovered.

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Input to the interaction state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Pointer moved onto a line, or off every line.
    Hover(Option<PlayerId>),
    /// Click at the pointer; acts on the hovered line, if any.
    Click,
    /// Toggle isolation of a specific line (keyboard selection).
    Isolate(PlayerId),
    /// Show every line and drop the hover.
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub hovered: Option<PlayerId>,
    pub isolated: Option<PlayerId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn apply(self, event: InteractionEvent) -> Self {
        match event {
            InteractionEvent::Hover(target) => {
                let hovered = target.filter(|p| self.is_visible(p));
                Self { hovered, ..self }
            }
            InteractionEvent::Click => match self.hovered.clone() {
                Some(line) => self.toggle(line),
                None => self,
            },
            InteractionEvent::Isolate(line) => self.toggle(line),
            InteractionEvent::Reset => Self::default(),
        }
    }

    /// Isolate `line`, or restore every line if it is already isolated.
    fn toggle(self, line: PlayerId) -> Self {
        let isolated = if self.isolated.as_ref() == Some(&line) {
            None
        } else {
            Some(line)
        };
        let mut next = Self {
            hovered: self.hovered,
            isolated,
        };
        if let Some(h) = &next.hovered {
            if !next.is_visible(h) {
                next.hovered = None;
            }
        }
        next
    }

    pub fn is_visible(&self, player: &PlayerId) -> bool {
        self.isolated.as_ref().map_or(true, |iso| iso == player)
    }

    pub fn is_hovered(&self, player: &PlayerId) -> bool {
        self.hovered.as_ref() == Some(player)
    }

    /// Visible players in draw order: the hovered line last so it sits on top.
    pub fn draw_order<'a>(&self, players: impl IntoIterator<Item = &'a PlayerId>) -> Vec<&'a PlayerId> {
        let (mut top, mut rest): (Vec<&PlayerId>, Vec<&PlayerId>) = players
            .into_iter()
            .filter(|p| self.is_visible(p))
            .partition(|p| self.is_hovered(p));
        rest.append(&mut top);
        rest
    }
}
