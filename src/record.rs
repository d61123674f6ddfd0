use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    error::{SolvetraceError, SolvetraceResult},
    geometry::{Direction, Pos},
};

/// A recorded solving session: the static puzzle plus the interaction log.
///
/// This mirrors the recorder's JSON on the wire; missing required fields are
/// rejected at deserialization time, before any output exists.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub title: String,
    pub date: String,
    pub byline: String,
    pub solver_name: String,
    pub initial_state: Vec<SquareDef>,
    pub clue_sections: BTreeMap<Direction, Vec<ClueDef>>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl SessionRecord {
    pub fn validate(&self) -> SolvetraceResult<()> {
        if self.initial_state.is_empty() {
            return Err(SolvetraceError::record("initialState must be non-empty"));
        }
        Ok(())
    }
}

/// One square of the static grid. Fillable iff `fill` is present; `fill`
/// carries the letters already entered when recording began (usually empty).
#[derive(Clone, Debug, Deserialize)]
pub struct SquareDef {
    pub x: u32,
    pub y: u32,
    pub fill: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl SquareDef {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn fillable(&self) -> bool {
        self.fill.is_some()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ClueDef {
    pub label: String,
    pub text: String,
}

/// One recorded interaction. Timestamps are absolute milliseconds and are
/// assumed pre-sorted ascending across the log.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Update {
        timestamp: f64,
        x: u32,
        y: u32,
        /// Entered glyph; empty string means the square was cleared.
        fill: String,
    },
    Select {
        timestamp: f64,
        x: u32,
        y: u32,
    },
    #[serde(rename_all = "camelCase")]
    SelectClue {
        timestamp: f64,
        clue_section: Direction,
        clue_label: String,
    },
    Submit {
        timestamp: f64,
        success: bool,
    },
}

impl Event {
    pub fn timestamp(&self) -> f64 {
        match self {
            Self::Update { timestamp, .. }
            | Self::Select { timestamp, .. }
            | Self::SelectClue { timestamp, .. }
            | Self::Submit { timestamp, .. } => *timestamp,
        }
    }
}
