use serde::{Deserialize, Serialize};

/// Visual and pacing configuration for the rendered replay.
///
/// Every field has a default matching the stock look; callers that want a
/// different palette or replay speed construct one and override fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Overall image width in pixels. Height is derived from the grid.
    pub width: f64,
    /// Margin drawn around the image.
    pub margin: f64,
    /// Band above the puzzle for title, byline and solver.
    pub headline_height: f64,
    /// Band below the puzzle for the active clue.
    pub clue_height: f64,
    /// Band below the clue for the timer and completion marker.
    pub progress_height: f64,

    /// Recorded wall-clock milliseconds per animation millisecond.
    pub time_divisor: f64,

    pub background_color: String,
    pub grid_color: String,
    pub blocked_color: String,
    pub fillable_color: String,
    pub select_color: String,
    pub highlight_color: String,

    pub label_font: String,
    pub fill_font: String,
    pub clue_font: String,
    pub progress_font: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: 500.0,
            margin: 50.0,
            headline_height: 50.0,
            clue_height: 50.0,
            progress_height: 50.0,
            time_divisor: 10.0,
            background_color: "lightgray".to_string(),
            grid_color: "gray".to_string(),
            blocked_color: "black".to_string(),
            fillable_color: "white".to_string(),
            select_color: "yellow".to_string(),
            highlight_color: "skyblue".to_string(),
            label_font: "sans-serif".to_string(),
            fill_font: "sans-serif".to_string(),
            clue_font: "sans-serif".to_string(),
            progress_font: "sans-serif".to_string(),
        }
    }
}
