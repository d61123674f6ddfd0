//! Solvetrace turns a recorded crossword-solving session into a single
//! self-contained animated SVG that replays the solve.
//!
//! The pipeline is a fixed sequence of pure transforms:
//!
//! - Parse a [`SessionRecord`] from the recorder's JSON
//! - Build the static [`Scene`] (grid, labels, hidden clues, timer, marker)
//! - [`compile`] the event log into a [`Timeline`] of time-anchored directives
//! - Serialize scene plus timeline as an SVG/SMIL document
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod record;
pub mod scene;
pub mod style;
pub mod svg;
pub mod timeline;

pub use error::{SolvetraceError, SolvetraceResult};
pub use geometry::{Direction, Geometry, Pos};
pub use record::{Event, SessionRecord};
pub use scene::Scene;
pub use style::Style;
pub use timeline::{Timeline, compile};

/// Converts a parsed session record into the final SVG document string.
///
/// Fails before producing any output on malformed records or on events that
/// reference squares or clues missing from the grid.
pub fn convert(record: &SessionRecord, style: Style) -> SolvetraceResult<String> {
    let scene = Scene::build(style, record)?;
    let timeline = compile(&scene, &record.events)?;
    Ok(svg::render_document(&scene, &timeline))
}
