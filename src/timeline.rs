use std::collections::HashMap;

use crate::{
    error::{SolvetraceError, SolvetraceResult},
    geometry::{Direction, Pos},
    record::Event,
    scene::{ClueId, Scene, SquareId},
};

/// Handle to a directive inside [`Timeline::directives`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectiveId(pub usize);

/// Handle to an entered glyph inside [`Timeline::glyphs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphId(pub usize);

/// Scene element a directive applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Square(SquareId),
    Glyph(GlyphId),
    Clue(ClueId),
    CompleteMarker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    Fill,
    Visibility,
}

impl Attr {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Visibility => "visibility",
        }
    }
}

/// A scheduled attribute change: set `attr` of `target` to `to` at
/// `begin_ms`, reverting at `end_ms` if a later event supersedes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub target: Target,
    pub attr: Attr,
    pub to: String,
    pub begin_ms: f64,
    pub end_ms: Option<f64>,
}

/// A glyph the solver entered during the session. Glyph text elements are
/// materialized here rather than in the static scene because they only exist
/// once an update event introduces them.
#[derive(Clone, Debug, PartialEq)]
pub struct FillGlyph {
    pub pos: Pos,
    pub glyph: String,
}

/// Append-only compiler output: the glyphs created during the solve and the
/// time-anchored directives attached to scene elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    pub glyphs: Vec<FillGlyph>,
    pub directives: Vec<Directive>,
}

impl Timeline {
    fn open(&mut self, target: Target, attr: Attr, to: impl Into<String>, begin_ms: f64) -> DirectiveId {
        let id = DirectiveId(self.directives.len());
        self.directives.push(Directive {
            target,
            attr,
            to: to.into(),
            begin_ms,
            end_ms: None,
        });
        id
    }

    /// Sets the end time of an open directive. Each directive is closed at
    /// most once; a second close indicates a compiler bug, not bad input.
    fn close(&mut self, id: DirectiveId, end_ms: f64) -> SolvetraceResult<()> {
        let directive = self
            .directives
            .get_mut(id.0)
            .ok_or_else(|| SolvetraceError::timeline(format!("unknown directive {id:?}")))?;
        if directive.end_ms.is_some() {
            return Err(SolvetraceError::timeline(format!(
                "directive {id:?} closed twice"
            )));
        }
        directive.end_ms = Some(end_ms);
        Ok(())
    }

    fn add_glyph(&mut self, pos: Pos, glyph: String) -> GlyphId {
        let id = GlyphId(self.glyphs.len());
        self.glyphs.push(FillGlyph { pos, glyph });
        id
    }
}

/// State threaded through the fold over the event log.
#[derive(Clone, Debug, Default)]
struct CompilerState {
    /// The single selected position, if any.
    selected: Option<Pos>,
    /// Current highlight run, in grid order.
    highlight: Vec<Pos>,
    /// Visibility directive of the currently shown clue text.
    open_clue: Option<DirectiveId>,
    /// Per-position open glyph-visibility directive.
    open_fills: HashMap<Pos, DirectiveId>,
    /// Per-position open color directive (selection or highlight).
    open_colors: HashMap<Pos, DirectiveId>,
}

/// Compiles the event log into a [`Timeline`] against a built scene.
///
/// Single forward pass; event timestamps are assumed pre-sorted ascending.
/// Times are milliseconds relative to the first event, scaled by the style's
/// `time_divisor`. An empty log yields an empty timeline.
#[tracing::instrument(skip_all, fields(events = events.len()))]
pub fn compile(scene: &Scene, events: &[Event]) -> SolvetraceResult<Timeline> {
    let mut timeline = Timeline::default();
    let Some(first) = events.first() else {
        return Ok(timeline);
    };

    let start = first.timestamp();
    let mut state = CompilerState::default();
    for event in events {
        let at = (event.timestamp() - start) / scene.style.time_divisor;
        state = step(state, event, at, scene, &mut timeline)?;
    }
    Ok(timeline)
}

fn step(
    mut state: CompilerState,
    event: &Event,
    at: f64,
    scene: &Scene,
    timeline: &mut Timeline,
) -> SolvetraceResult<CompilerState> {
    match event {
        Event::Update { x, y, fill, .. } => {
            let pos = Pos::new(*x, *y);
            require_square(scene, pos)?;
            if let Some(open) = state.open_fills.remove(&pos) {
                timeline.close(open, at)?;
            }
            if !fill.is_empty() {
                tracing::debug!(%pos, glyph = %fill, at_ms = at, "fill entered");
                let glyph = timeline.add_glyph(pos, fill.clone());
                let open = timeline.open(Target::Glyph(glyph), Attr::Visibility, "visible", at);
                state.open_fills.insert(pos, open);
            }
        }

        Event::Select { x, y, .. } => {
            let pos = Pos::new(*x, *y);
            require_square(scene, pos)?;
            if let Some(prev) = state.selected.take() {
                // Previous selection reverts to highlight color if it is
                // still inside the current run, default fill otherwise.
                let color = state
                    .highlight
                    .contains(&prev)
                    .then(|| scene.style.highlight_color.clone());
                recolor(&mut state, timeline, scene, prev, color, at)?;
            }
            tracing::debug!(%pos, at_ms = at, "square selected");
            recolor(
                &mut state,
                timeline,
                scene,
                pos,
                Some(scene.style.select_color.clone()),
                at,
            )?;
            state.selected = Some(pos);
        }

        Event::SelectClue {
            clue_section,
            clue_label,
            ..
        } => {
            let clue = scene.clue(*clue_section, clue_label).ok_or_else(|| {
                SolvetraceError::lookup(format!(
                    "clue '{clue_label}' not found in section {}",
                    clue_section.section_name()
                ))
            })?;
            let anchor = scene.anchor_for_label(clue_label).ok_or_else(|| {
                SolvetraceError::lookup(format!("no square labeled '{clue_label}'"))
            })?;

            if let Some(open) = state.open_clue.take() {
                timeline.close(open, at)?;
            }
            state.open_clue = Some(timeline.open(Target::Clue(clue), Attr::Visibility, "visible", at));

            let run = highlight_run(scene, anchor, *clue_section);
            tracing::debug!(label = %clue_label, run_len = run.len(), at_ms = at, "clue selected");

            // The selected square's color is owned by selection, never by
            // highlight membership.
            let old = std::mem::take(&mut state.highlight);
            let leaving: Vec<Pos> = old.iter().copied().filter(|p| !run.contains(p)).collect();
            let entering: Vec<Pos> = run.iter().copied().filter(|p| !old.contains(p)).collect();
            for pos in leaving {
                if state.selected != Some(pos) {
                    recolor(&mut state, timeline, scene, pos, None, at)?;
                }
            }
            for pos in entering {
                if state.selected != Some(pos) {
                    recolor(
                        &mut state,
                        timeline,
                        scene,
                        pos,
                        Some(scene.style.highlight_color.clone()),
                        at,
                    )?;
                }
            }
            state.highlight = run;
        }

        Event::Submit { success, .. } => {
            if *success {
                tracing::debug!(at_ms = at, "successful submit");
                timeline.open(Target::CompleteMarker, Attr::Visibility, "visible", at);
            }
        }
    }
    Ok(state)
}

fn require_square(scene: &Scene, pos: Pos) -> SolvetraceResult<SquareId> {
    scene
        .square_at(pos)
        .ok_or_else(|| SolvetraceError::lookup(format!("no square at {pos}")))
}

/// Closes any open color directive at `pos`, then opens a new one when a
/// replacement color is given. `None` reverts the square to its default fill.
fn recolor(
    state: &mut CompilerState,
    timeline: &mut Timeline,
    scene: &Scene,
    pos: Pos,
    color: Option<String>,
    at: f64,
) -> SolvetraceResult<()> {
    if let Some(open) = state.open_colors.remove(&pos) {
        timeline.close(open, at)?;
    }
    if let Some(color) = color {
        let square = require_square(scene, pos)?;
        let open = timeline.open(Target::Square(square), Attr::Fill, color, at);
        state.open_colors.insert(pos, open);
    }
    Ok(())
}

/// Maximal contiguous run of fillable squares from `anchor` along `dir`,
/// stopping at the first blocked or off-grid square.
fn highlight_run(scene: &Scene, anchor: Pos, dir: Direction) -> Vec<Pos> {
    let mut run = Vec::new();
    let mut pos = anchor;
    while scene.is_fillable(pos) {
        run.push(pos);
        pos = pos.step(dir);
    }
    run
}
