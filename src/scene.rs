use std::collections::HashMap;

use crate::{
    error::SolvetraceResult,
    geometry::{Direction, Geometry, Pos},
    record::SessionRecord,
    style::Style,
};

/// Index of a square rect inside [`Scene::squares`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SquareId(pub usize);

/// Index of a clue text inside [`Scene::clues`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClueId(pub usize);

#[derive(Clone, Debug)]
pub struct SquareNode {
    pub pos: Pos,
    pub fillable: bool,
}

#[derive(Clone, Debug)]
pub struct LabelNode {
    pub pos: Pos,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct ClueNode {
    pub section: Direction,
    pub label: String,
    /// Display text, already prefixed with the label ("4. Like some silence").
    pub text: String,
}

/// Static minute/second tspans shown in the progress band. These enumerate
/// 0..59 up front rather than being driven by the event log.
#[derive(Clone, Debug)]
pub struct TimerNode {
    pub minutes: Vec<String>,
    pub seconds: Vec<String>,
}

/// The non-animated visual baseline plus the lookups the timeline compiler
/// needs: position to square, clue label to anchor position, and
/// (section, label) to clue text.
#[derive(Clone, Debug)]
pub struct Scene {
    pub style: Style,
    pub geometry: Geometry,

    pub title: String,
    pub date: String,
    pub byline: String,
    pub solver_name: String,

    pub squares: Vec<SquareNode>,
    pub labels: Vec<LabelNode>,
    pub clues: Vec<ClueNode>,
    pub timer: TimerNode,

    squares_by_pos: HashMap<Pos, SquareId>,
    anchors_by_label: HashMap<String, Pos>,
    clues_by_key: HashMap<(Direction, String), ClueId>,
}

impl Scene {
    pub fn build(style: Style, record: &SessionRecord) -> SolvetraceResult<Self> {
        record.validate()?;
        let geometry = Geometry::from_squares(&style, &record.initial_state)?;

        let mut squares = Vec::with_capacity(record.initial_state.len());
        let mut labels = Vec::new();
        let mut squares_by_pos = HashMap::with_capacity(record.initial_state.len());
        let mut anchors_by_label = HashMap::new();

        for sq in &record.initial_state {
            let pos = sq.pos();
            squares_by_pos.insert(pos, SquareId(squares.len()));
            squares.push(SquareNode {
                pos,
                fillable: sq.fillable(),
            });
            if let Some(label) = &sq.label {
                labels.push(LabelNode {
                    pos,
                    text: label.clone(),
                });
                anchors_by_label.insert(label.clone(), pos);
            }
        }

        let mut clues = Vec::new();
        let mut clues_by_key = HashMap::new();
        for (&section, section_clues) in &record.clue_sections {
            for clue in section_clues {
                clues_by_key.insert((section, clue.label.clone()), ClueId(clues.len()));
                clues.push(ClueNode {
                    section,
                    label: clue.label.clone(),
                    text: format!("{}. {}", clue.label, clue.text),
                });
            }
        }

        let timer = TimerNode {
            minutes: (0..60).map(|i| i.to_string()).collect(),
            seconds: (0..60).map(|i| format!("{i:02}")).collect(),
        };

        Ok(Self {
            style,
            geometry,
            title: record.title.clone(),
            date: record.date.clone(),
            byline: record.byline.clone(),
            solver_name: record.solver_name.clone(),
            squares,
            labels,
            clues,
            timer,
            squares_by_pos,
            anchors_by_label,
            clues_by_key,
        })
    }

    pub fn square_at(&self, pos: Pos) -> Option<SquareId> {
        self.squares_by_pos.get(&pos).copied()
    }

    /// True only for positions that exist in the grid and accept letters.
    pub fn is_fillable(&self, pos: Pos) -> bool {
        self.square_at(pos)
            .is_some_and(|id| self.squares[id.0].fillable)
    }

    pub fn anchor_for_label(&self, label: &str) -> Option<Pos> {
        self.anchors_by_label.get(label).copied()
    }

    pub fn clue(&self, section: Direction, label: &str) -> Option<ClueId> {
        self.clues_by_key
            .get(&(section, label.to_string()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json() -> &'static str {
        r#"{
            "title": "Mini", "date": "2014-01-13", "byline": "By A. Setter",
            "solverName": "kris",
            "initialState": [
                { "x": 0, "y": 0, "fill": "", "label": "1" },
                { "x": 1, "y": 0, "fill": "", "label": "2" },
                { "x": 0, "y": 1, "fill": "", "label": "3" },
                { "x": 1, "y": 1, "fill": null }
            ],
            "clueSections": {
                "Across": [ { "label": "1", "text": "First across" } ],
                "Down":   [ { "label": "2", "text": "Second down" } ]
            },
            "events": []
        }"#
    }

    fn scene() -> Scene {
        let record: SessionRecord = serde_json::from_str(record_json()).unwrap();
        Scene::build(Style::default(), &record).unwrap()
    }

    #[test]
    fn lookups_cover_squares_labels_and_clues() {
        let scene = scene();
        assert_eq!(scene.squares.len(), 4);
        assert_eq!(scene.labels.len(), 3);
        assert!(scene.square_at(Pos::new(1, 1)).is_some());
        assert!(scene.square_at(Pos::new(2, 0)).is_none());
        assert_eq!(scene.anchor_for_label("2"), Some(Pos::new(1, 0)));
        assert!(scene.clue(Direction::Across, "1").is_some());
        assert!(scene.clue(Direction::Down, "1").is_none());
    }

    #[test]
    fn fillability_is_exclusive_per_square() {
        let scene = scene();
        for sq in &scene.squares {
            // exactly one of the two colors will apply downstream
            assert_eq!(sq.fillable, scene.is_fillable(sq.pos));
        }
        assert!(!scene.is_fillable(Pos::new(1, 1)));
        assert!(!scene.is_fillable(Pos::new(9, 9)));
    }

    #[test]
    fn clue_text_carries_label_prefix() {
        let scene = scene();
        let id = scene.clue(Direction::Across, "1").unwrap();
        assert_eq!(scene.clues[id.0].text, "1. First across");
    }

    #[test]
    fn timer_enumerates_static_digits() {
        let scene = scene();
        assert_eq!(scene.timer.minutes.len(), 60);
        assert_eq!(scene.timer.seconds[7], "07");
    }
}
