use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::{
    error::{SolvetraceError, SolvetraceResult},
    record::SquareDef,
    style::Style,
};

/// Grid coordinate of a square, column-major identity by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub col: u32,
    pub row: u32,
}

impl Pos {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// The next square along a clue's direction.
    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Across => Self::new(self.col + 1, self.row),
            Direction::Down => Self::new(self.col, self.row + 1),
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One of the two fixed clue sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn section_name(self) -> &'static str {
        match self {
            Self::Across => "Across",
            Self::Down => "Down",
        }
    }
}

/// Pixel layout derived from the static puzzle definition.
///
/// Pure arithmetic over the square list and the [`Style`] bands; positions
/// map to pixel origins without consulting the grid contents again.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub n_cols: u32,
    pub n_rows: u32,
    pub sq_size: f64,
    pub width: f64,
    pub height: f64,

    margin: f64,
    headline_height: f64,
    clue_height: f64,
}

impl Geometry {
    pub fn from_squares(style: &Style, squares: &[SquareDef]) -> SolvetraceResult<Self> {
        if squares.is_empty() {
            return Err(SolvetraceError::record("initialState must be non-empty"));
        }

        let n_cols = squares.iter().map(|sq| sq.x).max().unwrap_or(0) + 1;
        let n_rows = squares.iter().map(|sq| sq.y).max().unwrap_or(0) + 1;

        let puzzle_width = style.width - style.margin * 2.0;
        let sq_size = puzzle_width / f64::from(n_cols);
        let puzzle_height = sq_size * f64::from(n_rows);
        let height = puzzle_height
            + style.margin * 2.0
            + style.headline_height
            + style.clue_height
            + style.progress_height;

        Ok(Self {
            n_cols,
            n_rows,
            sq_size,
            width: style.width,
            height,
            margin: style.margin,
            headline_height: style.headline_height,
            clue_height: style.clue_height,
        })
    }

    pub fn puzzle_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    pub fn puzzle_height(&self) -> f64 {
        self.sq_size * f64::from(self.n_rows)
    }

    /// Top-left pixel corner of a square.
    pub fn origin(&self, pos: Pos) -> Point {
        Point::new(
            self.margin + f64::from(pos.col) * self.sq_size,
            self.margin + self.headline_height + f64::from(pos.row) * self.sq_size,
        )
    }

    /// Baseline anchor for a square's clue-number label.
    pub fn label_anchor(&self, pos: Pos) -> Point {
        let o = self.origin(pos);
        Point::new(o.x + 0.1 * self.sq_size, o.y + 0.25 * self.sq_size)
    }

    /// Baseline anchor for an entered glyph, centered for a single character.
    /// Multi-character (rebus) entries are not supported.
    pub fn glyph_anchor(&self, pos: Pos) -> Point {
        let o = self.origin(pos);
        Point::new(o.x + 0.5 * self.sq_size, o.y + 0.8 * self.sq_size)
    }

    /// Center anchor of the clue band below the puzzle.
    pub fn clue_anchor(&self) -> Point {
        Point::new(
            self.width / 2.0,
            self.margin * 2.0 + self.headline_height + self.puzzle_height(),
        )
    }

    /// Baseline of the progress band (timer and completion marker).
    pub fn progress_baseline(&self) -> f64 {
        self.margin * 2.0 + self.headline_height + self.puzzle_height() + self.clue_height
    }

    pub fn label_size(&self) -> f64 {
        self.sq_size * 0.2
    }

    pub fn fill_size(&self) -> f64 {
        self.sq_size * 0.6
    }

    pub fn clue_size(&self) -> f64 {
        self.puzzle_width() * 0.05
    }

    pub fn progress_size(&self) -> f64 {
        self.clue_size() * 0.75
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: u32, y: u32) -> SquareDef {
        SquareDef {
            x,
            y,
            fill: Some(String::new()),
            label: None,
        }
    }

    #[test]
    fn empty_square_list_fails_fast() {
        let err = Geometry::from_squares(&Style::default(), &[]).unwrap_err();
        assert!(err.to_string().contains("initialState"));
    }

    #[test]
    fn grid_extent_and_square_size() {
        let squares = vec![square(0, 0), square(3, 0), square(0, 1)];
        let geom = Geometry::from_squares(&Style::default(), &squares).unwrap();
        assert_eq!(geom.n_cols, 4);
        assert_eq!(geom.n_rows, 2);
        assert_eq!(geom.sq_size, 100.0);
        assert_eq!(geom.height, 200.0 + 100.0 + 150.0);
    }

    #[test]
    fn origin_offsets_by_margin_and_headline() {
        let geom = Geometry::from_squares(&Style::default(), &[square(0, 0), square(1, 1)]).unwrap();
        let o = geom.origin(Pos::new(1, 1));
        assert_eq!(o, Point::new(50.0 + 200.0, 50.0 + 50.0 + 200.0));
    }

    #[test]
    fn step_advances_along_section() {
        let p = Pos::new(2, 5);
        assert_eq!(p.step(Direction::Across), Pos::new(3, 5));
        assert_eq!(p.step(Direction::Down), Pos::new(2, 6));
    }
}
