//! The static obstacle grid.
//!
//! A [`Grid`] is parsed once from a packed `0`/`1` string and never changes
//! afterwards. It only answers topology questions (bounds, walls, candidate
//! neighbours); all search bookkeeping lives in the engine.

use std::fmt;

use gridstar_core::{Point, Range};

/// Symbol for a walkable cell in the obstacle source.
pub const WALKABLE: char = '0';
/// Symbol for a wall cell in the obstacle source.
pub const WALL: char = '1';

/// Offsets of the orthogonal neighbours: left, right, down, up.
const ORTHOGONAL: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

/// Offsets of the diagonal neighbours: bottom-left, bottom-right, top-right,
/// top-left.
const DIAGONAL: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
];

/// One grid cell: its coordinates and whether it blocks movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pos: Point,
    wall: bool,
}

impl Cell {
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }
}

/// A fixed-size 2D array of walkable and wall cells.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Parse a grid of `height` rows and `width` columns.
    ///
    /// `[`, `]`, `,` and whitespace in `source` are ignored. What remains
    /// must be exactly `height * width` symbols, each [`WALKABLE`] or
    /// [`WALL`], in row-major order: the symbol at index `y * width + x`
    /// becomes cell `(x, y)`.
    pub fn new(height: i32, width: i32, source: &str) -> Result<Self, MapError> {
        if height < 0 || width < 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }

        let symbols: Vec<char> = source
            .chars()
            .filter(|&c| !is_separator(c))
            .collect();

        let expected = height as usize * width as usize;
        if symbols.len() != expected {
            return Err(MapError::LengthMismatch {
                expected,
                actual: symbols.len(),
            });
        }
        if let Some((index, &symbol)) = symbols
            .iter()
            .enumerate()
            .find(|&(_, &c)| c != WALKABLE && c != WALL)
        {
            return Err(MapError::InvalidSymbol { symbol, index });
        }

        let bounds = Range::sized(width, height);
        let cells = bounds
            .iter()
            .zip(symbols)
            .map(|(pos, c)| Cell {
                pos,
                wall: c == WALL,
            })
            .collect();
        Ok(Self { cells, bounds })
    }

    /// The rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Whether `p` is a wall. Out-of-range points are not walls; use
    /// [`is_walkable`](Self::is_walkable) to test both at once.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(Cell::is_wall)
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(|c| !c.is_wall())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Append the in-bounds orthogonal neighbours of `p` to `buf`, in the
    /// order left, right, down, up. Walls are included. The caller clears
    /// `buf` before calling.
    pub fn orthogonal_neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.push_offsets(p, &ORTHOGONAL, buf);
    }

    /// Append the in-bounds diagonal neighbours of `p` to `buf`, in the
    /// order bottom-left, bottom-right, top-right, top-left. Walls are
    /// included. The caller clears `buf` before calling.
    pub fn diagonal_neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.push_offsets(p, &DIAGONAL, buf);
    }

    fn push_offsets(&self, p: Point, offsets: &[Point], buf: &mut Vec<Point>) {
        buf.extend(
            offsets
                .iter()
                .map(|&d| p + d)
                .filter(|&n| self.bounds.contains(n)),
        );
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, '[' | ']' | ',') || c.is_ascii_whitespace()
}

/// Errors that can occur when parsing an obstacle string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A dimension is negative.
    InvalidDimensions { width: i32, height: i32 },
    /// The cleaned source does not hold `width * height` symbols.
    LengthMismatch { expected: usize, actual: usize },
    /// A symbol other than [`WALKABLE`] or [`WALL`] was found at `index`
    /// of the cleaned source.
    InvalidSymbol { symbol: char, index: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "map: invalid dimensions {width}x{height}")
            }
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "map: expected {expected} symbols for the given dimensions, found {actual}"
            ),
            Self::InvalidSymbol { symbol, index } => write!(
                f,
                "map: invalid symbol \u{201c}{symbol}\u{201d} at index {index}, \
                 only '{WALKABLE}' and '{WALL}' are allowed"
            ),
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::{MAP_25X25, MAP_50X50};

    const ROOM: &str = "\
1111
1001
1001
1111";

    fn neighbors_of(g: &Grid, p: Point, diagonal: bool) -> Vec<Point> {
        let mut buf = Vec::new();
        if diagonal {
            g.diagonal_neighbors(p, &mut buf);
        } else {
            g.orthogonal_neighbors(p, &mut buf);
        }
        buf
    }

    #[test]
    fn load_fixtures() {
        let g = Grid::new(50, 50, MAP_50X50).unwrap();
        assert_eq!(g.len(), 50 * 50);
        assert_eq!(g.width(), 50);
        assert_eq!(g.height(), 50);

        let g = Grid::new(25, 25, MAP_25X25).unwrap();
        assert_eq!(g.len(), 25 * 25);
        assert_eq!(g.width(), 25);
        assert_eq!(g.height(), 25);
    }

    #[test]
    fn asymmetric_map() {
        let g = Grid::new(2, 3, "1,1,1,1,1,1").unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g.height(), 2);
        assert_eq!(g.width(), 3);
    }

    #[test]
    fn cell_coordinates_match_lookup() {
        let g = Grid::new(25, 25, MAP_25X25).unwrap();
        for p in g.bounds() {
            assert_eq!(g.cell_at(p).unwrap().pos(), p);
            assert_eq!(g.point(g.idx(p).unwrap()), p);
        }
        assert!(g.cell_at(Point::new(25, 0)).is_none());
        assert!(g.cell_at(Point::new(0, -1)).is_none());
    }

    #[test]
    fn row_major_layout() {
        let g = Grid::new(2, 3, "[[0,1,0],[0,0,1]]").unwrap();
        assert!(g.is_wall(Point::new(1, 0)));
        assert!(g.is_wall(Point::new(2, 1)));
        assert!(!g.is_wall(Point::new(0, 1)));
        let walls: Vec<_> = g.cells().filter(|c| c.is_wall()).map(Cell::pos).collect();
        assert_eq!(walls, vec![Point::new(1, 0), Point::new(2, 1)]);
    }

    #[test]
    fn multiline_source() {
        let g = Grid::new(4, 4, ROOM).unwrap();
        assert!(g.is_walkable(Point::new(1, 1)));
        assert!(!g.is_walkable(Point::new(0, 0)));
        assert!(!g.is_walkable(Point::new(4, 1)));
    }

    #[test]
    fn invalid_length() {
        assert_eq!(
            Grid::new(1, 1, "1,0,1,0,1").unwrap_err(),
            MapError::LengthMismatch {
                expected: 1,
                actual: 5
            }
        );
        assert!(matches!(
            Grid::new(3, 3, "0000"),
            Err(MapError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn invalid_symbol() {
        assert_eq!(
            Grid::new(2, 2, "1,2,1,0").unwrap_err(),
            MapError::InvalidSymbol {
                symbol: '2',
                index: 1
            }
        );
    }

    #[test]
    fn length_is_checked_before_symbols() {
        assert!(matches!(
            Grid::new(2, 2, "x"),
            Err(MapError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn negative_dimensions() {
        assert_eq!(
            Grid::new(-1, 2, "").unwrap_err(),
            MapError::InvalidDimensions {
                width: 2,
                height: -1
            }
        );
    }

    #[test]
    fn empty_grid() {
        let g = Grid::new(0, 0, "[]").unwrap();
        assert!(g.is_empty());
        assert!(!g.contains(Point::ZERO));
    }

    #[test]
    fn orthogonal_order_and_clipping() {
        let g = Grid::new(3, 3, "000000000").unwrap();
        assert_eq!(
            neighbors_of(&g, Point::new(1, 1), false),
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );
        assert_eq!(
            neighbors_of(&g, Point::new(0, 0), false),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
    }

    #[test]
    fn diagonal_order_and_clipping() {
        let g = Grid::new(3, 3, "000000000").unwrap();
        assert_eq!(
            neighbors_of(&g, Point::new(1, 1), true),
            vec![
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2),
            ]
        );
        assert_eq!(
            neighbors_of(&g, Point::new(2, 2), true),
            vec![Point::new(1, 1)]
        );
    }

    #[test]
    fn neighbors_include_walls() {
        let g = Grid::new(4, 4, ROOM).unwrap();
        let n = neighbors_of(&g, Point::new(1, 1), false);
        assert_eq!(n.len(), 4);
        assert!(n.iter().filter(|&&p| g.is_wall(p)).count() == 2);
    }

    #[test]
    fn neighbors_append() {
        let g = Grid::new(3, 3, "000000000").unwrap();
        let mut buf = vec![Point::new(9, 9)];
        g.orthogonal_neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf[0], Point::new(9, 9));
    }

    #[test]
    fn error_display() {
        let err = MapError::LengthMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "map: expected 4 symbols for the given dimensions, found 3"
        );
    }
}
