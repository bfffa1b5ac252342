use core::fmt;

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Letter used as the prefix of display ids.
    pub const fn letter(self) -> char {
        match self {
            Player::One => 'A',
            Player::Two => 'B',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => f.write_str("P1"),
            Player::Two => f.write_str("P2"),
        }
    }
}

/// Discrete board coordinate expressed in tile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
    pub fn distance(self, other: Position) -> u32 {
        let dr = (self.row - other.row).unsigned_abs();
        let dc = (self.col - other.col).unsigned_abs();
        dr.max(dc)
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }

    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        self.offset(dr, dc)
    }

    /// Straight-line heading (orthogonal or exact diagonal) from `self` to `target`.
    pub fn direction_to(self, target: Position) -> Option<Direction> {
        let dr = target.row - self.row;
        let dc = target.col - self.col;
        if dr == 0 && dc == 0 {
            return None;
        }
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }
        Direction::from_delta(dr.signum(), dc.signum())
    }

    /// Coarse heading from `self` toward `target`, snapping each axis to its sign.
    pub fn heading_to(self, target: Position) -> Option<Direction> {
        Direction::from_delta(
            (target.row - self.row).signum(),
            (target.col - self.col).signum(),
        )
    }

    /// The eight surrounding tiles in compass order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().map(move |dir| self.step(dir))
    }

    /// Every tile within `radius` (inclusive), row-major.
    pub fn square(self, radius: i32) -> impl Iterator<Item = Position> {
        (-radius..=radius)
            .flat_map(move |dr| (-radius..=radius).map(move |dc| self.offset(dr, dc)))
    }

    /// Tiles at exactly `radius`, row-major.
    pub fn ring(self, radius: i32) -> impl Iterator<Item = Position> {
        self.square(radius)
            .filter(move |pos| self.distance(*pos) == radius.unsigned_abs())
    }

    /// Bresenham line from `self` to `target`, both endpoints included.
    pub fn line_to(self, target: Position) -> Vec<Position> {
        let mut points = Vec::new();
        let (mut row, mut col) = (self.row, self.col);
        let d_row = (target.row - row).abs();
        let d_col = (target.col - col).abs();
        let s_row = if target.row >= row { 1 } else { -1 };
        let s_col = if target.col >= col { 1 } else { -1 };
        let mut err = d_col - d_row;

        loop {
            points.push(Position::new(row, col));
            if row == target.row && col == target.col {
                break;
            }
            let e2 = 2 * err;
            if e2 > -d_row {
                err -= d_row;
                col += s_col;
            }
            if e2 < d_col {
                err += d_col;
                row += s_row;
            }
        }
        points
    }

    /// Tiles strictly between `self` and `target` on the Bresenham line.
    pub fn between(self, target: Position) -> Vec<Position> {
        let mut line = self.line_to(target);
        if line.len() <= 2 {
            return Vec::new();
        }
        line.pop();
        line.remove(0);
        line
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight compass headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(row, col)` delta of a single step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn from_delta(dr: i32, dc: i32) -> Option<Self> {
        match (dr, dc) {
            (-1, 0) => Some(Direction::North),
            (-1, 1) => Some(Direction::NorthEast),
            (0, 1) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (1, 0) => Some(Direction::South),
            (1, -1) => Some(Direction::SouthWest),
            (0, -1) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }
}

/// Generation-checked handle into the unit arena.
///
/// A handle outlives its unit only as a stale value: once the slot is vacated
/// the generation moves on and lookups through the old handle return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId {
    pub index: u32,
    pub generation: u32,
}

impl UnitId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)?;
        if self.generation > 0 {
            write!(f, "g{}", self.generation)?;
        }
        Ok(())
    }
}

/// Short label shown to players, e.g. `A1` or `B3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayId {
    pub owner: Player,
    pub ordinal: u8,
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.owner.letter(), self.ordinal)
    }
}
