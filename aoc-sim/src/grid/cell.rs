use std::fmt;

/// State of a single grid cell
///
/// `Floor` is absorbing: it never changes and never counts as a neighbor.
/// `Empty` and `Occupied` toggle according to the active [`Rules`](super::Rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Floor,
    Empty,
    Occupied,
}

impl CellState {
    /// Input/rendering symbol: `.`, `L` or `#`
    pub fn symbol(self) -> char {
        match self {
            CellState::Floor => '.',
            CellState::Empty => 'L',
            CellState::Occupied => '#',
        }
    }

    pub fn is_occupied(self) -> bool {
        self == CellState::Occupied
    }
}

/// Fails with the offending character
impl TryFrom<char> for CellState {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '.' => Ok(CellState::Floor),
            'L' => Ok(CellState::Empty),
            '#' => Ok(CellState::Occupied),
            other => Err(other),
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
