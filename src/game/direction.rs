/// A direction to slide and merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Number of clockwise rotations that turn this direction into Left.
    pub fn rotations(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Parse a move letter (`U`, `D`, `L`, `R`). Anything else is `None`.
    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    /// The letter this direction is parsed from
    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    /// Get direction name for display
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        assert_eq!(Direction::Left.rotations(), 0);
        assert_eq!(Direction::Down.rotations(), 1);
        assert_eq!(Direction::Right.rotations(), 2);
        assert_eq!(Direction::Up.rotations(), 3);
    }

    #[test]
    fn test_letter_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_letter(dir.letter()), Some(dir));
        }
    }

    #[test]
    fn test_unknown_letter() {
        assert_eq!(Direction::from_letter('X'), None);
        assert_eq!(Direction::from_letter('u'), None);
    }
}
