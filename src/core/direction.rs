// Horizontal direction helpers

/// Horizontal direction an actor is moving or facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Sign of the direction on the x axis (-1.0 for left, 1.0 for right)
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether a sprite facing this way must be mirrored.
    /// Sprite sheets are authored facing right.
    pub fn flip_x(self) -> bool {
        self == Self::Left
    }
}
