use std::cmp::Ordering;

use crate::request::Floor;

/// Travel direction of a request, and motion state of a car.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl Direction {
    /// Direction of travel needed to get from `from` to `to`.
    pub fn between(from: Floor, to: Floor) -> Self {
        match from.cmp(&to) {
            Ordering::Less => Direction::Up,
            Ordering::Greater => Direction::Down,
            Ordering::Equal => Direction::Idle,
        }
    }

    pub fn as_string(self) -> String {
        match self {
            Direction::Up => String::from("up"),
            Direction::Down => String::from("down"),
            Direction::Idle => String::from("idle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_compares_floors() {
        assert_eq!(Direction::between(1, 5), Direction::Up);
        assert_eq!(Direction::between(5, 1), Direction::Down);
        assert_eq!(Direction::between(3, 3), Direction::Idle);
        assert_eq!(Direction::between(-2, 0), Direction::Up);
    }
}
