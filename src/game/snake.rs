use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// The snake entity: an ordered body (head at the front) mirrored by a hash
/// set so occupancy checks stay O(1) as the body grows.
#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

impl Snake {
    /// A fresh snake is a single cell; it grows only by eating.
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(start_pos);
        body_set.insert(start_pos);

        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: &Point) -> bool {
        self.body_set.contains(cell)
    }
}
