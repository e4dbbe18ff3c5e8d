//! Face side labels and side-indexed pairs.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Side of a face.
///
/// LEFT is the neighbour the face normal points away from, RIGHT the one
/// it points into. Partition faces only have a LEFT neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, LEFT first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Position in two-element arrays (LEFT = 0, RIGHT = 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// The other side.
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "LEFT"),
            Side::Right => write!(f, "RIGHT"),
        }
    }
}

/// A value for each side of a face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidePair<T> {
    pub left: T,
    pub right: T,
}

impl<T> SidePair<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Same value on both sides.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            left: value.clone(),
            right: value,
        }
    }

    /// Map a function over both sides.
    pub fn map<U, F>(self, mut f: F) -> SidePair<U>
    where
        F: FnMut(T) -> U,
    {
        SidePair {
            left: f(self.left),
            right: f(self.right),
        }
    }

    /// Swap LEFT and RIGHT.
    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    /// Iterate LEFT then RIGHT.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.left, &self.right].into_iter()
    }
}

impl<T> Index<Side> for SidePair<T> {
    type Output = T;

    #[inline]
    fn index(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Side> for SidePair<T> {
    #[inline]
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl<T> From<[T; 2]> for SidePair<T> {
    fn from([left, right]: [T; 2]) -> Self {
        Self { left, right }
    }
}

impl<T> From<SidePair<T>> for [T; 2] {
    fn from(pair: SidePair<T>) -> Self {
        [pair.left, pair.right]
    }
}
