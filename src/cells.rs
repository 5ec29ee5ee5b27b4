use std::fmt;

/// Neighbour flags held in the low six bits of a cell mask.
///
/// The positive directions occupy bits 0..3 and the negative directions bits 3..6, in x, y, z
/// order, so the flag for an axis is `POSITIVE_X << axis` or `NEGATIVE_X << axis`.
pub const POSITIVE_X: u8 = 1 << 0;
pub const POSITIVE_Y: u8 = 1 << 1;
pub const POSITIVE_Z: u8 = 1 << 2;
pub const NEGATIVE_X: u8 = 1 << 3;
pub const NEGATIVE_Y: u8 = 1 << 4;
pub const NEGATIVE_Z: u8 = 1 << 5;

/// All six connection bits.
pub const CONNECTION_MASK: u8 = 0b0011_1111;

/// Bits 6 and 7 are free for a generator's own bookkeeping while it runs.
pub const SCRATCH_MASK: u8 = !CONNECTION_MASK;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian3DCoordinate {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Cartesian3DCoordinate {
    pub fn new(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate { x, y, z }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (below zero or past `u32::MAX`).
    ///
    /// No upper bound is checked here, that depends on the grid.
    pub fn offset(self, direction: Direction) -> Option<Cartesian3DCoordinate> {
        let Cartesian3DCoordinate { x, y, z } = self;
        match direction {
            Direction::PositiveX => x.checked_add(1).map(|x| Cartesian3DCoordinate::new(x, y, z)),
            Direction::NegativeX => x.checked_sub(1).map(|x| Cartesian3DCoordinate::new(x, y, z)),
            Direction::PositiveY => y.checked_add(1).map(|y| Cartesian3DCoordinate::new(x, y, z)),
            Direction::NegativeY => y.checked_sub(1).map(|y| Cartesian3DCoordinate::new(x, y, z)),
            Direction::PositiveZ => z.checked_add(1).map(|z| Cartesian3DCoordinate::new(x, y, z)),
            Direction::NegativeZ => z.checked_sub(1).map(|z| Cartesian3DCoordinate::new(x, y, z)),
        }
    }
}

impl From<(u32, u32, u32)> for Cartesian3DCoordinate {
    fn from(x_y_z: (u32, u32, u32)) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x_y_z.0, x_y_z.1, x_y_z.2)
    }
}

impl fmt::Display for Cartesian3DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis in the grid strides, also the shift applied to the axis' flags.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Inverse of `index`. Only the low two bits are meaningful, 3 has no axis.
    #[inline]
    pub fn from_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    #[inline]
    pub fn positive(self) -> Direction {
        match self {
            Axis::X => Direction::PositiveX,
            Axis::Y => Direction::PositiveY,
            Axis::Z => Direction::PositiveZ,
        }
    }

    #[inline]
    pub fn negative(self) -> Direction {
        self.positive().opposite()
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [Direction::PositiveX,
                                     Direction::NegativeX,
                                     Direction::PositiveY,
                                     Direction::NegativeY,
                                     Direction::PositiveZ,
                                     Direction::NegativeZ];

    /// The neighbour flag recorded on a cell that has a passage in this direction.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Direction::PositiveX => POSITIVE_X,
            Direction::NegativeX => NEGATIVE_X,
            Direction::PositiveY => POSITIVE_Y,
            Direction::NegativeY => NEGATIVE_Y,
            Direction::PositiveZ => POSITIVE_Z,
            Direction::NegativeZ => NEGATIVE_Z,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::PositiveX => Direction::NegativeX,
            Direction::NegativeX => Direction::PositiveX,
            Direction::PositiveY => Direction::NegativeY,
            Direction::NegativeY => Direction::PositiveY,
            Direction::PositiveZ => Direction::NegativeZ,
            Direction::NegativeZ => Direction::PositiveZ,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::PositiveX | Direction::NegativeX => Axis::X,
            Direction::PositiveY | Direction::NegativeY => Axis::Y,
            Direction::PositiveZ | Direction::NegativeZ => Axis::Z,
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        match self {
            Direction::PositiveX | Direction::PositiveY | Direction::PositiveZ => true,
            _ => false,
        }
    }
}
