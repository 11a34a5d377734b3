//! Ships assembled incrementally from individual grid cells.
//!
//! A ship is an ordered list of parts. Its type and orientation are never
//! set directly; they are re-derived from the part list after every
//! structural change (construction, merge, split).

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::FieldState;

/// One occupied cell belonging to a ship. The part state mirrors the cell
/// state on the owning board's ships-map and the two must always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPart {
    pub x: i32,
    pub y: i32,
    pub state: FieldState,
}

impl ShipPart {
    pub fn new(x: i32, y: i32, state: FieldState) -> Self {
        Self { x, y, state }
    }

    pub fn is(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Strict 4-directional adjacency. Diagonal neighbors do not count.
    pub fn is_next_to(&self, x: i32, y: i32) -> bool {
        (self.x == x && (self.y - y).abs() == 1) || (self.y == y && (self.x - x).abs() == 1)
    }
}

/// Ship classes, derived from part count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipType {
    Battleship,
    Cruiser,
    Destroyer,
    Submarine,
    /// Single-part transient: legally incomplete, but not illegal.
    Unknown,
    Invalid,
}

/// The four recognized classes, in descending length.
pub const SHIP_CLASSES: [ShipType; 4] = [
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Destroyer,
    ShipType::Submarine,
];

impl ShipType {
    /// Number of cells a complete ship of this class occupies.
    pub fn length(self) -> usize {
        match self {
            ShipType::Battleship => 5,
            ShipType::Cruiser => 4,
            ShipType::Destroyer => 3,
            ShipType::Submarine => 2,
            ShipType::Unknown => 1,
            ShipType::Invalid => 0,
        }
    }

    /// How many ships of this class a fleet may contain.
    pub fn quota(self) -> usize {
        match self {
            ShipType::Battleship => 1,
            ShipType::Cruiser => 2,
            ShipType::Destroyer => 3,
            ShipType::Submarine => 4,
            ShipType::Unknown | ShipType::Invalid => 0,
        }
    }

    fn from_len(len: usize) -> Self {
        match len {
            5 => ShipType::Battleship,
            4 => ShipType::Cruiser,
            3 => ShipType::Destroyer,
            2 => ShipType::Submarine,
            1 => ShipType::Unknown,
            _ => ShipType::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Too few parts to tell.
    Unknown,
    Invalid,
}

/// A contiguous, axis-aligned run of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    ship_type: ShipType,
    orientation: Orientation,
    parts: Vec<ShipPart>,
}

impl Ship {
    /// A fresh single-pin ship at (`x`, `y`).
    pub fn new(x: i32, y: i32) -> Self {
        Self::with_parts(vec![ShipPart::new(x, y, FieldState::Pin)])
    }

    /// Build a ship from an arbitrary part list and derive its properties.
    pub fn with_parts(parts: Vec<ShipPart>) -> Self {
        let mut ship = Self {
            ship_type: ShipType::Unknown,
            orientation: Orientation::Unknown,
            parts,
        };
        ship.adjust_properties();
        ship
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn parts(&self) -> &[ShipPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Mark the part at (`x`, `y`) as hit, if present. A miss on this ship
    /// is a silent no-op. Returns whether every part is now hit.
    pub fn hit(&mut self, x: i32, y: i32) -> bool {
        for part in &mut self.parts {
            if part.is(x, y) {
                part.state = FieldState::Hit;
            }
        }
        self.is_sunk()
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.parts.iter().any(|part| part.is(x, y))
    }

    pub fn is_next_to(&self, x: i32, y: i32) -> bool {
        self.parts.iter().any(|part| part.is_next_to(x, y))
    }

    pub fn is_sunk(&self) -> bool {
        self.parts.iter().all(|part| part.state == FieldState::Hit)
    }

    /// A valid ship has a recognized length, a single straight orientation
    /// and no gaps along its axis.
    pub fn is_valid(&self) -> bool {
        if matches!(self.ship_type, ShipType::Unknown | ShipType::Invalid) {
            return false;
        }
        if matches!(self.orientation, Orientation::Unknown | Orientation::Invalid) {
            return false;
        }
        self.has_no_gaps()
    }

    /// Whether the union of this ship and `others` forms one valid ship.
    pub fn can_merge_with(&self, others: &[&Ship]) -> bool {
        self.merge(others).is_ok()
    }

    /// Union the parts of this ship and `others` into one ship. Fails with
    /// `Illegal` if the union has gaps, mixed orientation or an
    /// unrecognized length.
    pub fn merge(&self, others: &[&Ship]) -> Result<Ship, GameError> {
        let mut parts = self.parts.clone();
        for other in others {
            parts.extend_from_slice(&other.parts);
        }
        let merged = Ship::with_parts(parts);
        if !merged.is_valid() {
            return Err(GameError::Illegal(format!(
                "cells do not form a single straight ship of length 2-5 (got {} parts)",
                merged.len()
            )));
        }
        Ok(merged)
    }

    /// Drop the part at (`x`, `y`) and divide the remainder into up to two
    /// ships, one per side of the removed cell. The removed part belongs to
    /// neither segment. A side with no parts yields no ship.
    pub fn split_at(&self, x: i32, y: i32) -> Result<(Option<Ship>, Option<Ship>), GameError> {
        let index = self
            .parts
            .iter()
            .position(|part| part.is(x, y))
            .ok_or_else(|| GameError::NotFound(format!("no ship part at ({x}, {y})")))?;

        let segment = |parts: &[ShipPart]| {
            if parts.is_empty() {
                None
            } else {
                Some(Ship::with_parts(parts.to_vec()))
            }
        };
        Ok((
            segment(&self.parts[..index]),
            segment(&self.parts[index + 1..]),
        ))
    }

    /// Re-derive sorting, orientation and type from the part list.
    fn adjust_properties(&mut self) {
        self.parts.sort_by_key(|part| (part.y, part.x));
        self.adjust_orientation();
        self.ship_type = ShipType::from_len(self.parts.len());
    }

    fn adjust_orientation(&mut self) {
        self.orientation = if self.parts.is_empty() {
            Orientation::Invalid
        } else if self.is_vertical_run() {
            Orientation::Vertical
        } else if self.is_horizontal_run() {
            Orientation::Horizontal
        } else {
            Orientation::Unknown
        };
    }

    fn is_vertical_run(&self) -> bool {
        self.parts.len() > 1 && self.parts.windows(2).all(|w| w[0].x == w[1].x)
    }

    fn is_horizontal_run(&self) -> bool {
        self.parts.len() > 1 && self.parts.windows(2).all(|w| w[0].y == w[1].y)
    }

    fn has_no_gaps(&self) -> bool {
        match self.orientation {
            Orientation::Horizontal => self.parts.windows(2).all(|w| w[1].x == w[0].x + 1),
            Orientation::Vertical => self.parts.windows(2).all(|w| w[1].y == w[0].y + 1),
            _ => false,
        }
    }
}
