//! The set of ships on one board, scanned with small predicate helpers.
//!
//! Fleets never exceed ten entries, so plain linear scans with
//! filter/remove-by-predicate are all the indexing this needs.

use serde::{Deserialize, Serialize};

use crate::ship::{Ship, ShipType};

/// Maximum number of ships in a complete fleet.
pub const FLEET_SIZE_ALLOWED: usize = 10;

/// Matches ships occupying (`x`, `y`).
pub fn at_position(x: i32, y: i32) -> impl Fn(&Ship) -> bool {
    move |ship| ship.is_at(x, y)
}

/// Matches ships with a part 4-directionally adjacent to (`x`, `y`).
pub fn adjacent_to(x: i32, y: i32) -> impl Fn(&Ship) -> bool {
    move |ship| ship.is_next_to(x, y)
}

/// Matches ships of the given class.
pub fn of_type(ship_type: ShipType) -> impl Fn(&Ship) -> bool {
    move |ship| ship.ship_type() == ship_type
}

/// An unordered collection of ships without duplicates. Membership changes
/// only through board placement, removal and attack resolution.
#[derive(Debug, Default, Clone, Eq, Serialize, Deserialize)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    pub fn push(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    pub fn get(&self, index: usize) -> Option<&Ship> {
        self.ships.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Ship> {
        self.ships.get_mut(index)
    }

    /// Indices of all ships matching `predicate`.
    pub fn indices_where<P: Fn(&Ship) -> bool>(&self, predicate: P) -> Vec<usize> {
        self.ships
            .iter()
            .enumerate()
            .filter(|(_, ship)| predicate(ship))
            .map(|(index, _)| index)
            .collect()
    }

    /// Drop every ship matching `predicate`.
    pub fn remove_where<P: Fn(&Ship) -> bool>(&mut self, predicate: P) {
        self.ships.retain(|ship| !predicate(ship));
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Ship> {
        if index < self.ships.len() {
            Some(self.ships.remove(index))
        } else {
            None
        }
    }

    pub fn count_of(&self, ship_type: ShipType) -> usize {
        self.indices_where(of_type(ship_type)).len()
    }

    /// Total number of cells occupied by the fleet.
    pub fn cells(&self) -> usize {
        self.ships.iter().map(Ship::len).sum()
    }

    /// Ships sorted by their lead part, for order-insensitive comparison.
    fn normalized(&self) -> Vec<&Ship> {
        let mut ships: Vec<&Ship> = self.ships.iter().collect();
        ships.sort_by_key(|ship| {
            ship.parts()
                .first()
                .map(|part| (part.y, part.x))
                .unwrap_or((0, 0))
        });
        ships
    }
}

/// Fleets are unordered, so equality ignores insertion order.
impl PartialEq for Fleet {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}
