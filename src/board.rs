//! One player's private state: pin budget, ship placement, shot record
//! and the fleet assembled from placed pins.
//!
//! Placement merges the new cell into neighboring ships, removal shrinks
//! or splits the ship it leaves. Every operation validates completely
//! before mutating, so a rejected request never changes state.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::fleet::{adjacent_to, at_position, Fleet, FLEET_SIZE_ALLOWED};
use crate::grid::{off_board, FieldState, Grid};
use crate::ship::{Orientation, Ship, ShipType, SHIP_CLASSES};

/// Total pins per player, the sum of all legal ship lengths:
/// 5 + 4·2 + 3·3 + 2·4.
pub const PINS_TOTAL: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pins_available: i32,
    ships_map: Grid,
    shots_map: Grid,
    fleet: Fleet,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            pins_available: PINS_TOTAL,
            ships_map: Grid::new(),
            shots_map: Grid::new(),
            fleet: Fleet::new(),
        }
    }

    pub fn pins_available(&self) -> i32 {
        self.pins_available
    }

    /// Own placement, with hit markers overlaid once play starts.
    pub fn ships_map(&self) -> &Grid {
        &self.ships_map
    }

    /// Outcomes of the shots this player has fired at the opponent.
    pub fn shots_map(&self) -> &Grid {
        &self.shots_map
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Place one pin at (`x`, `y`). An isolated pin founds a new ship;
    /// a connected pin is merged with its neighboring ships.
    pub fn place_pin(&mut self, x: i32, y: i32) -> Result<(), GameError> {
        if self.pins_available <= 0 {
            return Err(GameError::Invalid(
                "all pins have already been placed".into(),
            ));
        }
        if off_board(x, y)
            || self.ships_map.get(x, y) != FieldState::Empty
            || self.ships_map.any_diagonal_is(x, y, FieldState::Pin)
        {
            return Err(GameError::Illegal(format!(
                "a pin cannot be placed at ({x}, {y})"
            )));
        }

        if self.isolated(x, y) {
            // The final fleet slot is reserved for ships that grow out of
            // an existing run; it can never be founded by a lone pin.
            if self.fleet.len() >= FLEET_SIZE_ALLOWED - 1 {
                return Err(GameError::Illegal(format!(
                    "no new ship may be founded at ({x}, {y})"
                )));
            }
            self.commit_pin(x, y);
            self.fleet.push(Ship::new(x, y));
            return Ok(());
        }

        // A single new cell can touch at most two distinct ships.
        let neighbors = self.fleet.indices_where(adjacent_to(x, y));
        if neighbors.is_empty() || neighbors.len() > 2 {
            return Err(GameError::Illegal(format!(
                "the pin at ({x}, {y}) cannot be merged into the fleet"
            )));
        }
        let ships: Vec<&Ship> = neighbors.iter().filter_map(|&i| self.fleet.get(i)).collect();
        let merged = Ship::new(x, y).merge(&ships)?;

        self.fleet.remove_where(adjacent_to(x, y));
        self.fleet.push(merged);
        self.commit_pin(x, y);
        Ok(())
    }

    /// Take the pin at (`x`, `y`) back. Removing the last pin of a ship
    /// deletes it; otherwise the remaining parts split into up to two
    /// ships, neither of which keeps the removed cell.
    pub fn recover_pin(&mut self, x: i32, y: i32) -> Result<(), GameError> {
        if self.pins_available >= PINS_TOTAL {
            return Err(GameError::Invalid("no pins are currently placed".into()));
        }
        if self.ships_map.get(x, y) != FieldState::Pin {
            return Err(GameError::Illegal(format!("there is no pin at ({x}, {y})")));
        }

        let index = self.ship_index_at(x, y)?;
        let ship = self
            .fleet
            .get(index)
            .ok_or_else(|| GameError::NotFound(format!("no ship at ({x}, {y})")))?;

        // Only a recognized, complete ship may shed a pin. A lone pin is
        // always recoverable.
        if ship.len() > 1 && !ship.is_valid() {
            return Err(GameError::Illegal(format!(
                "the ship at ({x}, {y}) cannot be shortened"
            )));
        }
        let (left, right) = ship.split_at(x, y)?;

        self.fleet.remove_at(index);
        if let Some(segment) = left {
            self.fleet.push(segment);
        }
        if let Some(segment) = right {
            self.fleet.push(segment);
        }
        self.pins_available += 1;
        self.ships_map.set(x, y, FieldState::Empty);
        Ok(())
    }

    /// Place a complete ship of `ship_type` with its lead cell at
    /// (`x`, `y`), growing cell by cell. On any failure the pins placed so
    /// far are recovered, leaving the board untouched.
    pub fn place_ship(
        &mut self,
        ship_type: ShipType,
        x: i32,
        y: i32,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        let length = ship_type.length() as i32;
        if length < 2 {
            return Err(GameError::Invalid(format!(
                "cannot place a ship of type {ship_type:?}"
            )));
        }
        let vertical = match orientation {
            Orientation::Vertical => true,
            Orientation::Horizontal => false,
            _ => {
                return Err(GameError::Invalid(format!(
                    "cannot place a ship with orientation {orientation:?}"
                )))
            }
        };

        let cells: Vec<(i32, i32)> = (0..length)
            .map(|i| if vertical { (x, y + i) } else { (x + i, y) })
            .collect();
        for (placed, &(cx, cy)) in cells.iter().enumerate() {
            if let Err(err) = self.place_pin(cx, cy) {
                for &(rx, ry) in cells[..placed].iter().rev() {
                    let _ = self.recover_pin(rx, ry);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Whether (`x`, `y`) may be fired at: on the board and not tried before.
    pub fn can_attack(&self, x: i32, y: i32) -> Result<(), GameError> {
        if off_board(x, y) {
            return Err(GameError::Invalid(format!(
                "shot ({x}, {y}) is off the board"
            )));
        }
        if self.shots_map.get(x, y) != FieldState::Empty {
            return Err(GameError::Illegal(format!(
                "already tried to shoot at ({x}, {y})"
            )));
        }
        Ok(())
    }

    /// Resolve a shot against this board's own placement. A sunk ship is
    /// removed from the fleet; its hit markers stay on the ships-map.
    pub fn attack(&mut self, x: i32, y: i32) -> Result<FieldState, GameError> {
        if self.ships_map.get(x, y) != FieldState::Pin {
            return Ok(FieldState::Miss);
        }

        let index = self.ship_index_at(x, y)?;
        let ship = self
            .fleet
            .get_mut(index)
            .ok_or_else(|| GameError::NotFound(format!("no ship at ({x}, {y})")))?;
        let sunk = ship.hit(x, y);
        if sunk {
            self.fleet.remove_at(index);
        }
        self.ships_map.set(x, y, FieldState::Hit);
        Ok(FieldState::Hit)
    }

    /// Record the outcome of a shot this player fired at the opponent.
    pub fn track(&mut self, state: FieldState, x: i32, y: i32) {
        self.shots_map.set(x, y, state);
    }

    /// Check fleet composition. Partial setups are fine; what is placed
    /// must stay within the fleet size cap and the per-class quotas.
    pub fn valid_setup(&self) -> Result<(), GameError> {
        if self.fleet.is_empty() {
            return Ok(());
        }
        if self.fleet.len() > FLEET_SIZE_ALLOWED {
            return Err(GameError::Illegal(format!(
                "too many ships: {}",
                self.fleet.len()
            )));
        }
        for class in SHIP_CLASSES {
            let count = self.fleet.count_of(class);
            if count > class.quota() {
                return Err(GameError::Illegal(format!(
                    "too many ships of type {class:?}: {count}"
                )));
            }
        }
        Ok(())
    }

    /// The fleet is gone, every ship has been sunk.
    pub fn lost(&self) -> bool {
        self.fleet.is_empty()
    }

    fn commit_pin(&mut self, x: i32, y: i32) {
        self.pins_available -= 1;
        self.ships_map.set(x, y, FieldState::Pin);
    }

    /// Index of the single ship occupying (`x`, `y`).
    fn ship_index_at(&self, x: i32, y: i32) -> Result<usize, GameError> {
        let found = self.fleet.indices_where(at_position(x, y));
        match found.as_slice() {
            [index] => Ok(*index),
            [] => Err(GameError::NotFound(format!(
                "cannot find a ship at ({x}, {y})"
            ))),
            _ => Err(GameError::Ambiguous(format!(
                "multiple ships claim ({x}, {y})"
            ))),
        }
    }

    /// No pin in the full 8-cell neighborhood of (`x`, `y`).
    fn isolated(&self, x: i32, y: i32) -> bool {
        !self.ships_map.any_neighbor_is(x, y, FieldState::Pin)
    }
}
