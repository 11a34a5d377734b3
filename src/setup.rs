//! Random full-fleet placement, driving the board's own pin engine so
//! every generated setup is legal by construction.

use rand::Rng;

use crate::board::{Board, PINS_TOTAL};
use crate::error::GameError;
use crate::grid::BOARD_SIZE;
use crate::ship::{Orientation, ShipType};

const PIECE_ATTEMPTS: usize = 200;
const BOARD_ATTEMPTS: usize = 100;

/// The eight ships placed whole, largest first. The two remaining
/// submarines are carved out of a shared corridor, because the tenth
/// fleet slot can never be founded by a lone pin.
const WHOLE_SHIPS: [ShipType; 8] = [
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Cruiser,
    ShipType::Destroyer,
    ShipType::Destroyer,
    ShipType::Destroyer,
    ShipType::Submarine,
    ShipType::Submarine,
];

/// Fill an untouched board with a complete random fleet: one battleship,
/// two cruisers, three destroyers and four submarines, all 30 pins placed.
pub fn random_fleet<R: Rng>(board: &mut Board, rng: &mut R) -> Result<(), GameError> {
    if board.pins_available() != PINS_TOTAL {
        return Err(GameError::Invalid(
            "random setup needs an untouched board".into(),
        ));
    }
    for _ in 0..BOARD_ATTEMPTS {
        let mut attempt = Board::new();
        if try_fill(&mut attempt, rng).is_ok() {
            *board = attempt;
            return Ok(());
        }
    }
    Err(GameError::Invalid(
        "unable to place a random fleet".into(),
    ))
}

fn try_fill<R: Rng>(board: &mut Board, rng: &mut R) -> Result<(), GameError> {
    for ship_type in WHOLE_SHIPS {
        place_randomly(board, rng, ship_type)?;
    }
    place_twin_submarines(board, rng)
}

fn place_randomly<R: Rng>(
    board: &mut Board,
    rng: &mut R,
    ship_type: ShipType,
) -> Result<(), GameError> {
    let length = ship_type.length() as i32;
    for _ in 0..PIECE_ATTEMPTS {
        let vertical: bool = rng.random();
        let (orientation, max_x, max_y) = if vertical {
            (Orientation::Vertical, BOARD_SIZE - 1, BOARD_SIZE - length)
        } else {
            (Orientation::Horizontal, BOARD_SIZE - length, BOARD_SIZE - 1)
        };
        let x = rng.random_range(0..=max_x);
        let y = rng.random_range(0..=max_y);
        if board.place_ship(ship_type, x, y, orientation).is_ok() {
            return Ok(());
        }
    }
    Err(GameError::Invalid(format!(
        "no room left for a {ship_type:?}"
    )))
}

/// Lay a four-pin run inside a five-cell corridor, recover its second
/// cell and grow the head backwards by one pin. The result is two
/// submarines separated by a single empty cell, with both late fleet
/// slots arising from an existing run.
fn place_twin_submarines<R: Rng>(board: &mut Board, rng: &mut R) -> Result<(), GameError> {
    for _ in 0..PIECE_ATTEMPTS {
        let vertical: bool = rng.random();
        let (max_x, max_y) = if vertical {
            (BOARD_SIZE - 1, BOARD_SIZE - 5)
        } else {
            (BOARD_SIZE - 5, BOARD_SIZE - 1)
        };
        let x = rng.random_range(0..=max_x);
        let y = rng.random_range(0..=max_y);
        let cell = |i: i32| if vertical { (x, y + i) } else { (x + i, y) };

        let (run_x, run_y) = cell(1);
        let orientation = if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        if board
            .place_ship(ShipType::Cruiser, run_x, run_y, orientation)
            .is_err()
        {
            continue;
        }

        let (gap_x, gap_y) = cell(2);
        let (head_x, head_y) = cell(0);
        if board.recover_pin(gap_x, gap_y).is_ok() && board.place_pin(head_x, head_y).is_ok() {
            return Ok(());
        }

        // The head cell clashed with a neighboring ship; take the
        // corridor back and try elsewhere.
        clear(board, &[cell(1), cell(2), cell(3), cell(4)]);
    }
    Err(GameError::Invalid(
        "no room left for the final submarines".into(),
    ))
}

/// Recover whatever pins of `cells` are still on the board.
fn clear(board: &mut Board, cells: &[(i32, i32)]) {
    let mut remaining = cells.to_vec();
    loop {
        let before = remaining.len();
        remaining.retain(|&(x, y)| board.recover_pin(x, y).is_err());
        if remaining.is_empty() || remaining.len() == before {
            break;
        }
    }
}
