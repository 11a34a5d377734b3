//! The two-player game: identities, turn order, move history and the
//! setup → playing → won/lost state machine.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::GameError;
use crate::grid::FieldState;
use crate::setup::random_fleet;
use crate::ship::{Orientation, ShipType};

/// Placeholder identity until a second player joins.
const NOBODY: &str = "nobody";

/// A registered player. The id is assigned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<String>,
    pub name: String,
    pub score: i64,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            score: 0,
        }
    }
}

/// One entry of the append-only move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: String,
    pub x: i32,
    pub y: i32,
    pub hit: bool,
}

/// Game phase. Won and Lost are terminal and relative to player 1;
/// use [`Game::status_for`] for a per-player reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Setup,
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: Option<String>,
    status: Status,
    player1: Player,
    player2: Player,
    boards: HashMap<String, Board>,
    history: Vec<Move>,
    player_to_move: String,
}

impl Game {
    /// Open a new game for `player1`. The second board appears on join.
    pub fn new(player1: Player) -> Self {
        let mut boards = HashMap::new();
        boards.insert(player1.name.clone(), Board::new());
        Self {
            id: None,
            status: Status::Setup,
            player1,
            player2: Player::new(NOBODY),
            boards,
            history: Vec::new(),
            player_to_move: String::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Attach the opaque record id assigned by storage.
    pub fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The game status as seen by `player`. Terminal states flip for
    /// player 2, since the stored status is relative to player 1.
    pub fn status_for(&self, player: &str) -> Status {
        match self.status {
            Status::Won | Status::Lost => {
                let home_lost = self.status == Status::Lost;
                if home_lost == (player == self.player1.name) {
                    Status::Lost
                } else {
                    Status::Won
                }
            }
            status => status,
        }
    }

    pub fn player1(&self) -> &Player {
        &self.player1
    }

    pub fn player2(&self) -> &Player {
        &self.player2
    }

    pub fn player_to_move(&self) -> &str {
        &self.player_to_move
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn board(&self, player: &str) -> Option<&Board> {
        self.boards.get(player)
    }

    /// Seat `player2` at the empty side of the table.
    pub fn join(&mut self, player2: Player) -> Result<(), GameError> {
        if self.boards.len() > 1 {
            return Err(GameError::Illegal("the game is already full".into()));
        }
        if self.status != Status::Setup {
            return Err(GameError::Invalid("the game is no longer in setup".into()));
        }
        if self.boards.contains_key(&player2.name) {
            return Err(GameError::Illegal(format!(
                "{} has already joined the game",
                player2.name
            )));
        }
        self.boards.insert(player2.name.clone(), Board::new());
        self.player2 = player2;
        Ok(())
    }

    pub fn place_pin(&mut self, player: &str, x: i32, y: i32) -> Result<(), GameError> {
        self.setup_board(player)?.place_pin(x, y)
    }

    pub fn recover_pin(&mut self, player: &str, x: i32, y: i32) -> Result<(), GameError> {
        self.setup_board(player)?.recover_pin(x, y)
    }

    pub fn place_ship(
        &mut self,
        player: &str,
        ship_type: ShipType,
        x: i32,
        y: i32,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.setup_board(player)?.place_ship(ship_type, x, y, orientation)
    }

    /// Fill `player`'s board with a random full fleet.
    pub fn auto_setup<R: Rng>(&mut self, player: &str, rng: &mut R) -> Result<(), GameError> {
        let board = self.setup_board(player)?;
        random_fleet(board, rng)
    }

    /// Begin play with `player` to move first.
    pub fn start(&mut self, player: &str) -> Result<(), GameError> {
        self.can_start(player)?;
        self.player_to_move = player.to_string();
        self.status = Status::Playing;
        Ok(())
    }

    pub fn can_start(&self, player: &str) -> Result<(), GameError> {
        if self.status == Status::Playing {
            return Err(GameError::Invalid("the game has already started".into()));
        }
        self.valid_setup()?;
        if !self.all_pins_placed() {
            return Err(GameError::NotReady(
                "not every pin has been placed yet".into(),
            ));
        }
        if !self.boards.contains_key(player) {
            return Err(GameError::Illegal(format!(
                "{player} is not part of this game"
            )));
        }
        Ok(())
    }

    /// Check every board's fleet composition.
    pub fn valid_setup(&self) -> Result<(), GameError> {
        if self.status != Status::Setup {
            return Err(GameError::Invalid("the game is no longer in setup".into()));
        }
        for (name, board) in &self.boards {
            board
                .valid_setup()
                .map_err(|err| GameError::Invalid(format!("bad setup for {name}: {err}")))?;
        }
        Ok(())
    }

    /// Resolve one attack: validate the turn, fire at the opponent's board,
    /// track the outcome for the mover, log the move, update the status and
    /// pass the turn. Returns the shot outcome.
    pub fn make_move(&mut self, mv: Move) -> Result<FieldState, GameError> {
        if self.status != Status::Playing {
            return Err(GameError::NotReady("the game is not in play".into()));
        }
        if mv.player != self.player_to_move {
            return Err(GameError::Illegal(format!(
                "it is not your turn, {}",
                mv.player
            )));
        }

        let opponent = self.opponent(&mv.player).ok_or_else(|| {
            GameError::NotFound(format!("no opponent found for {}", mv.player))
        })?;
        self.known_board(&mv.player)?.can_attack(mv.x, mv.y)?;

        let result = self
            .boards
            .get_mut(&opponent)
            .ok_or_else(|| GameError::NotFound(format!("no board for {opponent}")))?
            .attack(mv.x, mv.y)?;
        if let Some(board) = self.boards.get_mut(&mv.player) {
            board.track(result, mv.x, mv.y);
        }

        // The log records what actually happened, not what the caller claims.
        self.history.push(Move {
            hit: result == FieldState::Hit,
            ..mv
        });
        self.update_status();
        if self.status == Status::Playing {
            self.player_to_move = opponent;
        }
        Ok(result)
    }

    fn update_status(&mut self) {
        if self.status != Status::Playing {
            return;
        }
        if let Some(board) = self.boards.get(&self.player1.name) {
            if board.lost() {
                self.status = Status::Lost;
            }
        }
        if let Some(board) = self.boards.get(&self.player2.name) {
            if board.lost() {
                self.status = Status::Won;
            }
        }
    }

    fn all_pins_placed(&self) -> bool {
        self.boards.values().all(|board| board.pins_available() == 0)
    }

    fn opponent(&self, player: &str) -> Option<String> {
        self.boards
            .keys()
            .find(|name| name.as_str() != player)
            .cloned()
    }

    fn known_board(&self, player: &str) -> Result<&Board, GameError> {
        self.boards
            .get(player)
            .ok_or_else(|| GameError::NotFound(format!("no board for {player}")))
    }

    /// Mutable board access for setup-phase operations.
    fn setup_board(&mut self, player: &str) -> Result<&mut Board, GameError> {
        if self.status != Status::Setup {
            return Err(GameError::Illegal(
                "pins can only be moved during setup".into(),
            ));
        }
        self.boards.get_mut(player).ok_or_else(|| {
            GameError::Illegal(format!("{player} is not part of this game"))
        })
    }
}
