//! Orchestration facade for presentation layers: player registration and
//! game lifecycle over an injected storage collaborator.

use log::info;

use crate::error::GameError;
use crate::game::{Game, Player};
use crate::storage::Storage;

pub struct Api<S: Storage> {
    store: S,
}

impl<S: Storage> Api<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_player(&self, name: &str) -> Result<Player, GameError> {
        self.store.find_player(name)
    }

    /// Look a player up by name, registering them on first contact.
    pub fn new_player(&mut self, name: &str) -> Result<Player, GameError> {
        match self.store.find_player(name) {
            Ok(player) => Ok(player),
            Err(GameError::NotFound(_)) => {
                info!("registering new player {name}");
                self.store.create_player(name)
            }
            Err(err) => Err(err),
        }
    }

    /// Open and persist a fresh game for an existing player.
    pub fn new_game(&mut self, player: &str) -> Result<Game, GameError> {
        let player = self.store.find_player(player)?;
        let game = self.store.create_game(Game::new(player))?;
        if let Some(id) = game.id() {
            info!("created game {id} for {}", game.player1().name);
        }
        Ok(game)
    }

    pub fn get_game(&self, id: &str) -> Result<Game, GameError> {
        self.store.find_game(id)
    }

    pub fn update_game(&mut self, game: &Game) -> Result<Game, GameError> {
        self.store.update_game(game)
    }

    pub fn delete_game(&mut self, id: &str) -> Result<(), GameError> {
        self.store.delete_game(id)
    }

    /// Page through stored games in creation order.
    pub fn games(&self, page: usize, count: usize) -> Result<Vec<Game>, GameError> {
        self.store.query_games(page, count)
    }
}
