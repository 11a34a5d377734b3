//! Persistence boundary: game records keyed by opaque string IDs and
//! player records keyed by name. The engine is agnostic to the backing
//! technology; the in-memory store here is the only implementation that
//! ships with the crate.

use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use crate::error::GameError;
use crate::game::{Game, Player};

pub trait Storage {
    fn create_player(&mut self, name: &str) -> Result<Player, GameError>;
    fn find_player(&self, name: &str) -> Result<Player, GameError>;

    fn create_game(&mut self, game: Game) -> Result<Game, GameError>;
    fn find_game(&self, id: &str) -> Result<Game, GameError>;
    fn update_game(&mut self, game: &Game) -> Result<Game, GameError>;
    fn delete_game(&mut self, id: &str) -> Result<(), GameError>;
    /// Stored games in creation order, `count` per page.
    fn query_games(&self, page: usize, count: usize) -> Result<Vec<Game>, GameError>;
}

/// Hash-map backed store. Games get a fresh v4 UUID on creation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: HashMap<String, Player>,
    games: HashMap<String, Game>,
    // creation order, for stable paging
    order: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn create_player(&mut self, name: &str) -> Result<Player, GameError> {
        if self.players.contains_key(name) {
            return Err(GameError::Illegal(format!(
                "player {name} already exists"
            )));
        }
        let player = Player {
            id: Some(Uuid::new_v4().to_string()),
            name: name.to_string(),
            score: 0,
        };
        self.players.insert(name.to_string(), player.clone());
        Ok(player)
    }

    fn find_player(&self, name: &str) -> Result<Player, GameError> {
        self.players
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::NotFound(format!("player {name}")))
    }

    fn create_game(&mut self, mut game: Game) -> Result<Game, GameError> {
        let id = Uuid::new_v4().to_string();
        debug!("storing game {id}");
        game.set_id(id.clone());
        self.order.push(id.clone());
        self.games.insert(id, game.clone());
        Ok(game)
    }

    fn find_game(&self, id: &str) -> Result<Game, GameError> {
        self.games
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::NotFound(format!("game {id}")))
    }

    fn update_game(&mut self, game: &Game) -> Result<Game, GameError> {
        let id = game
            .id()
            .ok_or_else(|| GameError::Invalid("the game has not been stored yet".into()))?;
        if !self.games.contains_key(id) {
            return Err(GameError::NotFound(format!("game {id}")));
        }
        self.games.insert(id.to_string(), game.clone());
        Ok(game.clone())
    }

    fn delete_game(&mut self, id: &str) -> Result<(), GameError> {
        if self.games.remove(id).is_none() {
            return Err(GameError::NotFound(format!("game {id}")));
        }
        self.order.retain(|stored| stored != id);
        Ok(())
    }

    fn query_games(&self, page: usize, count: usize) -> Result<Vec<Game>, GameError> {
        Ok(self
            .order
            .iter()
            .skip(page.saturating_mul(count))
            .take(count)
            .filter_map(|id| self.games.get(id).cloned())
            .collect())
    }
}
