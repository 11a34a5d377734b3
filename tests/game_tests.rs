use pinfleet::{
    FieldState, Game, GameError, Move, Orientation, Player, ShipType, Status,
};

/// Cells of the fixed fleet layout used by `setup_player`, grouped so
/// that consecutive cells of one ship are adjacent in the list.
const FLEET_CELLS: [(i32, i32); 30] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4), // battleship
    (0, 6),
    (0, 7),
    (0, 8), // destroyer
    (2, 0),
    (2, 1),
    (2, 2),
    (2, 3), // cruiser
    (2, 5),
    (2, 6),
    (2, 7),
    (2, 8), // cruiser
    (4, 0),
    (4, 1),
    (4, 2), // destroyer
    (4, 4),
    (4, 5),
    (4, 6), // destroyer
    (4, 8),
    (4, 9), // submarine
    (6, 0),
    (6, 1), // submarine
    (6, 3),
    (6, 4), // submarine
    (6, 6),
    (6, 7), // submarine
];

fn setup_player(game: &mut Game, player: &str) {
    game.place_ship(player, ShipType::Battleship, 0, 0, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Destroyer, 0, 6, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Cruiser, 2, 0, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Cruiser, 2, 5, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Destroyer, 4, 0, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Destroyer, 4, 4, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Submarine, 4, 8, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Submarine, 6, 0, Orientation::Vertical)
        .unwrap();
    game.place_ship(player, ShipType::Cruiser, 6, 4, Orientation::Vertical)
        .unwrap();
    game.recover_pin(player, 6, 5).unwrap();
    game.place_pin(player, 6, 3).unwrap();
}

fn ready_game() -> Game {
    let mut game = Game::new(Player::new("alice"));
    game.join(Player::new("bob")).unwrap();
    setup_player(&mut game, "alice");
    setup_player(&mut game, "bob");
    game
}

fn mv(player: &str, x: i32, y: i32) -> Move {
    Move {
        player: player.to_string(),
        x,
        y,
        hit: false,
    }
}

#[test]
fn test_new_game_starts_in_setup() {
    let game = Game::new(Player::new("alice"));
    assert_eq!(game.status(), Status::Setup);
    assert_eq!(game.player1().name, "alice");
    assert!(game.board("alice").is_some());
    assert!(game.board("bob").is_none());
    assert!(game.history().is_empty());
    assert_eq!(game.status_for("alice"), Status::Setup);
}

#[test]
fn test_join_rules() {
    let mut game = Game::new(Player::new("alice"));

    // the opener cannot join their own game
    assert!(matches!(
        game.join(Player::new("alice")),
        Err(GameError::Illegal(_))
    ));

    game.join(Player::new("bob")).unwrap();
    assert_eq!(game.player2().name, "bob");
    assert!(game.board("bob").is_some());

    // a full game takes no third player
    assert!(matches!(
        game.join(Player::new("carol")),
        Err(GameError::Illegal(_))
    ));
}

#[test]
fn test_setup_operations_require_setup_phase_and_known_player() {
    let mut game = ready_game();
    assert!(matches!(
        game.place_pin("carol", 8, 8),
        Err(GameError::Illegal(_))
    ));

    game.start("alice").unwrap();
    assert!(matches!(
        game.place_pin("alice", 8, 8),
        Err(GameError::Illegal(_))
    ));
    assert!(matches!(
        game.recover_pin("alice", 0, 0),
        Err(GameError::Illegal(_))
    ));
}

#[test]
fn test_start_requires_all_pins_placed() {
    let mut game = Game::new(Player::new("alice"));
    game.join(Player::new("bob")).unwrap();
    setup_player(&mut game, "alice");

    // bob has not placed anything yet
    assert!(matches!(game.start("alice"), Err(GameError::NotReady(_))));

    setup_player(&mut game, "bob");
    assert!(matches!(game.start("carol"), Err(GameError::Illegal(_))));

    game.start("bob").unwrap();
    assert_eq!(game.status(), Status::Playing);
    assert_eq!(game.player_to_move(), "bob");

    // no second start
    assert!(matches!(game.start("bob"), Err(GameError::Invalid(_))));
}

#[test]
fn test_moves_rejected_before_start() {
    let mut game = ready_game();
    assert!(matches!(
        game.make_move(mv("alice", 0, 0)),
        Err(GameError::NotReady(_))
    ));
}

#[test]
fn test_turn_order_and_shot_guards() {
    let mut game = ready_game();
    game.start("alice").unwrap();

    // not bob's turn
    assert!(matches!(
        game.make_move(mv("bob", 0, 0)),
        Err(GameError::Illegal(_))
    ));

    // off-board shots are structurally invalid
    assert!(matches!(
        game.make_move(mv("alice", 10, 0)),
        Err(GameError::Invalid(_))
    ));
    assert!(matches!(
        game.make_move(mv("alice", 3, -1)),
        Err(GameError::Invalid(_))
    ));

    assert_eq!(game.make_move(mv("alice", 9, 9)).unwrap(), FieldState::Miss);
    assert_eq!(game.player_to_move(), "bob");

    assert_eq!(game.make_move(mv("bob", 0, 0)).unwrap(), FieldState::Hit);
    assert_eq!(game.player_to_move(), "alice");

    // alice may not fire at a cell she already tried
    assert!(matches!(
        game.make_move(mv("alice", 9, 9)),
        Err(GameError::Illegal(_))
    ));
}

#[test]
fn test_history_records_actual_outcome() {
    let mut game = ready_game();
    game.start("alice").unwrap();

    // the caller's hit claim is ignored
    let mut lying = mv("alice", 9, 9);
    lying.hit = true;
    game.make_move(lying).unwrap();

    game.make_move(mv("bob", 0, 0)).unwrap();

    assert_eq!(game.history().len(), 2);
    assert!(!game.history()[0].hit);
    assert_eq!(game.history()[0].player, "alice");
    assert!(game.history()[1].hit);
    assert_eq!(game.history()[1].player, "bob");
}

#[test]
fn test_full_game_to_the_last_pin() {
    let mut game = ready_game();
    game.start("alice").unwrap();

    // bob answers every alice shot with a miss into empty columns
    let mut misses = (7..10).flat_map(|x| (0..10).map(move |y| (x, y)));

    for (index, &(x, y)) in FLEET_CELLS.iter().enumerate() {
        assert_eq!(game.make_move(mv("alice", x, y)).unwrap(), FieldState::Hit);

        if index < FLEET_CELLS.len() - 1 {
            assert_eq!(game.player_to_move(), "bob");
            let (mx, my) = misses.next().unwrap();
            assert_eq!(game.make_move(mv("bob", mx, my)).unwrap(), FieldState::Miss);
            assert_eq!(game.player_to_move(), "alice");
        }
    }

    // bob's board (player 2) is empty, so the stored status reads Won
    assert_eq!(game.status(), Status::Won);
    assert_eq!(game.status_for("alice"), Status::Won);
    assert_eq!(game.status_for("bob"), Status::Lost);
    assert!(game.board("bob").unwrap().lost());
    assert!(!game.board("alice").unwrap().lost());
    assert_eq!(game.history().len(), 59);

    // terminal games accept no further moves
    assert!(matches!(
        game.make_move(mv("alice", 8, 8)),
        Err(GameError::NotReady(_))
    ));
}

#[test]
fn test_symmetric_outcome_when_player_one_loses() {
    let mut game = ready_game();
    game.start("bob").unwrap();

    let mut misses = (7..10).flat_map(|x| (0..10).map(move |y| (x, y)));
    for (index, &(x, y)) in FLEET_CELLS.iter().enumerate() {
        game.make_move(mv("bob", x, y)).unwrap();
        if index < FLEET_CELLS.len() - 1 {
            let (mx, my) = misses.next().unwrap();
            game.make_move(mv("alice", mx, my)).unwrap();
        }
    }

    assert_eq!(game.status(), Status::Lost);
    assert_eq!(game.status_for("alice"), Status::Lost);
    assert_eq!(game.status_for("bob"), Status::Won);
}

#[test]
fn test_join_after_setup_is_rejected() {
    let mut game = ready_game();
    game.start("alice").unwrap();
    // the board-count guard fires first on a full game
    assert!(matches!(
        game.join(Player::new("carol")),
        Err(GameError::Illegal(_))
    ));
}
