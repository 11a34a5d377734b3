use pinfleet::{random_fleet, Board, FieldState, GameError, BOARD_SIZE, PINS_TOTAL};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn pins_conserved(board: &Board) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        board.pins_available() + board.fleet().cells() as i32,
        PINS_TOTAL
    );
    prop_assert_eq!(
        board.ships_map().count(FieldState::Pin),
        board.fleet().cells()
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Placing and recovering in any order never loses or invents pins,
    /// and the ships map always mirrors the fleet.
    #[test]
    fn pin_budget_conserved_under_random_edits(
        ops in prop::collection::vec((0..2u8, 0..BOARD_SIZE, 0..BOARD_SIZE), 1..120)
    ) {
        let mut board = Board::new();
        for (op, x, y) in ops {
            let _ = match op {
                0 => board.place_pin(x, y),
                _ => board.recover_pin(x, y),
            };
            pins_conserved(&board)?;
        }
    }

    /// A successful placement is always undone exactly by recovering
    /// the same pin, whatever the board looked like before.
    #[test]
    fn recover_undoes_place(
        ops in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 0..40),
        x in 0..BOARD_SIZE,
        y in 0..BOARD_SIZE,
    ) {
        let mut board = Board::new();
        for (px, py) in ops {
            let _ = board.place_pin(px, py);
        }

        let before = board.clone();
        if board.place_pin(x, y).is_ok() {
            board.recover_pin(x, y)?;
            prop_assert_eq!(board, before);
        } else {
            // a rejected placement must not touch the board either
            prop_assert_eq!(board, before);
        }
    }

    /// No pin is ever accepted diagonally next to another.
    #[test]
    fn diagonal_placement_always_rejected(
        x in 1..BOARD_SIZE - 1,
        y in 1..BOARD_SIZE - 1,
        dx in prop::sample::select(vec![-1, 1]),
        dy in prop::sample::select(vec![-1, 1]),
    ) {
        let mut board = Board::new();
        board.place_pin(x, y)?;
        let err = board.place_pin(x + dx, y + dy).unwrap_err();
        prop_assert!(matches!(err, GameError::Illegal(_)));
    }

    /// Random setup always produces a complete legal fleet.
    #[test]
    fn random_fleet_is_always_complete(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        random_fleet(&mut board, &mut rng)?;

        prop_assert_eq!(board.pins_available(), 0);
        prop_assert_eq!(board.fleet().len(), 10);
        board.valid_setup()?;
        pins_conserved(&board)?;
    }
}
