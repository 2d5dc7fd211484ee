//! Invariants that must hold for any seed and any action sequence.

use proptest::prelude::*;
use tetrs_engine::bag::{BAG_SIZE, Bag};
use tetrs_engine::grid::{EMPTY, HEIGHT, WIDTH};
use tetrs_engine::{Action, Board, Outcome, Rotation, RotationDirection, Shape};

fn assert_board_consistent(board: &Board) {
    let state = board.state();
    for row in state.iter() {
        for &cell in row {
            assert!(cell <= 7, "cell value {cell} out of range");
        }
    }

    assert!(board.next_pieces().len() >= BAG_SIZE);

    match board.current() {
        Some(piece) => {
            assert!(!board.dead());
            for (row, col) in piece.cells() {
                assert!((0..HEIGHT as i32).contains(&row));
                assert!((0..WIDTH as i32).contains(&col));
                assert_eq!(board.grid().get(row, col), Some(EMPTY));
            }
            assert_eq!(board.ghost_cells().len(), 4);
        }
        None => {
            assert!(board.dead());
            assert!(board.ghost_cells().is_empty());
        }
    }
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

#[test]
fn four_turns_return_to_start() {
    for shape in Shape::ALL {
        for rotation in Rotation::ALL {
            for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                let turned = (0..4).fold(rotation, |r, _| r.rotate(direction));
                assert_eq!(turned, rotation, "{shape:?}");
            }
            assert_eq!(rotation.cw().ccw(), rotation);
        }
    }
}

proptest! {
    #[test]
    fn random_play_keeps_board_consistent(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..200),
    ) {
        let mut board = Board::with_seed(seed);
        assert_board_consistent(&board);

        let mut score = board.score();
        let mut lines = board.lines_cleared();
        for action in actions {
            let before = board.snapshot();
            let was_dead = before.dead;
            let outcome = board.act(action);

            if was_dead {
                prop_assert_eq!(outcome, Outcome::Rejected);
            }
            if outcome != Outcome::Applied {
                prop_assert_eq!(board.snapshot(), before);
            }

            assert_board_consistent(&board);
            prop_assert!(board.score() >= score);
            prop_assert!(board.lines_cleared() >= lines);
            score = board.score();
            lines = board.lines_cleared();
        }
    }

    #[test]
    fn junk_tokens_change_nothing(
        seed in any::<u64>(),
        token in "[a-z ]{0,6}",
    ) {
        prop_assume!(token.parse::<Action>().is_err());
        let mut board = Board::with_seed(seed);
        let before = board.snapshot();
        prop_assert_eq!(board.act_token(&token), Outcome::Rejected);
        prop_assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn bag_deals_permutations(seed in any::<u64>(), bags in 1usize..20) {
        let mut bag = Bag::with_seed(seed);
        for _ in 0..bags {
            let mut dealt: Vec<Shape> = (0..BAG_SIZE).map(|_| bag.next()).collect();
            dealt.sort_by_key(|shape| shape.id());
            prop_assert_eq!(dealt, Shape::ALL.to_vec());
        }
    }

    #[test]
    fn same_seed_same_game(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..100),
    ) {
        let mut a = Board::with_seed(seed);
        let mut b = Board::with_seed(seed);
        for action in actions {
            prop_assert_eq!(a.act(action), b.act(action));
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }
}
