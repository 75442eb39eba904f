use rand::{SeedableRng, rngs::StdRng};
use twenty48_engine::{Board, Game, GameStatus, Move, Row, SpawnTable};

fn board(rows: [Row; 4]) -> Board {
    Board::from_rows(rows).unwrap()
}

fn non_zero(b: Board) -> usize {
    16 - b.count_empty()
}

#[test]
fn row_with_gap_moves_left_into_single_tile() {
    let start = board([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]);
    let mut game = Game::from_board(start, 0, SpawnTable::default(), StdRng::seed_from_u64(1));
    let outcome = game.apply(Move::Left);
    assert!(outcome.moved);
    assert_eq!(outcome.score_delta, 4);
    assert_eq!(game.score(), 4);
    let (shifted, _) = start.shift_with_score(Move::Left);
    assert_eq!(shifted.rows()[0], [4, 0, 0, 0]);
}

#[test]
fn row_moves_right_and_merges_once() {
    let start = board([[2, 0, 2, 4], [0; 4], [0; 4], [0; 4]]);
    let (shifted, delta) = start.shift_with_score(Move::Right);
    assert_eq!(shifted.rows()[0], [0, 0, 4, 4]);
    assert_eq!(delta, 4);
}

#[test]
fn three_in_a_row_merges_leftmost_pair_only() {
    let start = board([[2, 2, 2, 0], [2, 2, 2, 2], [0; 4], [0; 4]]);
    let (shifted, delta) = start.shift_with_score(Move::Left);
    assert_eq!(shifted.rows()[0], [4, 2, 0, 0]);
    assert_eq!(shifted.rows()[1], [4, 4, 0, 0]);
    assert_eq!(delta, 12);
}

#[test]
fn vertical_moves_work_on_columns() {
    let start = board([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0]]);
    let (up, delta) = start.shift_with_score(Move::Up);
    assert_eq!(up, board([[4, 0, 0, 0], [4, 0, 0, 0], [0; 4], [0; 4]]));
    assert_eq!(delta, 4);
    let (down, _) = start.shift_with_score(Move::Down);
    assert_eq!(down, board([[0; 4], [0; 4], [4, 0, 0, 0], [4, 0, 0, 0]]));
}

#[test]
fn every_accepted_move_adds_exactly_one_tile() {
    let mut game = Game::seeded(SpawnTable::default(), 2024);
    let mut accepted = 0;
    for step in 0..400 {
        if game.status() == GameStatus::Terminal {
            break;
        }
        let dir = Move::ALL[step % 4];
        let before = game.board();
        let (shifted, delta) = before.shift_with_score(dir);
        let score_before = game.score();
        let outcome = game.apply(dir);
        if shifted == before {
            assert!(!outcome.moved);
            assert_eq!(game.board(), before);
            continue;
        }
        accepted += 1;
        assert!(outcome.moved);
        assert_eq!(game.score(), score_before + delta);
        assert_eq!(non_zero(game.board()), non_zero(shifted) + 1);
        let spawned = outcome.spawned.expect("shifted board always has room");
        assert_eq!(shifted.get(spawned.row, spawned.col), 0);
        assert!([2, 4, 8].contains(&spawned.value));
        assert_eq!(outcome.status == GameStatus::Terminal, game.board().is_terminal());
    }
    assert!(accepted > 0);
}

#[test]
fn last_gap_filled_ends_the_game() {
    // One gap in the corner; its neighbours can never match a spawned 2, 4 or 8.
    let almost = board([[0, 16, 32, 64], [16, 32, 64, 128], [32, 64, 128, 256], [64, 128, 256, 512]]);
    assert!(!almost.is_terminal());
    let mut filled = almost;
    let mut rng = StdRng::seed_from_u64(77);
    let spawned = filled.spawn_tile(&SpawnTable::default(), &mut rng).unwrap();
    assert_eq!((spawned.row, spawned.col), (0, 0));
    assert!(filled.is_terminal());
}

#[test]
fn games_with_same_seed_replay_identically() {
    let mut a = Game::seeded(SpawnTable::default(), 99);
    let mut b = Game::seeded(SpawnTable::default(), 99);
    for dir in [Move::Left, Move::Up, Move::Right, Move::Down, Move::Left, Move::Up] {
        assert_eq!(a.apply(dir), b.apply(dir));
    }
    assert_eq!(a.view(), b.view());
}
