use super::state::{Board, Cell, MAX_TILE, Move, Row, SIZE, Score};

/// Slide/merge tiles in the given direction. No randomness.
///
/// Returns the new board together with the score gained from merges.
pub fn shift(board: Board, direction: Move) -> (Board, Score) {
    match direction {
        Move::Left | Move::Right => shift_rows(board, direction),
        Move::Up | Move::Down => {
            let across = match direction {
                Move::Up => Move::Left,
                _ => Move::Right,
            };
            let (moved, delta) = shift_rows(transpose(board), across);
            (transpose(moved), delta)
        }
    }
}

pub(crate) fn transpose(board: Board) -> Board {
    let mut out = [[0; SIZE]; SIZE];
    for (r, row) in board.0.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            out[c][r] = value;
        }
    }
    Board(out)
}

/// Drop empty cells from `row`, keeping tile order, and pad with zeros on the right.
pub fn compress_row(row: Row) -> Row {
    let mut out = [0; SIZE];
    for (slot, value) in out.iter_mut().zip(row.into_iter().filter(|&v| v != 0)) {
        *slot = value;
    }
    out
}

/// Two cells can merge when they hold the same tile and its double is still a tile.
#[inline]
fn mergeable(a: Cell, b: Cell) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

/// Merge equal neighbours left to right, each tile at most once.
///
/// A merged pair becomes (double, 0) and the scan resumes after the pair, so
/// `[2, 2, 2, 0]` gives `[4, 2, 0, 0]` and never cascades. The holes left by
/// merges are closed before returning. The second value is the sum of the
/// merged tiles' new values.
pub fn merge_row(mut row: Row) -> (Row, Score) {
    let mut delta = 0;
    let mut i = 0;
    while i + 1 < SIZE {
        if mergeable(row[i], row[i + 1]) {
            row[i] *= 2;
            row[i + 1] = 0;
            delta += Score::from(row[i]);
            i += 2;
        } else {
            i += 1;
        }
    }
    (compress_row(row), delta)
}

/// compress -> merge -> compress. Merging runs on the compressed row so that
/// tiles separated only by gaps count as neighbours.
pub fn shift_row_left(row: Row) -> (Row, Score) {
    let (merged, delta) = merge_row(compress_row(row));
    (compress_row(merged), delta)
}

pub fn shift_row_right(mut row: Row) -> (Row, Score) {
    row.reverse();
    let (mut out, delta) = shift_row_left(row);
    out.reverse();
    (out, delta)
}

fn shift_rows(board: Board, move_dir: Move) -> (Board, Score) {
    let line_op: fn(Row) -> (Row, Score) = match move_dir {
        Move::Left => shift_row_left,
        Move::Right => shift_row_right,
        _ => unreachable!("shift_rows only handles left/right"),
    };
    let mut out = board.0;
    let mut total = 0;
    for row in out.iter_mut() {
        let (new_row, delta) = line_op(*row);
        *row = new_row;
        total += delta;
    }
    (Board(out), total)
}

/// True when the board has no empty cell and no two orthogonal neighbours
/// can merge.
pub fn is_terminal(board: Board) -> bool {
    if count_empty(board) > 0 {
        return false;
    }
    let cells = &board.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            if c + 1 < SIZE && mergeable(cells[r][c], cells[r][c + 1]) {
                return false;
            }
            if r + 1 < SIZE && mergeable(cells[r][c], cells[r + 1][c]) {
                return false;
            }
        }
    }
    true
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&v| v == 0).count()
}

pub fn get_highest_tile_val(board: Board) -> Cell {
    board.tiles().max().unwrap_or(0)
}

pub(crate) fn format_val(val: Cell) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
