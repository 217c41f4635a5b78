mod sub_board;

pub use sub_board::*;

use serde::{Deserialize, Serialize};

use crate::coords::is_grid_number;
use crate::{decode_move, encode_move, to_coord, Cell, Player, Status};

/// The full Ultimate Tic-Tac-Toe board: nine sub-boards and the outer grid.
///
/// Sub-boards are numbered 1 to 9 like the cells of a single grid, and a move is
/// the global move number `outer * 10 + inner`. After a move into cell `k`, the
/// opponent has to play in sub-board `k`, unless that sub-board is already
/// decided, in which case any sub-board may be played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuperBoard {
    /// Indexed as `boards[y][x]`.
    boards: [[SubBoard; 3]; 3],
    /// Cell `n` holds the player who captured sub-board `n`.
    ///
    /// A tied sub-board leaves its cell empty.
    outer: SubBoard,
    last_move: Option<u8>,
}

impl SuperBoard {
    /// Creates an empty board, with X to make the first move anywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sub-board with the given number, or `None` if it's not in 1 to 9.
    pub fn sub_board(&self, outer: u8) -> Option<&SubBoard> {
        if !is_grid_number(outer) {
            return None;
        }
        let (x, y) = to_coord(outer);
        Some(&self.boards[y as usize][x as usize])
    }

    /// The outer grid, recording who captured which sub-board.
    pub fn outer(&self) -> &SubBoard {
        &self.outer
    }

    /// The most recently applied global move.
    pub fn last_move(&self) -> Option<u8> {
        self.last_move
    }

    /// The content of the cell addressed by a global move.
    ///
    /// Malformed global moves are reported as empty.
    pub fn cell(&self, global_move: u8) -> Cell {
        decode_move(global_move)
            .and_then(|(outer, inner)| self.sub_board(outer).map(|board| board.cell(inner)))
            .unwrap_or(Cell::Empty)
    }

    /// The status of the sub-board itself, as opposed to its cell in the outer grid.
    ///
    /// Unlike the outer grid, this does report tied sub-boards.
    pub fn sub_board_status(&self, outer: u8) -> Option<Status> {
        self.sub_board(outer).map(SubBoard::status)
    }

    /// The sub-boards the next move may be played in.
    ///
    /// The cell number of the last move sends the next player to the sub-board
    /// with the same number. If that sub-board is captured, or has no empty cell
    /// left, the next player may pick any sub-board.
    pub fn active_sub_boards(&self) -> Vec<u8> {
        let Some(last_move) = self.last_move else {
            return (1..=9).collect();
        };
        let target = last_move % 10;
        let is_free_move = !self.outer.cell(target).is_empty()
            || self
                .sub_board(target)
                .map_or(true, |board| board.legal_moves().is_empty());
        if is_free_move {
            (1..=9).collect()
        } else {
            vec![target]
        }
    }

    /// All legal global moves, in ascending order.
    pub fn legal_moves(&self) -> Vec<u8> {
        let mut moves = Vec::with_capacity(81);
        for outer in self.active_sub_boards() {
            let (x, y) = to_coord(outer);
            moves.extend(
                self.boards[y as usize][x as usize]
                    .legal_moves()
                    .into_iter()
                    .map(|inner| encode_move(outer, inner)),
            );
        }
        moves
    }

    pub fn is_legal(&self, global_move: u8) -> bool {
        self.legal_moves().contains(&global_move)
    }

    /// Plays `global_move` for `player`.
    ///
    /// Returns `false` and leaves the board untouched if the move is not one of
    /// [`Self::legal_moves()`]. This covers malformed numbers, taken cells and
    /// sub-boards other than the active one alike.
    ///
    /// This does not check whose turn it is, or whether the game is already over.
    pub fn apply_move(&mut self, global_move: u8, player: Player) -> bool {
        if !self.is_legal(global_move) {
            return false;
        }
        let (outer, inner) = (global_move / 10, global_move % 10);
        let (x, y) = to_coord(outer);
        let board = &mut self.boards[y as usize][x as usize];

        let applied = board.apply_move(inner, player);
        if applied {
            self.last_move = Some(global_move);
        }
        // The outer cell is written at most once, so a captured sub-board keeps
        // its first owner.
        if let Status::WonBy(winner) = board.status() {
            self.outer.apply_move(outer, winner);
        }
        applied
    }

    /// The outcome of the game, decided by the outer grid.
    ///
    /// When no move is left anywhere but the outer grid has no line (some
    /// sub-boards ended in a tie), the game is a tie as well.
    pub fn winner(&self) -> Status {
        match self.outer.status() {
            Status::Open if self.legal_moves().is_empty() => Status::Tied,
            status => status,
        }
    }
}

impl std::fmt::Display for SuperBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::Position;
    use Player::{O, X};

    fn play(board: &mut SuperBoard, moves: &[u8]) {
        play_from(board, X, moves);
    }

    fn empty_cells(board: &SuperBoard) -> usize {
        (1..=9)
            .filter_map(|outer| board.sub_board(outer))
            .map(|b| b.legal_moves().len())
            .sum()
    }

    quickcheck! {
        fn legal_moves_are_sorted_and_empty(pos: Position) -> bool {
            let moves = pos.board.legal_moves();
            moves.windows(2).all(|w| w[0] < w[1])
                && moves.iter().all(|&m| decode_move(m).is_some() && pos.board.cell(m).is_empty())
        }

        fn next_moves_follow_the_last_cell(pos: Position) -> bool {
            let Some(last_move) = pos.board.last_move() else {
                return pos.board.legal_moves().len() == 81;
            };
            let k = last_move % 10;
            let sent_to = pos.board.sub_board(k).unwrap();
            let moves = pos.board.legal_moves();
            if pos.board.outer().cell(k).is_empty() && !sent_to.legal_moves().is_empty() {
                moves.iter().all(|&m| m / 10 == k)
            } else {
                // Free move: every sub-board with an empty cell contributes.
                (1..=9).all(|outer| {
                    let open = !pos.board.sub_board(outer).unwrap().legal_moves().is_empty();
                    open == moves.iter().any(|&m| m / 10 == outer)
                })
            }
        }

        fn accepted_move_takes_one_cell(pos: Position) -> bool {
            let mut board = pos.board.clone();
            match board.legal_moves().first() {
                Some(&m) => {
                    board.apply_move(m, pos.to_move)
                        && empty_cells(&board) + 1 == empty_cells(&pos.board)
                        && board.cell(m) == Cell::from(pos.to_move)
                        && board.last_move() == Some(m)
                }
                None => true,
            }
        }

        fn repeated_move_is_rejected(pos: Position) -> bool {
            match pos.moves.last() {
                Some(&m) => {
                    let mut board = pos.board.clone();
                    !board.apply_move(m, pos.to_move) && board == pos.board
                }
                None => true,
            }
        }

        fn captured_sub_boards_are_marked(pos: Position) -> bool {
            (1..=9).all(|outer| match pos.board.outer().cell(outer).player() {
                Some(_) => true,
                None => !matches!(
                    pos.board.sub_board_status(outer),
                    Some(Status::WonBy(_))
                ),
            })
        }
    }

    #[test]
    fn first_move_anywhere() {
        let board = SuperBoard::new();
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 81);
        assert_eq!(moves[0], 11);
        assert_eq!(moves[80], 99);
        assert_eq!(board.winner(), Status::Open);
        assert_eq!(board.last_move(), None);
    }

    #[test]
    fn sent_to_the_sub_board_of_the_last_cell() {
        let mut board = SuperBoard::new();
        assert!(board.apply_move(55, X));
        assert_eq!(board.last_move(), Some(55));
        let moves = board.legal_moves();
        assert_eq!(moves, vec![51, 52, 53, 54, 56, 57, 58, 59]);

        assert!(!board.apply_move(11, O));
        assert!(board.apply_move(51, O));
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|&m| m / 10 == 1));
    }

    #[test]
    fn malformed_moves_are_rejected() {
        let mut board = SuperBoard::new();
        for m in [0, 5, 10, 50, 100, 255] {
            assert!(!board.apply_move(m, X));
        }
        assert_eq!(board, SuperBoard::new());
    }

    #[test]
    fn same_move_twice() {
        let mut board = SuperBoard::new();
        assert!(board.apply_move(55, X));
        let before = board.clone();
        assert!(!board.apply_move(55, O));
        assert_eq!(board, before);
    }

    fn play_from(board: &mut SuperBoard, first: Player, moves: &[u8]) {
        let mut player = first;
        for &m in moves {
            assert!(board.apply_move(m, player), "move {} was rejected", m);
            player = player.opponent();
        }
    }

    /// Fills every cell but the first of a grid so that X taking cell 1 ties it:
    ///
    /// X O X
    /// X O O
    /// O X X
    fn almost_tied() -> SubBoard {
        let mut grid = SubBoard::new();
        for n in [3, 4, 8, 9] {
            assert!(grid.apply_move(n, X));
        }
        for n in [2, 5, 6, 7] {
            assert!(grid.apply_move(n, O));
        }
        grid
    }

    #[test]
    fn capture_marks_the_outer_grid() {
        let mut board = SuperBoard::new();
        play(&mut board, &[12, 21, 15, 51, 18]);
        // X holds 12, 15 and 18, the middle column of sub-board 1.
        assert_eq!(board.sub_board_status(1), Some(Status::WonBy(X)));
        assert_eq!(board.outer().cell(1), Cell::X);
        // The last move sent O to sub-board 8, which is still open.
        assert!(board.legal_moves().iter().all(|&m| m / 10 == 8));

        // Sending the next player into the captured sub-board is a free move.
        play_from(&mut board, O, &[81]);
        assert_eq!(board.active_sub_boards(), (1..=9).collect::<Vec<u8>>());
        let moves = board.legal_moves();
        assert!(moves.iter().any(|&m| m / 10 == 5));
        assert!(moves.iter().any(|&m| m / 10 == 9));
        assert!(moves.contains(&11));
    }

    #[test]
    fn captured_sub_board_keeps_its_first_owner() {
        let mut board = SuperBoard::new();
        play(&mut board, &[12, 21, 15, 51, 18]);
        assert_eq!(board.outer().cell(1), Cell::X);
        // O completes the left column of sub-board 1 during free moves.
        assert!(board.boards[0][0].apply_move(1, O));
        assert!(board.boards[0][0].apply_move(4, O));
        board.last_move = Some(81);
        assert!(board.apply_move(17, O));
        assert_eq!(board.outer().cell(1), Cell::X);
    }

    #[test]
    fn tied_sub_board_does_not_mark_the_outer_grid() {
        let mut board = SuperBoard::new();
        board.boards[0][0] = almost_tied();
        assert!(board.boards[0][1].apply_move(1, O));
        board.last_move = Some(21);

        assert_eq!(board.legal_moves(), vec![11]);
        assert!(board.apply_move(11, X));
        assert_eq!(board.sub_board_status(1), Some(Status::Tied));
        assert_eq!(board.outer().cell(1), Cell::Empty);

        // The move sent O to the full sub-board 1, so O may play anywhere else.
        assert_eq!(board.active_sub_boards(), (1..=9).collect::<Vec<u8>>());
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 81 - 9 - 1);
        assert!(moves.iter().all(|&m| m / 10 != 1));
        assert!(!board.apply_move(12, O));
        assert!(board.apply_move(99, O));
    }

    #[test]
    fn no_moves_left_is_a_tie() {
        let mut board = SuperBoard::new();
        for row in board.boards.iter_mut() {
            for grid in row.iter_mut() {
                *grid = almost_tied();
                assert!(grid.apply_move(1, X));
            }
        }
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.outer().status(), Status::Open);
        assert_eq!(board.winner(), Status::Tied);
    }

    #[test]
    fn outer_line_wins_the_game() {
        let mut board = SuperBoard::new();
        assert!(board.outer.apply_move(1, X));
        assert!(board.outer.apply_move(2, X));
        assert_eq!(board.winner(), Status::Open);
        assert!(board.outer.apply_move(3, X));
        assert_eq!(board.winner(), Status::WonBy(X));
    }
}
