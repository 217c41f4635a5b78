use uttt::{decode_move, SuperBoard};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Why a proposed move was rejected.
///
/// The board only accepts or rejects moves. The reason is worked out afterwards
/// from the board's public state, see [`IllegalMove::diagnose()`].
pub enum IllegalMove {
    /// The number is not two digits from 1 to 9.
    Malformed { global_move: u8 },
    /// The game already has a result.
    GameOver,
    /// The move is in a sub-board other than the one the player was sent to.
    NotActiveSubBoard { global_move: u8, expected: Vec<u8> },
    /// The move is in a sub-board that is captured or full, and the player was
    /// sent elsewhere.
    SubBoardDecided { global_move: u8, outer: u8 },
    CellOccupied { global_move: u8 },
}

impl IllegalMove {
    /// Explains a move that `board` rejected.
    pub fn diagnose(board: &SuperBoard, global_move: u8) -> Self {
        let Some((outer, _)) = decode_move(global_move) else {
            return IllegalMove::Malformed { global_move };
        };
        let expected = board.active_sub_boards();
        if !expected.contains(&outer) {
            let is_decided = !board.outer().cell(outer).is_empty()
                || board
                    .sub_board(outer)
                    .map_or(true, |sub_board| sub_board.legal_moves().is_empty());
            if is_decided {
                return IllegalMove::SubBoardDecided { global_move, outer };
            }
            return IllegalMove::NotActiveSubBoard {
                global_move,
                expected,
            };
        }
        // Well-formed and in an active sub-board, so only the cell itself is left.
        IllegalMove::CellOccupied { global_move }
    }
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::Malformed { global_move } => write!(
                f,
                "{} is not a move, expected a sub-board and a cell number from 1 to 9 like 55",
                global_move
            ),
            IllegalMove::GameOver => write!(f, "The game is already over"),
            IllegalMove::NotActiveSubBoard {
                global_move,
                expected,
            } => {
                if let [outer] = expected.as_slice() {
                    write!(
                        f,
                        "Move {} must be played in sub-board {}",
                        global_move, outer
                    )
                } else {
                    write!(
                        f,
                        "Move {} is not in one of the sub-boards {:?}",
                        global_move, expected
                    )
                }
            }
            IllegalMove::SubBoardDecided { global_move, outer } => write!(
                f,
                "Move {} is in sub-board {}, which is already decided",
                global_move, outer
            ),
            IllegalMove::CellOccupied { global_move } => {
                write!(f, "The cell of move {} is already taken", global_move)
            }
        }
    }
}
