use quickcheck::Arbitrary;

use crate::{Player, Status, SuperBoard};

/// A position reached by playing random legal moves from the empty board.
#[derive(Clone, Debug)]
pub struct Position {
    pub board: SuperBoard,
    /// The moves that led to this position, in order.
    pub moves: Vec<u8>,
    /// The player whose turn it is.
    pub to_move: Player,
}

impl Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut board = SuperBoard::new();
        let mut moves = Vec::new();
        let mut to_move = Player::X;

        // Anything from the opening to the end of the game
        let num_moves = usize::arbitrary(g) % 82;
        while moves.len() < num_moves && board.winner() == Status::Open {
            let legal_moves = board.legal_moves();
            let Some(&m) = g.choose(&legal_moves) else {
                break;
            };
            assert!(board.apply_move(m, to_move));
            moves.push(m);
            to_move = to_move.opponent();
        }

        Position {
            board,
            moves,
            to_move,
        }
    }
}
