use crate::{encode_move, to_number, Cell, Player, SuperBoard};

const BIG_X: [&str; 5] = [
    "   X    X  ",
    "    X  X   ",
    "     XX    ",
    "    X  X   ",
    "   X    X  ",
];

const BIG_O: [&str; 5] = [
    "  OOOOOO   ",
    " O      O  ",
    " O      O  ",
    " O      O  ",
    "  OOOOOO   ",
];

/// Draws the board as text.
///
/// Captured sub-boards are drawn as one big letter. Empty cells show the global
/// move number to type if the move is currently legal.
pub fn visualize_board(board: &SuperBoard) -> String {
    let legal_moves = board.legal_moves();
    let mut lines = Vec::with_capacity(17);

    for by in 0..3 {
        for text_row in 0..5 {
            let mut line = String::new();
            for bx in 0..3 {
                let outer = to_number(bx, by);
                match board.outer().cell(outer).player() {
                    Some(Player::X) => line += BIG_X[text_row],
                    Some(Player::O) => line += BIG_O[text_row],
                    None if text_row % 2 == 0 => {
                        let gy = (text_row / 2) as u8;
                        let cells: Vec<String> = (0..3)
                            .map(|gx| {
                                let global_move = encode_move(outer, to_number(gx, gy));
                                let label = match board.cell(global_move) {
                                    Cell::Empty if legal_moves.contains(&global_move) => {
                                        global_move.to_string()
                                    }
                                    Cell::Empty => String::new(),
                                    Cell::X => String::from("X "),
                                    Cell::O => String::from("O "),
                                };
                                format!("{:>3}", label)
                            })
                            .collect();
                        line += &cells.join("|");
                    }
                    None => line += "---+---+---",
                }
                if bx != 2 {
                    line += " # ";
                }
            }
            lines.push(line);
        }
        if by != 2 {
            lines.push("#".repeat(39));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_shows_every_move() {
        let text = visualize_board(&SuperBoard::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert!(lines.iter().all(|line| line.chars().count() == 39));
        assert_eq!(lines[0], " 11| 12| 13 #  21| 22| 23 #  31| 32| 33");
        assert_eq!(lines[1], "---+---+--- # ---+---+--- # ---+---+---");
        assert_eq!(lines[5], "#".repeat(39));
        for m in SuperBoard::new().legal_moves() {
            assert!(text.contains(&m.to_string()));
        }
    }

    #[test]
    fn only_legal_moves_are_numbered() {
        let mut board = SuperBoard::new();
        assert!(board.apply_move(55, Player::X));
        let text = visualize_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        // The centre row of the centre sub-board
        assert_eq!(lines[8], "   |   |    #  54| X | 56 #    |   |   ");
        assert!(!text.contains("11"));
    }

    #[test]
    fn captured_sub_board_is_a_big_letter() {
        let mut board = SuperBoard::new();
        for (m, player) in [
            (12, Player::X),
            (21, Player::O),
            (15, Player::X),
            (51, Player::O),
            (18, Player::X),
        ] {
            assert!(board.apply_move(m, player));
        }
        let text = visualize_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        for (row, big) in BIG_X.iter().enumerate() {
            assert!(lines[row].starts_with(big));
        }
    }
}
