use std::io::{BufRead, Write};

use uttt::{Okay, Player, Request, SuperBoard};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, player: Player);
    /// Returns a global move number. `legal_moves` is never empty.
    fn play_turn(&mut self, board: &SuperBoard, player: Player, legal_moves: &[u8]) -> u8;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        serve(self, stdin, stdout)
    }
}

/// Answers requests from `input` on `output` until EOF or [`Request::Bye`].
pub fn serve<B: Bot + ?Sized>(
    bot: &mut B,
    mut input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let mut buf = String::new();
    loop {
        // Read the next line into buf
        buf.clear(); // because read_line() appends to the buffer
        let num_bytes_read = input.read_line(&mut buf)?;
        if num_bytes_read == 0 {
            // 0 bytes read means EOF - the judge has exited.
            break Ok(());
        }

        let req = serde_json::from_str::<Request>(buf.trim_end())?;

        match req {
            Request::NewGame { player } => {
                bot.new_game(player);
                serde_json::to_writer(&mut output, &Okay())?;
            }
            Request::PlayTurn {
                player,
                board,
                legal_moves,
            } => serde_json::to_writer(
                &mut output,
                &bot.play_turn(&board, player, &legal_moves),
            )?,
            Request::Bye => break Ok(()),
        }
        writeln!(output)?;
        output.flush()?;
    }
}
