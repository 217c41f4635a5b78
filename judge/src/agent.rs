use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use anyhow::bail;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use uttt::{Player, SuperBoard};

/// Something that picks moves: a person at the console, a built-in policy, or
/// a bot running in another process.
pub trait Agent {
    fn name(&self) -> &str;

    /// Called once before each game.
    fn new_game(&mut self, _player: Player) -> anyhow::Result<()> {
        Ok(())
    }

    /// Proposes a global move for `player`.
    ///
    /// The proposal is not required to be legal, the judge validates it. An
    /// error means the agent could not be reached at all.
    fn propose(&mut self, board: &SuperBoard, player: Player) -> anyhow::Result<u8>;

    /// Called once when the agent is no longer needed.
    fn bye(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Whether the agent prints the board itself before proposing a move.
    fn shows_board(&self) -> bool {
        false
    }
}

/// Reads moves typed at the console.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    buf: String,
}

impl HumanAgent<BufReader<Stdin>, Stdout> {
    /// Reads from stdin without holding its lock, so that two humans can
    /// share the console.
    pub fn stdio() -> Self {
        // Stdin buffers internally. A capacity of one keeps this reader from
        // taking lines meant for another agent.
        Self::new(
            BufReader::with_capacity(1, std::io::stdin()),
            std::io::stdout(),
        )
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: String::new(),
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn propose(&mut self, board: &SuperBoard, player: Player) -> anyhow::Result<u8> {
        writeln!(self.output, "{}\n", board)?;
        loop {
            write!(self.output, "Move for {}: ", player)?;
            self.output.flush()?;
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                bail!("Console input was closed");
            }
            match self.buf.trim().parse::<u8>() {
                Ok(global_move) => return Ok(global_move),
                Err(_) => writeln!(
                    self.output,
                    "Please type the number shown on the board, like 55."
                )?,
            }
        }
    }

    fn shows_board(&self) -> bool {
        true
    }
}

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn propose(&mut self, board: &SuperBoard, _player: Player) -> anyhow::Result<u8> {
        match board.legal_moves().choose(&mut self.rng) {
            Some(&global_move) => Ok(global_move),
            None => bail!("There is no legal move left"),
        }
    }
}
