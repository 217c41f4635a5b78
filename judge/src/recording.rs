use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uttt::Player;

/// Writes every game's moves as a JSON file into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    moves: Vec<RecordedMove>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            moves: Vec::new(),
        })
    }

    /// Stores a proposed move, including rejected ones.
    pub fn store_move(&mut self, player: Player, global_move: u8, accepted: bool) {
        self.moves.push(RecordedMove {
            player,
            global_move,
            accepted,
        });
    }

    /// Writes the moves stored since the last call to `game_<num>.json`.
    pub fn write_game_recording(
        &mut self,
        agents: [&str; 2],
        result: String,
    ) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let recording = GameRecording {
            x: String::from(agents[0]),
            o: String::from(agents[1]),
            moves: std::mem::take(&mut self.moves),
            result,
        };
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameRecording {
    pub x: String,
    pub o: String,
    pub moves: Vec<RecordedMove>,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedMove {
    pub player: Player,
    pub global_move: u8,
    pub accepted: bool,
}
