use serde::{Deserialize, Serialize};

use crate::{Player, SuperBoard};

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { player: Player },
    /// Request to play the next move.
    ///
    /// The response should be a single global move number, e.g. `55`. It is
    /// validated by the judge, so an illegal move is not a protocol error.
    PlayTurn {
        /// The player the bot is moving for.
        player: Player,
        board: SuperBoard,
        /// All moves that are currently legal, in ascending order.
        legal_moves: Vec<u8>,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();
