use tracing::{debug, info};
use uttt::{Player, Status, SuperBoard};

use crate::error::IllegalMove;
use crate::recording::Recorder;
use crate::{Agent, Config};

pub enum GameResult {
    WonBy(Player),
    Tie,
    IllegalMoveByPlayer { player: Player, err: IllegalMove },
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WonBy(player) => write!(f, "{}", player),
            GameResult::Tie => write!(f, "Tie"),
            GameResult::IllegalMoveByPlayer { player, err } => {
                write!(f, "{} forfeits: {}", player, err)
            }
        }
    }
}

/// What happened to a single proposal.
#[derive(Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted { player: Player, global_move: u8 },
    /// The board was left unchanged and the same player is still on turn.
    Rejected {
        player: Player,
        global_move: u8,
        err: IllegalMove,
    },
}

/// A board together with the player who is on turn.
#[derive(Clone, Debug)]
pub struct Game {
    board: SuperBoard,
    current_player: Player,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// An empty board with X on turn.
    pub fn new() -> Self {
        Self {
            board: SuperBoard::new(),
            current_player: Player::X,
        }
    }

    pub fn board(&self) -> &SuperBoard {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> Status {
        self.board.winner()
    }

    /// Plays a move for the current player and hands the turn over.
    ///
    /// On error, nothing changes.
    pub fn play(&mut self, global_move: u8) -> Result<(), IllegalMove> {
        if self.outcome().is_decided() {
            return Err(IllegalMove::GameOver);
        }
        if self.board.apply_move(global_move, self.current_player) {
            self.current_player = self.current_player.opponent();
            Ok(())
        } else {
            Err(IllegalMove::diagnose(&self.board, global_move))
        }
    }

    /// Asks `agent` for a move for the current player and tries to play it.
    pub fn step(&mut self, agent: &mut dyn Agent) -> anyhow::Result<StepOutcome> {
        let player = self.current_player;
        let global_move = agent.propose(&self.board, player)?;
        Ok(match self.play(global_move) {
            Ok(()) => StepOutcome::Accepted {
                player,
                global_move,
            },
            Err(err) => StepOutcome::Rejected {
                player,
                global_move,
                err,
            },
        })
    }
}

/// Plays one game to the end, `x` moving first.
///
/// A rejected move is asked for again from the same player. With
/// `config.max_illegal_attempts` set, a player who is rejected that many times
/// in a row loses the game.
///
/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    x: &mut dyn Agent,
    o: &mut dyn Agent,
    config: &Config,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let names = [String::from(x.name()), String::from(o.name())];

    // Inform the agents about the new game, so that they can reset their state
    x.new_game(Player::X)?;
    o.new_game(Player::O)?;

    let mut game = Game::new();
    let mut illegal_attempts = 0;
    let mut forfeit = None;

    while game.outcome() == Status::Open {
        let agent: &mut dyn Agent = match game.current_player() {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        if config.show_board && !agent.shows_board() {
            println!("{}\n", game.board());
        }
        match game.step(agent)? {
            StepOutcome::Accepted {
                player,
                global_move,
            } => {
                debug!(%player, global_move, "Move accepted");
                illegal_attempts = 0;
                if let Some(rec) = recorder {
                    rec.store_move(player, global_move, true);
                }
            }
            StepOutcome::Rejected {
                player,
                global_move,
                err,
            } => {
                info!(%player, global_move, "Illegal move: {}", err);
                illegal_attempts += 1;
                if let Some(rec) = recorder {
                    rec.store_move(player, global_move, false);
                }
                if config
                    .max_illegal_attempts
                    .is_some_and(|max| illegal_attempts >= max)
                {
                    forfeit = Some(GameResult::IllegalMoveByPlayer { player, err });
                    break;
                }
            }
        }
    }

    if config.show_board {
        println!("{}\n", game.board());
    }

    let game_result = forfeit.unwrap_or(match game.outcome() {
        Status::WonBy(player) => GameResult::WonBy(player),
        _ => GameResult::Tie,
    });

    if let Some(rec) = recorder {
        rec.write_game_recording([names[0].as_str(), names[1].as_str()], game_result.to_string())?;
    }

    Ok(game_result)
}
