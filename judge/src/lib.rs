mod agent;
mod error;
mod game;
mod process_agent;
mod recording;
mod registry;
pub use agent::*;
pub use error::*;
pub use game::*;
pub use process_agent::*;
pub use recording::*;
pub use registry::*;

/// Settings for playing games.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// How many rejected moves in a row a player may propose before losing the
    /// game. `None` keeps asking forever.
    pub max_illegal_attempts: Option<usize>,
    /// Print the board to stdout before every move and at the end.
    ///
    /// Agents that show the board themselves are not shown it twice.
    pub show_board: bool,
}
