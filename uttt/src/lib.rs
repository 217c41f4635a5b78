pub use board::*;
pub use coords::*;
pub use errors::*;
pub use player::*;
pub use protocol_types::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod coords;
mod errors;
mod player;
mod protocol_types;
mod visualization;
