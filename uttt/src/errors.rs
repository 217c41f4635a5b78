/// The error type for parsing a [`Player`](crate::Player) from its symbol.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsePlayerError {
    pub symbol: String,
}

impl std::error::Error for ParsePlayerError {}

impl std::fmt::Display for ParsePlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a player symbol, expected X or O", self.symbol)
    }
}
