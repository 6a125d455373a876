pub mod line;
pub mod tokens;

pub use line::{InputLine, LineReader, ReadOutcome, StdinReader};
pub use tokens::{tokenize, TokenList, MAX_TOKENS};
