//! Text splitter implementations

mod token;

pub use token::{TokenSplitter, UnicodeWordTokenizer};
