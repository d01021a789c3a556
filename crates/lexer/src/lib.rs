mod comment;
mod cursor;
mod escape;
mod number;
mod reader;
mod string;

pub use number::parse_number;
pub use reader::{ElementTokens, Reader};
