pub mod chapter;
pub mod diff;
pub mod utility;
pub mod verse_content;
