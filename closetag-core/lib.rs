//! Character classes, line endings and lexical scanners shared by the
//! tag-closing engine.

pub mod chars;
pub mod line_ending;
pub mod scan;
