//! Filter-script front end: lexer, time and annotation parsers, action builder.
//!
//! A filter script holds one edit per line:
//!
//! ```text
//! cut  1:32-1:45
//! mute 2:19.2-2:19.85 (profanity:f-word)   # comments run to end of line
//! ```

pub mod action;
pub mod annotation;
pub mod lexer;
pub mod time;
