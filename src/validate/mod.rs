//! Cross-action invariants checked before graph compilation.

pub mod segments;
