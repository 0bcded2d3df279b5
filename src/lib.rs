//! vidfilter turns a hand-written list of timed edits into an ffmpeg filter graph.
//!
//! A filter script names ranges of a video to `cut` (drop both tracks) or `mute` (keep the
//! picture, silence the sound):
//!
//! ```text
//! cut  1:32-1:45
//! mute 2:19.2-2:19.85 (profanity:f-word)
//! ```
//!
//! # Pipeline overview
//!
//! 1. **Lex**: `&str -> Vec<Token>` with a four-field per-line state machine
//! 2. **Build**: `Vec<Token> -> Vec<Action>` (verb lookup, time and annotation parsing)
//! 3. **Validate**: ordering, minimum length and minimum gap across the list
//! 4. **Compile**: `&[Action] -> FilterGraph`, rendered as the `-filter_complex` expression
//! 5. **Encode** (optional): run the system `ffmpeg` binary with the graph
//!
//! Steps 1-4 are pure and reachable through [`compile_filter_script`]; every failure is a
//! structured [`VidfilterError`] carrying the source line and, for token errors, the column.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compile;
mod dsl;
mod encode;
mod foundation;
mod pipeline;
mod validate;

pub use compile::graph::{
    AUDIO_IN, AUDIO_OUT, AudioSource, FilterGraph, GraphNode, SILENCE_IN, SegmentRef, TrimSpan,
    VIDEO_IN, VIDEO_OUT, compile_graph,
};
pub use dsl::action::{Action, Verb, build_actions};
pub use dsl::annotation::{Annotation, AnnotationFormatError};
pub use dsl::lexer::{Field, Step, Token, lex};
pub use dsl::time::{Time, TimeParseError};
pub use encode::ffmpeg::{
    DEFAULT_SILENCE_SOURCE, FfmpegJobOpts, ensure_parent_dir, ffmpeg_args, is_ffmpeg_on_path,
    run_ffmpeg,
};
pub use foundation::error::{ErrorKind, TimeField, VidfilterError, VidfilterResult};
pub use pipeline::{compile_filter_graph, compile_filter_script, parse_filter_script};
pub use validate::segments::{SEGMENT_THRESHOLD_S, validate_segments};
