//! Lowering of validated actions into an ffmpeg filter graph.

pub mod graph;
