//! Running the compiled graph through the system `ffmpeg` binary.

pub mod ffmpeg;
