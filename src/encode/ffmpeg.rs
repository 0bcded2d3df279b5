use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    compile::graph::{AUDIO_OUT, FilterGraph, VIDEO_OUT},
    foundation::error::{VidfilterError, VidfilterResult},
};

/// Default lavfi source for the silence input.
pub const DEFAULT_SILENCE_SOURCE: &str = "anullsrc";

/// Options for one ffmpeg run.
#[derive(Clone, Debug)]
pub struct FfmpegJobOpts {
    /// Media to edit (ffmpeg input 0).
    pub input: PathBuf,
    /// Where to write the edited media.
    pub output: PathBuf,
    /// Replace `output` if it exists (`-y`); otherwise ffmpeg gets `-n`.
    pub overwrite: bool,
    /// ffmpeg executable, looked up on `PATH` when relative.
    pub ffmpeg_bin: PathBuf,
    /// lavfi description of the silence input (ffmpeg input 1).
    pub silence_source: String,
}

impl FfmpegJobOpts {
    /// Options for editing `input` into `output`, without overwriting.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            overwrite: false,
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            silence_source: DEFAULT_SILENCE_SOURCE.to_owned(),
        }
    }

    /// Builder-style toggle for [`FfmpegJobOpts::overwrite`].
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Reject option combinations ffmpeg would fail on late or destructively.
    pub fn validate(&self) -> VidfilterResult<()> {
        if self.input == self.output {
            return Err(VidfilterError::encode(format!(
                "input and output are the same file '{}'",
                self.input.display()
            )));
        }
        if self.silence_source.trim().is_empty() {
            return Err(VidfilterError::encode("silence source must not be empty"));
        }
        if !self.input.exists() {
            return Err(VidfilterError::encode(format!(
                "input file '{}' does not exist",
                self.input.display()
            )));
        }
        if !self.overwrite && self.output.exists() {
            return Err(VidfilterError::encode(format!(
                "output file '{}' already exists (pass --force to overwrite)",
                self.output.display()
            )));
        }
        Ok(())
    }
}

/// Full ffmpeg argument list for running `graph` with `opts`.
///
/// Input order matters: the graph reads the media as input 0 and silence as input 1.
pub fn ffmpeg_args(opts: &FfmpegJobOpts, graph: &str) -> Vec<OsString> {
    let overwrite_flag = if opts.overwrite { "-y" } else { "-n" };
    let mut args: Vec<OsString> = Vec::with_capacity(14);
    args.push(overwrite_flag.into());
    args.push("-i".into());
    args.push(opts.input.clone().into_os_string());
    args.push("-f".into());
    args.push("lavfi".into());
    args.push("-i".into());
    args.push(opts.silence_source.clone().into());
    args.push("-filter_complex".into());
    args.push(graph.into());
    args.push("-map".into());
    args.push(format!("[{VIDEO_OUT}]").into());
    args.push("-map".into());
    args.push(format!("[{AUDIO_OUT}]").into());
    args.push(opts.output.clone().into_os_string());
    args
}

/// True when `bin -version` runs and exits successfully.
pub fn is_ffmpeg_on_path(bin: &Path) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> VidfilterResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Run ffmpeg over `opts.input` with the compiled graph, streaming its output to ours.
///
/// Blocks until ffmpeg exits; a non-zero exit is an [`VidfilterError::Encode`].
#[tracing::instrument(skip(graph), fields(input = %opts.input.display(), output = %opts.output.display()))]
pub fn run_ffmpeg(opts: &FfmpegJobOpts, graph: &FilterGraph) -> VidfilterResult<()> {
    opts.validate()?;
    ensure_parent_dir(&opts.output)?;

    if !is_ffmpeg_on_path(&opts.ffmpeg_bin) {
        return Err(VidfilterError::encode(format!(
            "'{}' was not found or does not run (is ffmpeg installed and on PATH?)",
            opts.ffmpeg_bin.display()
        )));
    }

    let args = ffmpeg_args(opts, &graph.to_string());
    tracing::debug!(?args, "spawning ffmpeg");

    let status = Command::new(&opts.ffmpeg_bin)
        .args(&args)
        .status()
        .map_err(|e| VidfilterError::encode(format!("failed to spawn ffmpeg: {e}")))?;

    if !status.success() {
        return Err(VidfilterError::encode(format!(
            "ffmpeg exited with status {status}"
        )));
    }
    tracing::info!(output = %opts.output.display(), "ffmpeg finished");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
