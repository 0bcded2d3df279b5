use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vidfilter", version)]
struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a filter script to a media file (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the compiled ffmpeg filter graph without running ffmpeg.
    Graph(GraphArgs),
    /// Parse and validate a filter script, then list its actions.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input media file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output media file.
    #[arg(long)]
    out: PathBuf,

    /// Filter script with one cut/mute per line.
    #[arg(long)]
    filter: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, short = 'f')]
    force: bool,

    /// ffmpeg executable to run.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// lavfi source used for muted audio.
    #[arg(long, default_value = vidfilter::DEFAULT_SILENCE_SOURCE)]
    silence: String,
}

#[derive(Parser, Debug)]
struct GraphArgs {
    /// Filter script with one cut/mute per line.
    #[arg(long)]
    filter: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Filter script with one cut/mute per line.
    #[arg(long)]
    filter: PathBuf,

    /// Print the actions as JSON instead of one line each.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Graph(args) => cmd_graph(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "vidfilter=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_filter_script(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("read filter script '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let script = read_filter_script(&args.filter)?;
    let graph = vidfilter::compile_filter_graph(&script)
        .with_context(|| format!("compile filter script '{}'", args.filter.display()))?;

    let opts = vidfilter::FfmpegJobOpts {
        ffmpeg_bin: args.ffmpeg,
        silence_source: args.silence,
        ..vidfilter::FfmpegJobOpts::new(&args.in_path, &args.out).with_overwrite(args.force)
    };
    vidfilter::run_ffmpeg(&opts, &graph)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_graph(args: GraphArgs) -> anyhow::Result<()> {
    let script = read_filter_script(&args.filter)?;
    let graph = vidfilter::compile_filter_script(&script)
        .with_context(|| format!("compile filter script '{}'", args.filter.display()))?;
    println!("{graph}");
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let script = read_filter_script(&args.filter)?;
    let actions = vidfilter::parse_filter_script(&script)
        .with_context(|| format!("check filter script '{}'", args.filter.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&actions).context("serialize actions")?;
        println!("{json}");
        return Ok(());
    }

    for act in &actions {
        let mut line = format!(
            "line {:>3}: {:<4} {} - {}",
            act.line, act.verb, act.start, act.end
        );
        if !act.annotation.is_empty() {
            line.push_str(&format!(" ({})", act.annotation));
        }
        println!("{line}");
    }
    eprintln!("{} action(s) ok", actions.len());
    Ok(())
}
