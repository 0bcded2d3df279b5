use std::fmt;

use crate::{
    dsl::action::{Action, Verb},
    dsl::time::Time,
    foundation::error::{VidfilterError, VidfilterResult},
};

/// Original video stream (input 0).
pub const VIDEO_IN: &str = "0:v";
/// Original audio stream (input 0).
pub const AUDIO_IN: &str = "0:a";
/// Synthetic silence (input 1).
pub const SILENCE_IN: &str = "1:a";
/// Terminal label of the edited video.
pub const VIDEO_OUT: &str = "outv";
/// Terminal label of the edited audio.
pub const AUDIO_OUT: &str = "outa";

/// Where a segment's audio comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioSource {
    /// The media's own audio track.
    Original,
    /// The silence input, used under a mute.
    Silence,
}

impl AudioSource {
    fn input(self) -> &'static str {
        match self {
            AudioSource::Original => AUDIO_IN,
            AudioSource::Silence => SILENCE_IN,
        }
    }
}

/// Bounds of a trim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrimSpan {
    /// `[0, end)`, written as a duration.
    Leading {
        /// Exclusive end.
        end: Time,
    },
    /// `[start, end)`.
    Between {
        /// Inclusive start.
        start: Time,
        /// Exclusive end.
        end: Time,
    },
    /// `[start, end of media)`.
    Trailing {
        /// Inclusive start.
        start: Time,
    },
}

impl fmt::Display for TrimSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrimSpan::Leading { end } => write!(f, "duration={}", end.seconds_string()),
            TrimSpan::Between { start, end } => write!(
                f,
                "start={}:end={}",
                start.seconds_string(),
                end.seconds_string()
            ),
            TrimSpan::Trailing { start } => write!(f, "start={}", start.seconds_string()),
        }
    }
}

/// Label pair a node writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentRef {
    /// `video<N>` / `audio<N>`.
    Index(u32),
    /// `outv` / `outa`.
    Output,
}

impl SegmentRef {
    fn video(self) -> String {
        match self {
            SegmentRef::Index(n) => format!("video{n}"),
            SegmentRef::Output => VIDEO_OUT.to_owned(),
        }
    }

    fn audio(self) -> String {
        match self {
            SegmentRef::Index(n) => format!("audio{n}"),
            SegmentRef::Output => AUDIO_OUT.to_owned(),
        }
    }
}

/// One video+audio statement pair in a [`FilterGraph`].
#[derive(Clone, Debug, PartialEq)]
pub enum GraphNode {
    /// Slice both tracks and reset their timestamps.
    Trim {
        /// Time bounds.
        span: TrimSpan,
        /// Audio input for the slice.
        audio: AudioSource,
        /// Output labels.
        out: SegmentRef,
    },
    /// Join two numbered segments end to end.
    Concat {
        /// Running accumulated segment.
        left: u32,
        /// Newly emitted segment.
        right: u32,
        /// Output labels.
        out: SegmentRef,
    },
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphNode::Trim { span, audio, out } => write!(
                f,
                "[{VIDEO_IN}]trim={span},setpts=PTS-STARTPTS[{}];[{}]atrim={span},asetpts=PTS-STARTPTS[{}]",
                out.video(),
                audio.input(),
                out.audio()
            ),
            GraphNode::Concat { left, right, out } => write!(
                f,
                "[video{left}][video{right}]concat[{}];[audio{left}][audio{right}]concat=v=0:a=1[{}]",
                out.video(),
                out.audio()
            ),
        }
    }
}

/// Compiled trim/concat chain, in emission order.
///
/// `Display` renders the `-filter_complex` expression: statements separated by `;`, with
/// the edited tracks on [`VIDEO_OUT`] and [`AUDIO_OUT`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterGraph {
    /// Nodes in the order they were emitted.
    pub nodes: Vec<GraphNode>,
}

impl FilterGraph {
    /// Number of trim nodes (segments cut from an input).
    pub fn segment_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, GraphNode::Trim { .. }))
            .count()
    }

    /// Trim nodes only, in order.
    pub fn trims(&self) -> impl Iterator<Item = (&TrimSpan, AudioSource)> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::Trim { span, audio, .. } => Some((span, *audio)),
            GraphNode::Concat { .. } => None,
        })
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Running state of one compilation: emitted nodes, next free label, accumulated label.
struct GraphBuilder {
    nodes: Vec<GraphNode>,
    next: u32,
    acc: Option<u32>,
}

impl GraphBuilder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next: 0,
            acc: None,
        }
    }

    fn alloc(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }

    /// Emit a trim and concatenate it onto the accumulated segment.
    fn append(&mut self, span: TrimSpan, audio: AudioSource) {
        let seg = self.alloc();
        self.nodes.push(GraphNode::Trim {
            span,
            audio,
            out: SegmentRef::Index(seg),
        });
        let acc = match self.acc {
            None => seg,
            Some(left) => {
                let out = self.alloc();
                self.nodes.push(GraphNode::Concat {
                    left,
                    right: seg,
                    out: SegmentRef::Index(out),
                });
                out
            }
        };
        self.acc = Some(acc);
    }

    fn finish(mut self, last_end: Time) -> FilterGraph {
        let span = TrimSpan::Trailing { start: last_end };
        match self.acc {
            None => self.nodes.push(GraphNode::Trim {
                span,
                audio: AudioSource::Original,
                out: SegmentRef::Output,
            }),
            Some(left) => {
                let seg = self.alloc();
                self.nodes.push(GraphNode::Trim {
                    span,
                    audio: AudioSource::Original,
                    out: SegmentRef::Index(seg),
                });
                self.nodes.push(GraphNode::Concat {
                    left,
                    right: seg,
                    out: SegmentRef::Output,
                });
            }
        }
        FilterGraph { nodes: self.nodes }
    }
}

/// Lower a validated action list into a trim/concat chain.
///
/// Kept media is sliced from the original tracks, cut ranges are skipped, and muted ranges
/// take their audio from the silence input. Each call starts its own label counter at zero.
#[tracing::instrument(skip(actions), fields(count = actions.len()))]
pub fn compile_graph(actions: &[Action]) -> VidfilterResult<FilterGraph> {
    let (Some(first), Some(last)) = (actions.first(), actions.last()) else {
        return Err(VidfilterError::EmptyActionList);
    };

    let mut builder = GraphBuilder::new();
    // `trim=duration=0` means "no limit" to ffmpeg, so a zero-length lead-in is left out.
    if !first.start.renders_as_zero() {
        builder.append(TrimSpan::Leading { end: first.start }, AudioSource::Original);
    }

    let builder = actions
        .iter()
        .enumerate()
        .fold(builder, |mut b, (i, act)| {
            let prev = i.checked_sub(1).map(|j| &actions[j]);
            let next = actions.get(i + 1);
            match act.verb {
                Verb::Cut => {
                    if let Some(prev) = prev {
                        b.append(
                            TrimSpan::Between {
                                start: prev.end,
                                end: act.start,
                            },
                            AudioSource::Original,
                        );
                    }
                    if let Some(next) = next
                        && next.verb != Verb::Cut
                    {
                        b.append(
                            TrimSpan::Between {
                                start: act.end,
                                end: next.start,
                            },
                            AudioSource::Original,
                        );
                    }
                }
                Verb::Mute => {
                    // A cut neighbour already emits the gap; two mutes in a row must do it here.
                    if let Some(prev) = prev
                        && prev.verb == Verb::Mute
                    {
                        b.append(
                            TrimSpan::Between {
                                start: prev.end,
                                end: act.start,
                            },
                            AudioSource::Original,
                        );
                    }
                    b.append(
                        TrimSpan::Between {
                            start: act.start,
                            end: act.end,
                        },
                        AudioSource::Silence,
                    );
                }
            }
            b
        });

    let graph = builder.finish(last.end);
    tracing::debug!(
        nodes = graph.nodes.len(),
        segments = graph.segment_count(),
        "compiled filter graph"
    );
    Ok(graph)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/graph.rs"]
mod tests;
