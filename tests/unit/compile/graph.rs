use super::*;
use crate::dsl::annotation::Annotation;
use crate::foundation::error::ErrorKind;

fn act(verb: Verb, start: f64, end: f64) -> Action {
    Action {
        line: 1,
        verb,
        start: Time::new(0, 0, start),
        end: Time::new(0, 0, end),
        annotation: Annotation::default(),
        tokens: Vec::new(),
    }
}

fn t(s: f64) -> Time {
    Time::new(0, 0, s)
}

fn trims(graph: &FilterGraph) -> Vec<(TrimSpan, AudioSource)> {
    graph.trims().map(|(span, audio)| (*span, audio)).collect()
}

#[test]
fn empty_list_is_rejected() {
    let err = compile_graph(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyActionList);
}

#[test]
fn single_cut_renders_exact_expression() {
    let graph = compile_graph(&[act(Verb::Cut, 92.0, 105.0)]).unwrap();
    assert_eq!(
        graph.to_string(),
        "[0:v]trim=duration=92.00,setpts=PTS-STARTPTS[video0];\
         [0:a]atrim=duration=92.00,asetpts=PTS-STARTPTS[audio0];\
         [0:v]trim=start=105.00,setpts=PTS-STARTPTS[video1];\
         [0:a]atrim=start=105.00,asetpts=PTS-STARTPTS[audio1];\
         [video0][video1]concat[outv];\
         [audio0][audio1]concat=v=0:a=1[outa]"
    );
}

#[test]
fn single_mute_takes_audio_from_silence() {
    let graph = compile_graph(&[act(Verb::Mute, 139.2, 139.85)]).unwrap();
    assert_eq!(
        trims(&graph),
        vec![
            (TrimSpan::Leading { end: t(139.2) }, AudioSource::Original),
            (
                TrimSpan::Between {
                    start: t(139.2),
                    end: t(139.85)
                },
                AudioSource::Silence
            ),
            (TrimSpan::Trailing { start: t(139.85) }, AudioSource::Original),
        ]
    );
    let expr = graph.to_string();
    assert!(expr.contains(
        "[0:v]trim=start=139.20:end=139.85,setpts=PTS-STARTPTS[video1];\
         [1:a]atrim=start=139.20:end=139.85,asetpts=PTS-STARTPTS[audio1]"
    ));
    assert!(expr.contains("[video0][video1]concat[video2]"));
    assert!(expr.ends_with("[video2][video3]concat[outv];[audio2][audio3]concat=v=0:a=1[outa]"));
}

#[test]
fn adjacent_cuts_fuse_and_emit_gap_once() {
    let graph = compile_graph(&[act(Verb::Cut, 10.0, 20.0), act(Verb::Cut, 25.0, 30.0)]).unwrap();
    assert_eq!(
        trims(&graph),
        vec![
            (TrimSpan::Leading { end: t(10.0) }, AudioSource::Original),
            (
                TrimSpan::Between {
                    start: t(20.0),
                    end: t(25.0)
                },
                AudioSource::Original
            ),
            (TrimSpan::Trailing { start: t(30.0) }, AudioSource::Original),
        ]
    );
    let expr = graph.to_string();
    assert!(!expr.contains("start=10.00:end=20.00"));
    assert!(!expr.contains("start=25.00:end=30.00"));
}

#[test]
fn cut_then_mute_emits_after_segment() {
    let graph = compile_graph(&[act(Verb::Cut, 10.0, 20.0), act(Verb::Mute, 30.0, 40.0)]).unwrap();
    assert_eq!(
        trims(&graph),
        vec![
            (TrimSpan::Leading { end: t(10.0) }, AudioSource::Original),
            (
                TrimSpan::Between {
                    start: t(20.0),
                    end: t(30.0)
                },
                AudioSource::Original
            ),
            (
                TrimSpan::Between {
                    start: t(30.0),
                    end: t(40.0)
                },
                AudioSource::Silence
            ),
            (TrimSpan::Trailing { start: t(40.0) }, AudioSource::Original),
        ]
    );
}

#[test]
fn mute_then_cut_emits_before_segment() {
    let graph = compile_graph(&[act(Verb::Mute, 10.0, 20.0), act(Verb::Cut, 30.0, 40.0)]).unwrap();
    assert_eq!(
        trims(&graph),
        vec![
            (TrimSpan::Leading { end: t(10.0) }, AudioSource::Original),
            (
                TrimSpan::Between {
                    start: t(10.0),
                    end: t(20.0)
                },
                AudioSource::Silence
            ),
            (
                TrimSpan::Between {
                    start: t(20.0),
                    end: t(30.0)
                },
                AudioSource::Original
            ),
            (TrimSpan::Trailing { start: t(40.0) }, AudioSource::Original),
        ]
    );
}

#[test]
fn consecutive_mutes_keep_the_media_between_them() {
    let graph =
        compile_graph(&[act(Verb::Mute, 10.0, 20.0), act(Verb::Mute, 30.0, 40.0)]).unwrap();
    assert_eq!(
        trims(&graph),
        vec![
            (TrimSpan::Leading { end: t(10.0) }, AudioSource::Original),
            (
                TrimSpan::Between {
                    start: t(10.0),
                    end: t(20.0)
                },
                AudioSource::Silence
            ),
            (
                TrimSpan::Between {
                    start: t(20.0),
                    end: t(30.0)
                },
                AudioSource::Original
            ),
            (
                TrimSpan::Between {
                    start: t(30.0),
                    end: t(40.0)
                },
                AudioSource::Silence
            ),
            (TrimSpan::Trailing { start: t(40.0) }, AudioSource::Original),
        ]
    );
}

#[test]
fn cut_at_media_start_skips_leading_segment() {
    let graph = compile_graph(&[act(Verb::Cut, 0.0, 10.0)]).unwrap();
    assert_eq!(
        graph.to_string(),
        "[0:v]trim=start=10.00,setpts=PTS-STARTPTS[outv];\
         [0:a]atrim=start=10.00,asetpts=PTS-STARTPTS[outa]"
    );

    let graph = compile_graph(&[act(Verb::Cut, 0.0, 10.0), act(Verb::Mute, 20.0, 30.0)]).unwrap();
    assert_eq!(
        graph.nodes[0],
        GraphNode::Trim {
            span: TrimSpan::Between {
                start: t(10.0),
                end: t(20.0)
            },
            audio: AudioSource::Original,
            out: SegmentRef::Index(0),
        }
    );
    assert_eq!(
        graph.nodes[2],
        GraphNode::Concat {
            left: 0,
            right: 1,
            out: SegmentRef::Index(2),
        }
    );
}

#[test]
fn mute_at_media_start_becomes_first_segment() {
    let graph = compile_graph(&[act(Verb::Mute, 0.0, 5.0)]).unwrap();
    assert_eq!(graph.segment_count(), 2);
    assert!(graph.to_string().starts_with(
        "[0:v]trim=start=0.00:end=5.00,setpts=PTS-STARTPTS[video0];\
         [1:a]atrim=start=0.00:end=5.00,asetpts=PTS-STARTPTS[audio0];"
    ));
}

#[test]
fn concats_chain_the_two_latest_labels() {
    let actions = [
        act(Verb::Mute, 5.0, 6.0),
        act(Verb::Cut, 10.0, 20.0),
        act(Verb::Cut, 25.0, 30.0),
        act(Verb::Mute, 40.0, 41.0),
        act(Verb::Mute, 50.0, 51.0),
    ];
    let graph = compile_graph(&actions).unwrap();

    let mut acc: Option<u32> = None;
    let mut last_label: Option<u32> = None;
    for node in &graph.nodes {
        match node {
            GraphNode::Trim {
                out: SegmentRef::Index(n),
                ..
            } => {
                assert!(last_label.is_none_or(|l| *n > l), "labels must increase");
                last_label = Some(*n);
                acc.get_or_insert(*n);
            }
            GraphNode::Concat { left, right, out } => {
                assert_eq!(Some(*left), acc);
                assert_eq!(Some(*right), last_label);
                match out {
                    SegmentRef::Index(n) => {
                        assert_eq!(*n, right + 1);
                        acc = Some(*n);
                        last_label = Some(*n);
                    }
                    SegmentRef::Output => {}
                }
            }
            GraphNode::Trim {
                out: SegmentRef::Output,
                ..
            } => panic!("output trim only appears without an accumulator"),
        }
    }
    assert!(matches!(
        graph.nodes.last(),
        Some(GraphNode::Concat {
            out: SegmentRef::Output,
            ..
        })
    ));
}

#[test]
fn segment_count_follows_verb_sequence() {
    // lead + trailing, plus: cut(first)=0, mute=1, cut->cut gap=1, mute->mute gap+mute=2
    let cases: [(&[Verb], usize); 5] = [
        (&[Verb::Cut], 2),
        (&[Verb::Mute], 3),
        (&[Verb::Cut, Verb::Cut], 3),
        (&[Verb::Cut, Verb::Mute], 4),
        (&[Verb::Mute, Verb::Mute, Verb::Cut], 6),
    ];
    for (verbs, expected) in cases {
        let actions: Vec<Action> = verbs
            .iter()
            .enumerate()
            .map(|(i, v)| act(*v, 10.0 + 10.0 * i as f64, 15.0 + 10.0 * i as f64))
            .collect();
        let graph = compile_graph(&actions).unwrap();
        assert_eq!(graph.segment_count(), expected, "{verbs:?}");
    }
}

#[test]
fn each_compile_starts_its_own_counter() {
    let actions = [act(Verb::Cut, 1.0, 2.0), act(Verb::Mute, 3.0, 4.0)];
    let a = compile_graph(&actions).unwrap().to_string();
    let b = compile_graph(&actions).unwrap().to_string();
    assert_eq!(a, b);
    assert!(a.starts_with("[0:v]trim=duration=1.00"));
}
