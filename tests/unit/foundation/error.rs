use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VidfilterError::UnrecognizedVerb {
            line: 3,
            column: 1,
            verb: "trim".to_string(),
        }
        .to_string()
        .starts_with("unrecognized verb: line 3:1:")
    );
    assert!(
        VidfilterError::OverlapOrAdjacent {
            prev_line: 1,
            line: 2,
        }
        .to_string()
        .contains("lines 1-2")
    );
    assert!(
        VidfilterError::EmptyActionList
            .to_string()
            .starts_with("empty action list:")
    );
    assert!(
        VidfilterError::encode("x")
            .to_string()
            .starts_with("encode error:")
    );
}

#[test]
fn time_error_names_field_and_keeps_source() {
    let err = VidfilterError::Time {
        line: 2,
        column: 6,
        field: TimeField::End,
        source: TimeParseError::Minute("x".to_string()),
    };
    let msg = err.to_string();
    assert!(msg.starts_with("invalid end time: line 2:6:"), "{msg}");
    assert!(msg.contains("bad minute value 'x'"), "{msg}");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn kind_line_and_column_accessors() {
    let err = VidfilterError::Annotation {
        line: 4,
        column: 12,
        source: AnnotationFormatError("a:b:c".to_string()),
    };
    assert_eq!(err.kind(), ErrorKind::Annotation);
    assert_eq!(err.line(), Some(4));
    assert_eq!(err.column(), Some(12));

    let err = VidfilterError::OutOfOrderAcrossActions {
        prev_line: 1,
        line: 5,
    };
    assert_eq!(err.kind(), ErrorKind::OutOfOrderAcrossActions);
    assert_eq!(err.line(), Some(5));
    assert_eq!(err.column(), None);

    assert_eq!(VidfilterError::EmptyActionList.line(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VidfilterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[test]
fn sub_centisecond_times_stay_distinguishable() {
    let msg = VidfilterError::SegmentTooShort {
        line: 1,
        start: Time::new(0, 0, 1.0),
        end: Time::new(0, 0, 1.0009),
        threshold: 0.001,
    }
    .to_string();
    assert!(msg.starts_with("segment too short: line 1:"), "{msg}");
    assert!(msg.contains("start time 1s and end time 1.0009s"), "{msg}");

    let msg = VidfilterError::OutOfOrderWithinAction {
        line: 4,
        start: Time::new(0, 1, 0.5),
        end: Time::new(0, 1, 0.25),
    }
    .to_string();
    assert!(msg.contains("(60.25s)"), "{msg}");
    assert!(msg.contains("(60.5s)"), "{msg}");
}
