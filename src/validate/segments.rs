use crate::{
    dsl::action::Action,
    foundation::error::{VidfilterError, VidfilterResult},
};

/// Minimum segment length and minimum gap between segments, in seconds.
pub const SEGMENT_THRESHOLD_S: f64 = 0.001;

/// Slack for float subtraction, so a span of exactly the threshold (`1.001 - 1.0`) passes.
const THRESHOLD_EPSILON_S: f64 = 1e-9;

fn below_threshold(span: f64) -> bool {
    span < SEGMENT_THRESHOLD_S - THRESHOLD_EPSILON_S
}

/// Check ordering, length and spacing of an action list; stops at the first violation.
///
/// An empty list passes.
#[tracing::instrument(skip(actions), fields(count = actions.len()))]
pub fn validate_segments(actions: &[Action]) -> VidfilterResult<()> {
    for (i, act) in actions.iter().enumerate() {
        check_action(act)?;
        if i > 0 {
            check_spacing(&actions[i - 1], act)?;
        }
    }
    Ok(())
}

fn check_action(act: &Action) -> VidfilterResult<()> {
    let start = act.start.total_seconds();
    let end = act.end.total_seconds();

    if end < start {
        return Err(VidfilterError::OutOfOrderWithinAction {
            line: act.line,
            start: act.start,
            end: act.end,
        });
    }
    if below_threshold(end - start) {
        return Err(VidfilterError::SegmentTooShort {
            line: act.line,
            start: act.start,
            end: act.end,
            threshold: SEGMENT_THRESHOLD_S,
        });
    }
    Ok(())
}

fn check_spacing(prev: &Action, act: &Action) -> VidfilterResult<()> {
    let prev_end = prev.end.total_seconds();
    let start = act.start.total_seconds();

    if start < prev_end {
        return Err(VidfilterError::OutOfOrderAcrossActions {
            prev_line: prev.line,
            line: act.line,
        });
    }
    if below_threshold(start - prev_end) {
        return Err(VidfilterError::OverlapOrAdjacent {
            prev_line: prev.line,
            line: act.line,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/validate/segments.rs"]
mod tests;
