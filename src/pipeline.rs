use crate::{
    compile::graph::{FilterGraph, compile_graph},
    dsl::action::{Action, build_actions},
    dsl::lexer::lex,
    foundation::error::VidfilterResult,
    validate::segments::validate_segments,
};

/// Lex, build and validate a filter script into its action list.
///
/// The list may be empty; emptiness is only an error once compiled.
pub fn parse_filter_script(text: &str) -> VidfilterResult<Vec<Action>> {
    let tokens = lex(text);
    let actions = build_actions(&tokens)?;
    validate_segments(&actions)?;
    Ok(actions)
}

/// Compile a filter script into its typed trim/concat graph.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn compile_filter_graph(text: &str) -> VidfilterResult<FilterGraph> {
    let actions = parse_filter_script(text)?;
    compile_graph(&actions)
}

/// Compile a filter script into the `-filter_complex` expression handed to ffmpeg.
///
/// Pure: no file or process access. The first failing stage's error is returned as is.
pub fn compile_filter_script(text: &str) -> VidfilterResult<String> {
    compile_filter_graph(text).map(|graph| graph.to_string())
}
