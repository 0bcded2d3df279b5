use crate::{
    dsl::annotation::Annotation,
    dsl::lexer::Token,
    dsl::time::Time,
    foundation::error::{TimeField, VidfilterError, VidfilterResult},
};

/// Edit operation applied to a time range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Drop both tracks for the range.
    Cut,
    /// Keep the video, replace the audio with silence.
    Mute,
}

const VERBS: &[(&str, Verb)] = &[("cut", Verb::Cut), ("mute", Verb::Mute)];

impl Verb {
    /// Case-insensitive lookup in the fixed vocabulary.
    pub fn lookup(raw: &str) -> Option<Self> {
        VERBS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map(|(_, verb)| *verb)
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Cut => "cut",
            Verb::Mute => "mute",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One parsed line of a filter script.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Action {
    /// 1-based source line.
    pub line: usize,
    /// What to do.
    pub verb: Verb,
    /// Range start.
    pub start: Time,
    /// Range end. Zero when the line omitted it.
    pub end: Time,
    /// Optional justification.
    #[serde(skip_serializing_if = "Annotation::is_empty")]
    pub annotation: Annotation,
    /// Tokens the action was built from, in line order.
    #[serde(skip)]
    pub tokens: Vec<Token>,
}

/// Group tokens by source line and turn each group into an [`Action`], in file order.
#[tracing::instrument(skip(tokens), fields(count = tokens.len()))]
pub fn build_actions(tokens: &[Token]) -> VidfilterResult<Vec<Action>> {
    let actions = tokens
        .chunk_by(|a, b| a.line == b.line)
        .map(build_action)
        .collect::<VidfilterResult<Vec<_>>>()?;
    tracing::debug!(actions = actions.len(), "built actions");
    Ok(actions)
}

fn build_action(tokens: &[Token]) -> VidfilterResult<Action> {
    let (verb_tok, rest) = tokens.split_first().ok_or_else(|| VidfilterError::Lex {
        line: 0,
        message: "empty token group".to_owned(),
    })?;

    let verb = Verb::lookup(&verb_tok.value).ok_or_else(|| VidfilterError::UnrecognizedVerb {
        line: verb_tok.line,
        column: verb_tok.column,
        verb: verb_tok.value.clone(),
    })?;

    let start = match rest.first() {
        Some(tok) => parse_time(tok, TimeField::Start)?,
        None => Time::ZERO,
    };
    let end = match rest.get(1) {
        Some(tok) => parse_time(tok, TimeField::End)?,
        None => Time::ZERO,
    };
    let annotation = match rest.get(2) {
        Some(tok) => Annotation::parse(&tok.value).map_err(|source| {
            VidfilterError::Annotation {
                line: tok.line,
                column: tok.column,
                source,
            }
        })?,
        None => Annotation::default(),
    };

    if let Some(extra) = rest.get(3) {
        return Err(VidfilterError::UnexpectedTokenCount {
            line: extra.line,
            column: extra.column,
            count: 4,
        });
    }

    Ok(Action {
        line: verb_tok.line,
        verb,
        start,
        end,
        annotation,
        tokens: tokens.to_vec(),
    })
}

fn parse_time(tok: &Token, field: TimeField) -> VidfilterResult<Time> {
    Time::parse(&tok.value).map_err(|source| VidfilterError::Time {
        line: tok.line,
        column: tok.column,
        field,
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/action.rs"]
mod tests;
