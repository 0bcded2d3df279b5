/// Annotation text had more than one `:` separator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("bad annotation format '{0}' (expected 'category' or 'category:specifier')")]
pub struct AnnotationFormatError(pub String);

/// Free-text justification attached to an action, e.g. `(profanity:f-word)`.
///
/// Carried for diagnostics only; the graph compiler never looks at it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Annotation {
    /// Broad reason, such as `profanity`.
    pub category: String,
    /// Optional detail within the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,
}

impl Annotation {
    /// Parse `category` or `category:specifier`. Blank input yields the empty annotation.
    pub fn parse(raw: &str) -> Result<Self, AnnotationFormatError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            [category] => Ok(Self {
                category: category.trim().to_owned(),
                specifier: None,
            }),
            [category, specifier] => Ok(Self {
                category: category.trim().to_owned(),
                specifier: Some(specifier.trim().to_owned()),
            }),
            _ => Err(AnnotationFormatError(raw.to_owned())),
        }
    }

    /// No category and no specifier.
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.specifier.is_none()
    }
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.specifier {
            Some(spec) => write!(f, "{}:{}", self.category, spec),
            None => f.write_str(&self.category),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/annotation.rs"]
mod tests;
