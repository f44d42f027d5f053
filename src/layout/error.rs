//! Error types for the tree builder

use thiserror::Error;

use crate::parser::ast::Span;

/// Errors that can occur while turning a document into layout trees
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Constraints that violate `0 <= min <= natural <= max`
    #[error("invalid {axis} for '{element}': {reason}")]
    InvalidSize {
        element: String,
        axis: &'static str,
        reason: String,
        span: Span,
    },

    /// The same identifier declared twice
    #[error("identifier '{name}' is already defined")]
    DuplicateIdentifier { name: String, span: Span, first: Span },

    /// Modifier key nobody understands
    #[error("unknown modifier '{key}'")]
    UnknownModifier {
        key: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// Known modifier used on an element that cannot take it
    #[error("'{key}' is not allowed on {element}: {reason}")]
    UnsupportedModifier {
        key: String,
        element: String,
        reason: String,
        span: Span,
    },

    /// Modifier value of the wrong shape
    #[error("invalid value for '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        expected: String,
        span: Span,
    },
}

impl LayoutError {
    /// Create an invalid size error
    pub fn invalid_size(
        element: impl Into<String>,
        axis: &'static str,
        reason: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::InvalidSize {
            element: element.into(),
            axis,
            reason: reason.into(),
            span,
        }
    }

    /// Create a duplicate identifier error pointing at both declarations
    pub fn duplicate(name: impl Into<String>, span: Span, first: Span) -> Self {
        Self::DuplicateIdentifier {
            name: name.into(),
            span,
            first,
        }
    }

    /// Create an unknown modifier error with suggestions
    pub fn unknown_modifier(key: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::UnknownModifier {
            key: key.into(),
            span,
            suggestions,
        }
    }

    /// Create an unsupported modifier error
    pub fn unsupported(
        key: impl Into<String>,
        element: impl Into<String>,
        reason: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnsupportedModifier {
            key: key.into(),
            element: element.into(),
            reason: reason.into(),
            span,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, expected: impl Into<String>, span: Span) -> Self {
        Self::InvalidValue {
            key: key.into(),
            expected: expected.into(),
            span,
        }
    }

    /// Get the source span
    pub fn span(&self) -> &Span {
        match self {
            Self::InvalidSize { span, .. }
            | Self::DuplicateIdentifier { span, .. }
            | Self::UnknownModifier { span, .. }
            | Self::UnsupportedModifier { span, .. }
            | Self::InvalidValue { span, .. } => span,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownModifier { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Render this error against the source text, in the same style as parse errors
    pub fn format(&self, source: &str, filename: &str) -> String {
        use ariadne::{Color, Label, Report, ReportKind, Source};

        let span = self.span().clone();
        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            );

        if let Self::DuplicateIdentifier { first, .. } = self {
            report = report.with_label(
                Label::new((filename, first.clone()))
                    .with_message("first defined here")
                    .with_color(Color::Blue),
            );
        }
        if let Some(suggestions) = self.suggestions().filter(|s| !s.is_empty()) {
            report = report.with_help(format!("did you mean: {}?", suggestions.join(", ")));
        }

        let mut output = Vec::new();
        if report
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            return self.to_string();
        }
        String::from_utf8_lossy(&output).into_owned()
    }
}

/// Levenshtein edit distance between two strings
pub(crate) fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // single rolling row
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];
    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Up to three candidates within `max_distance` edits of `target`, closest first
pub(crate) fn find_similar<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> = candidates
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    scored.sort_by_key(|(_, d)| *d);
    scored
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}
