//! Error adapter for converting StencilError to miette diagnostics.
//!
//! Malformed JSON models are reported with a labelled span pointing at the
//! line and column serde_json stopped at; every other variant is rendered as
//! a plain diagnostic with a `stencil::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use stencil::StencilError;

/// Adapter for a JSON syntax or schema error in a model document.
pub struct ModelFormatAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> ModelFormatAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the error location inside the source.
    pub fn span(&self) -> SourceSpan {
        let offset = line_column_offset(self.src, self.err.line(), self.err.column());
        let len = self.src[offset..].chars().next().map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for ModelFormatAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelFormatAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ModelFormatAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid model document")
    }
}

impl std::error::Error for ModelFormatAdapter<'_> {}

impl MietteDiagnostic for ModelFormatAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err.classify() {
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                "stencil::model::syntax"
            }
            serde_json::error::Category::Data => "stencil::model::schema",
            serde_json::error::Category::Io => "stencil::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a model document is an object with a `root` id and an `elements` array",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let message = strip_position(&self.err.to_string());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message), self.span()),
        )))
    }
}

/// Adapter for [`StencilError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a StencilError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StencilError::Io(_) => "stencil::io",
            StencilError::ModelFormat { .. } => "stencil::model::syntax",
            StencilError::Model(_) => "stencil::model",
            StencilError::Registry(_) => "stencil::registry",
            StencilError::Mapping(_) => "stencil::mapping",
            StencilError::Command(_) => "stencil::command",
            StencilError::Revision(_) => "stencil::revision",
            StencilError::Config(_) => "stencil::config",
            StencilError::Export(_) => "stencil::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            StencilError::Registry(_) => Some(Box::new(
                "check `diagram.representations` in the configuration file",
            )),
            StencilError::Mapping(_) => Some(Box::new(
                "set `diagram.strict_mapping = false` to skip elements that cannot be drawn",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A model format error with a labelled source span.
    ModelFormat(ModelFormatAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::ModelFormat(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::ModelFormat(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::ModelFormat(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::ModelFormat(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::ModelFormat(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::ModelFormat(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Byte offset of a 1-based `line`/`column` pair, clamped to `src`.
///
/// serde_json counts columns in bytes and reports column 0 when the error
/// sits before the first character of a line. An offset landing inside a
/// multi-byte character is moved back to its first byte.
fn line_column_offset(src: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let mut within = column.saturating_sub(1).min(text.len());
            while !text.is_char_boundary(within) {
                within -= 1;
            }
            return offset + within;
        }
        offset += text.len();
    }
    src.len()
}

/// Drops serde_json's trailing "at line X column Y" suffix.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}

/// Convert a [`StencilError`] into a list of reportable errors.
pub fn to_reportables(err: &StencilError) -> Vec<Reportable<'_>> {
    match err {
        StencilError::ModelFormat { err, src } => {
            vec![Reportable::ModelFormat(ModelFormatAdapter::new(err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use stencil::{registry::RegistryError, uml::Representation};

    use super::*;

    fn format_error(src: &str) -> StencilError {
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        StencilError::new_model_format_error(err, src)
    }

    #[test]
    fn test_line_column_offset() {
        let src = "ab\ncde\nf";
        assert_eq!(line_column_offset(src, 1, 1), 0);
        assert_eq!(line_column_offset(src, 2, 2), 4);
        assert_eq!(line_column_offset(src, 3, 1), 7);
        assert_eq!(line_column_offset(src, 2, 0), 3);
        assert_eq!(line_column_offset(src, 9, 1), src.len());
    }

    #[test]
    fn test_line_column_offset_counts_bytes() {
        // "é" is two bytes wide, so column 5 is the `x` at byte 4.
        let src = "\"é\"x\n";
        assert_eq!(line_column_offset(src, 1, 4), 3);
        assert_eq!(&src[line_column_offset(src, 1, 5)..][..1], "x");
        // Column 3 points into the middle of "é".
        assert_eq!(line_column_offset(src, 1, 3), 1);
    }

    #[test]
    fn test_non_ascii_error_label_covers_offending_token() {
        let src = "{\"name\": \"Bücher\", ?}";
        let err = format_error(src);
        let Reportable::ModelFormat(adapter) = &to_reportables(&err)[0] else {
            panic!("Expected ModelFormat");
        };
        let span = adapter.span();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "?");
    }

    #[test]
    fn test_model_format_span() {
        let src = "{\n  \"root\": tru\n}";
        let err = format_error(src);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        let Reportable::ModelFormat(adapter) = &reportables[0] else {
            panic!("Expected ModelFormat");
        };
        assert_eq!(adapter.to_string(), "invalid model document");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        let offset = labels[0].offset();
        assert!(offset >= src.find("tru").unwrap());
        assert!(offset <= src.len());
        assert!(!labels[0].label().unwrap().contains(" at line "));
    }

    #[test]
    fn test_truncated_document_points_at_end() {
        let src = "{\"root\": \"m\",";
        let err = format_error(src);
        let reportables = to_reportables(&err);
        let Reportable::ModelFormat(adapter) = &reportables[0] else {
            panic!("Expected ModelFormat");
        };
        assert!(adapter.span().offset() >= src.len() - 1);
        assert_eq!(
            adapter.code().unwrap().to_string(),
            "stencil::model::syntax"
        );
    }

    #[test]
    fn test_non_format_error() {
        let err = StencilError::Registry(RegistryError::UnknownRepresentation(
            Representation::Sequence,
        ));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert!(e.to_string().starts_with("Registry error:"));
                assert_eq!(e.code().unwrap().to_string(), "stencil::registry");
                assert!(e.help().is_some());
            }
            Reportable::ModelFormat(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_config_error_code() {
        let err = StencilError::Config("bad".to_string());
        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].code().unwrap().to_string(), "stencil::config");
        assert!(reportables[0].help().is_none());
    }
}
