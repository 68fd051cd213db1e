pub use super::model::{FormatKind, ParsedFields, ParseError};

pub trait TextParser: Send + Sync {
    /// parse raw field text into named fields
    fn parse(&self, text: &str) -> Result<ParsedFields, ParseError>;
    fn format(&self) -> FormatKind;

    /// Time layout implied by the format itself, used when none is configured.
    fn time_format(&self) -> Option<&str> {
        None
    }
}
