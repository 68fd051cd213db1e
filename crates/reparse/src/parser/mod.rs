/// Text parsing module
///
/// Turns the raw text of a single record field into structured fields.
///
/// # Architecture
///
/// - `traits.rs`: the `TextParser` contract every format implements
/// - `model.rs`: format kinds, parsed fields and error types
/// - `formats/`: individual format parser implementations plus the
///   closed `Format` enum that selects one from configuration
///
/// # Guarantees
///
/// All parsers are:
/// - Pure (no I/O, no shared mutable state)
/// - `Send + Sync`, so one compiled parser serves every worker
/// - Bounded (lines over `MAX_LINE_SIZE` are rejected, not parsed)

pub mod traits;
pub mod model;
pub mod formats;

// Re-export commonly used types
pub use traits::TextParser;
pub use model::{FormatError, FormatKind, ParseError, ParsedFields};
pub use formats::Format;

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
