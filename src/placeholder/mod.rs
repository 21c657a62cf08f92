//! `{{placeholder}}` handling: catalog, extraction, completeness,
//! substitution and highlighting.
pub mod completeness;
pub mod extractor;
pub mod highlight;
pub mod registry;
pub mod substitution;

pub use completeness::{check, GenerationOutcome, MissingTokenError};
pub use extractor::extract;
pub use highlight::{highlight, highlight_with, HighlightMarker, RenderedDocument};
pub use registry::{PlaceholderRegistry, TokenDescriptor};
pub use substitution::{substitute, SubstitutionMap};
