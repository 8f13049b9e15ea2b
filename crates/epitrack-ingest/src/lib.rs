//! Article ingestion boundary.
//!
//! Reads article exports (CSV, JSON array, or JSON lines), finds the
//! publication date column, and normalizes every row into an
//! [`epitrack_core::Article`]. Heterogeneous keyword encodings are folded
//! into [`epitrack_core::KeywordTokens`] here so the extractor only ever sees
//! one shape.

pub mod csv;
pub mod dates;
pub mod error;
pub mod json;
pub mod load;
pub mod normalize;

pub use error::IngestError;
pub use load::{load_articles, parse_articles, ArticleFormat};
pub use normalize::{RawArticle, RawKeywords};
