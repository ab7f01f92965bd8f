//! natura HTML - HTML5 parser
//!
//! Parses markup with html5ever into an `RcDom` and converts it into the
//! arena DOM used by the rest of the toolkit.

mod parser;

pub use parser::HtmlParser;

/// HTML parsing error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOM construction failed: {0}")]
    Dom(#[from] natura_dom::DomError),
}
