/// Conversion failures. Fail-fast: no partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// An element outside the supported block or inline vocabulary.
    #[error("unsupported markup element: <{0}>")]
    UnsupportedElement(String),
    /// An `li` that is not inside a `ul`/`ol` has no numbering definition.
    #[error("list item outside of a list")]
    ListItemOutsideList,
}
