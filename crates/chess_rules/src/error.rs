//! Error types for board construction
//!
//! Rule violations (illegal moves, acting on a finished match) are
//! value-returned outcomes, never errors; only layout construction and the
//! layout notation parser can fail.

use thiserror::Error;

use crate::piece::Side;

/// Errors raised while building a board from a layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A side was given more than one king
    #[error("{0:?} has more than one king")]
    DuplicateKing(Side),

    /// The layout notation names a square twice
    #[error("square {0} is assigned twice")]
    DuplicateSquare(String),

    /// A layout entry is not of the form `SQUARE:PIECE`
    #[error("malformed layout entry: {0:?}")]
    MalformedEntry(String),

    /// An unrecognized piece token such as `W_DRAGON`
    #[error("unknown piece: {0:?}")]
    UnknownPiece(String),

    /// An unrecognized square token such as `I9`
    #[error("unknown square: {0:?}")]
    UnknownSquare(String),

    /// A layout with no pieces at all
    #[error("layout holds no pieces")]
    EmptyLayout,
}
