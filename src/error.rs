use thiserror::Error;

/// Failures reported by [`KdTree`](crate::KdTree).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdTreeError {
    #[error("no points added to the tree, nothing to build")]
    EmptyPointSet,
    #[error("tree is not built, call build() before querying")]
    NotBuilt,
    #[error("flat coordinate list of length {0} is not a multiple of 3")]
    UnalignedCoordinates(usize),
}

/// Failures reported by the OBJ reader and writer.
///
/// Malformed lines are skipped with a warning; only I/O failures surface here.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
