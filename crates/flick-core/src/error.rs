/// Recoverable outcomes of an edit attempt.
///
/// None of these reach the user: the session swallows them and turns the
/// gesture into a no-op (or, for `AtBoundary` on the suggestion strip, into a
/// dictionary toggle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no active document")]
    NoActiveDocument,
    #[error("nothing editable at the cursor")]
    NotEditable,
    #[error("no further candidates in that direction")]
    AtBoundary,
}
