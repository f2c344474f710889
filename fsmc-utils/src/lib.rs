//! Small utilities shared across the `fsmc` crates: the error type and
//! diagnostic span, grounded on `calyx_utils`'s `lib.rs`/`errors.rs` split
//! (one error enum re-exported at the crate root, no other public surface).

mod error;

pub use error::{Error, FsmcResult, Span};
