//! Row-level state shared by the visitor, equipment and incident lists: which row is being
//! edited or added, which delete is awaiting confirmation, and which rows are expanded.
//!
//! None of these validate or persist anything. Saving is the caller's job.

mod crud_list;
mod delete;
mod edit;
mod expansion;

pub use crud_list::CrudList;
pub use delete::DeleteTracker;
pub use edit::{EditState, EditTracker};
pub use expansion::ExpansionTracker;

/// Rows that can be tracked by identifier.
pub trait HasId {
    type Id: Copy + Eq + std::hash::Hash;

    fn id(&self) -> Self::Id;
}
