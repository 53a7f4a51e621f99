// Board-building engine: formation catalog, slot validation, auto-fill.

pub mod assignment;
pub mod autofill;
pub mod formation;

pub use assignment::{check_assign, AssignCheck, Assignment};
pub use autofill::{auto_fill, AutoFillOutcome};
pub use formation::{Formation, SLOT_COUNT};
