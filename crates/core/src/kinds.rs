//! Well-known question kind tags.
//!
//! These must match the CHECK constraint in the `questions` migration. The
//! tag is descriptive metadata only; nothing enforces it against the shape
//! of the question's option set.

pub const KIND_SINGLE_CHOICE: &str = "single_choice";
pub const KIND_MULTI_CHOICE: &str = "multi_choice";
pub const KIND_SCALE: &str = "scale";
pub const KIND_YES_NO: &str = "yes_no";
