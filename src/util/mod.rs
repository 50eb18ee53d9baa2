//! Small helper modules used by the modules lesson.
//!
//! Only items marked `pub` are reachable from the lesson binary; the
//! private helpers inside each file are there to show that boundary.

pub mod mathutil;
pub mod stringutil;
