//! Data model shared by the taskbar crates.
//!
//! Everything here is plain data: configuration trees as read from the host, runtime task handles, the identities derived from both, and the descriptors that drive the indicator widgets.

mod domain;
pub use domain::*;

mod kind;
pub use kind::*;
