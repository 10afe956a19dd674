//! Target-independent model of the device configuration admin form.
//!
//! Nothing in this crate touches the DOM: it decides which tab is active and
//! which field rows are visible, the `frontend` crate applies the result.

pub mod shared;
