//! Generic helpers shared by actions and the HTTP layer.
//!
//! - [`array`] -- re-index lists of mappings by a field.
//! - [`string`] -- casing and suffix helpers used by routing.
//! - [`datetime`] -- strftime-style timestamp formatting.
//! - [`properties`] -- a typed string-to-value property bag.

pub mod array;
pub mod datetime;
pub mod properties;
pub mod string;
