//! Optional extensions to the target camera plugins.

#[cfg(feature = "extension_marker_indicator")]
pub mod marker_indicator;
