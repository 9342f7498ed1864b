//! Workspace facade; demos import the region model through here or through
//! `geoprofiles_core` directly.
pub use geoprofiles_core::*;
