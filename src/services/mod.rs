//! Host services backing the icon provider.
//!
//! - `profiles` - user profiles of this session
//! - `shortcuts` - pinned shortcut store
//! - `model` - model refresh events published to views

pub mod model;
pub mod profiles;
pub mod shortcuts;
