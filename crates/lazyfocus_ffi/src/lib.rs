//! FRB entry crate for LazyFocus.
//!
//! All Dart-visible functions live in [`api`].

pub mod api;
