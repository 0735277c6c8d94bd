//! Library half of the `vocab` binary: logging setup and settings.

#![allow(missing_docs)]

pub mod logging;
pub mod settings;
