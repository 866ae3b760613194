//! Library surface of the `ifig` binary: command implementations plus the
//! logging setup shared with tests.

pub mod commands;
pub mod demo;
pub mod logging;
pub mod summary;
