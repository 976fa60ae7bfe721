//! UI module root: exposes drawing functions for individual panels.

pub mod footer;
pub mod header;
pub mod processes;
pub mod storage;
pub mod system;
pub mod theme;
pub mod util;
