//! Status of many git repositories at once.
//!
//! The library holds everything that does not touch the terminal session:
//! discovery and `git` plumbing ([`git`]), parallel collection, layout and
//! the view state machine ([`status`]), and the scroll and styling
//! primitives they share. The `lz` binary adds argument parsing and the
//! crossterm event loop on top.

pub mod display;
pub mod git;
pub mod scroll;
pub mod shell_exec;
pub mod status;
pub mod styling;
