//! Headless adapter for the xsnos rules engine.
//!
//! Stands in for the desktop presentation and notification layers: commands
//! come from a script instead of drag-and-drop, and finished games are
//! reported as transcript lines instead of dialogs.
//!
//! # Example
//!
//! ```
//! use xsnos::{Session, parse_script};
//! use xsnos_rules::EngineConfig;
//!
//! let commands = parse_script("X 0 0\nO 1 1\nX 0 1\nO 2 2\nX 0 2\n")?;
//! let mut session = Session::new(EngineConfig::default(), Vec::new());
//! session.run(&commands)?;
//! let (out, summary) = session.finish();
//! assert_eq!(String::from_utf8(out)?, "X->(0,0):O->(1,1):X->(0,1):O->(2,2):X->(0,2)\n");
//! assert_eq!(*summary.x_wins(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod script;
mod session;

pub use script::{Command, ScriptError, load_script, parse_line, parse_script};
pub use session::{Session, SessionSummary};
