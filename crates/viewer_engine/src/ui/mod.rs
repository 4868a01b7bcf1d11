//! Debug user interface

pub mod panel;

pub use panel::{Control, ControlPanel, ControlWidget};
