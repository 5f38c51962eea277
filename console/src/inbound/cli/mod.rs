//! Command-line front end for the console screens.
//!
//! Each command drives one screen state object through the same events a
//! graphical front end would send, then renders the resulting state as text.

mod commands;
mod render;

pub use commands::{
    AssociatesCommand, CliError, RegisterManagerCommand, run_associates, run_register_manager,
};
pub use render::{render_navigation, render_picker, render_registration};
