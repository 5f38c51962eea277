//! Inbound adapters that translate operator input into screen events and
//! render screen state back, keeping presentation details at the edge.
//!
//! The command-line front end lives under [`cli`].

pub mod cli;
