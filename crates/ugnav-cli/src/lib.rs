//! UG Navigate CLI library.
//!
//! This crate provides the output formats and terminal styling shared by the
//! `ugnav-cli` subcommands.

pub mod output;
pub mod terminal;
