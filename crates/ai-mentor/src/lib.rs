//! CodeMentor CLI - command-line front end over the mentor engines.

pub mod cli;
pub mod commands;
