//! Genealogical tree model, its text file format and a command line front end.
//!
//! People are stored in an append-only arena ([`domain::FamilyTree`]) and
//! refer to their children by id. The tree can be rendered, grouped into
//! generations, saved and loaded again.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
