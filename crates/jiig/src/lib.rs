//! Jiig - a dependency graph of warehouse jobs and pipelines.
//!
//! The crate turns a flat export of node rows (jobs, pipelines) and edge rows
//! (tables connecting them) into a graph that highlights failures and what
//! they affect. The [`pipeline`] module holds the pure stages; [`source`]
//! fetches the table; [`cli`] and [`output`] drive the `jiig` binary.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod source;

// Public CLI module (needed by binary)
pub mod cli;

pub mod output;
