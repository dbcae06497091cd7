//! `scarc`: lowers the Scar language to ANSI C (§1).
//!
//! The pipeline runs its stages in a fixed order — clean, parse, load
//! imports, hoist, pre-walk, resolve, emit, post-process — wired
//! together in [`pipeline`]. Each stage is its own module so it can be
//! exercised (and tested) independently of the others.

pub mod ast;
pub mod cleaner;
pub mod emitter;
pub mod error;
pub mod hoister;
pub mod loader;
pub mod macros;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod session;
