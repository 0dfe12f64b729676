//! git-absorb: merge other git repositories into the current one
//!
//! Each source repository is fetched, merged with its full history and
//! grafted under a subdirectory named after the source folder. The work is
//! split the same way for every folder:
//!
//! 1. [`resolve`] turns command-line folder arguments into [`types::SourceFolder`]s
//! 2. [`absorb`] gathers facts, builds a pure plan and executes it against a
//!    [`repo::TargetRepository`]
//! 3. [`cleanup`] optionally removes the local copies that were absorbed

pub mod absorb;
pub mod cleanup;
pub mod error;
pub mod repo;
pub mod resolve;
pub mod types;
