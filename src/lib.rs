//! modup - version bumper for module imports
//!
//! This library walks a module graph from a root file, finds versioned
//! imports from these registries, and rewrites them to the newest release:
//! - deno.land/std (`https://deno.land/std@0.200.0/...`)
//! - deno.land/x (`https://deno.land/x/hono@v3.0.0/...`)
//! - npm (`npm:preact@10.0.0`)

pub mod cli;
pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod patcher;
pub mod progress;
pub mod registry;
pub mod update;
pub mod writer;
