pub mod apply;
pub mod diff;
pub mod query;
pub mod read;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "structpatch", version, about)]
pub struct Cli {
    /// Log filter directive, e.g. `debug` or `structpatch=trace`
    #[arg(long, global = true, env = "STRUCTPATCH_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a patch turning one JSON document into another
    Diff(DiffArgs),

    /// Apply a patch to a JSON document
    Apply(ApplyArgs),

    /// Resolve a JSON Pointer within a JSON document
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// The original document
    pub original: PathBuf,

    /// The modified document
    pub modified: PathBuf,

    /// Schema document declaring the root type and the kind of every field
    #[arg(short, long, env = "STRUCTPATCH_SCHEMA")]
    pub schema: PathBuf,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// The document to patch
    pub document: PathBuf,

    /// The patch, a JSON array of operations
    pub patch: PathBuf,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// JSON Pointer to resolve, e.g. /lines/0/sku
    pub path: String,

    /// Document to read, stdin when omitted
    pub file: Option<PathBuf>,
}
