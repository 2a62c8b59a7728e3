use structpatch::{Patch, resolve::SerdeValueExt};

use crate::cli::{ApplyArgs, read::load_json_file};

pub fn handle_apply_command(args: ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let document: serde_json::Value = load_json_file(&args.document)?;
    let patch: Patch = load_json_file(&args.patch)?;

    let patched = document.apply_patch(&patch)?;

    println!("{}", serde_json::to_string_pretty(&patched)?);
    Ok(())
}
