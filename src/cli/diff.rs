use structpatch::{PatchGenerator, schema::SchemaDocument};

use crate::cli::{DiffArgs, read::load_json_file};

pub fn handle_diff_command(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let schema: SchemaDocument = load_json_file(&args.schema)?;
    let original: serde_json::Value = load_json_file(&args.original)?;
    let modified: serde_json::Value = load_json_file(&args.modified)?;

    let generator = PatchGenerator::try_from(schema)?;
    let result = generator.diff_values(&original, &modified)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
