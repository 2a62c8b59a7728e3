use std::error::Error;

use structpatch::resolve::SerdeValueExt;

use crate::cli::{
    QueryArgs,
    read::{load_json_file, read_from_stdin},
};

pub fn handle_query_command(args: QueryArgs) -> Result<(), Box<dyn Error>> {
    let json: serde_json::Value = if let Some(file_path) = args.file {
        load_json_file(&file_path)?
    } else {
        read_from_stdin()?
    };

    let value = json.get_value_at(&args.path)?;
    println!("{}", value);
    Ok(())
}
