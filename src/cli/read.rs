use std::{error::Error, io::Read, path::Path};

use serde::de::DeserializeOwned;

pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = std::fs::read_to_string(path)?;
    let json = serde_json::from_str(&data)?;
    Ok(json)
}

pub fn read_from_stdin() -> Result<serde_json::Value, Box<dyn Error>> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let json: serde_json::Value = serde_json::from_str(&buffer)?;
    Ok(json)
}
