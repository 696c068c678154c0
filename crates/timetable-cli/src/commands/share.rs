//! `share` commands.

use std::path::Path;

use timetable_share::ShareData;

use crate::commands::load_file;
use crate::error::{CliError, CliResult};

/// Prints a share link for `source`, or the bare token without a base URL.
pub fn encode(source: &Path, name: Option<&str>, base_url: Option<&str>) -> CliResult<()> {
    println!("{}", encode_link(source, name, base_url)?);
    Ok(())
}

/// Builds the share link or token for a timetable file.
pub fn encode_link(
    source: &Path,
    name: Option<&str>,
    base_url: Option<&str>,
) -> CliResult<String> {
    let loaded = load_file(source)?;
    let file_name = name.unwrap_or(&loaded.name);
    let token = timetable_share::encode(&loaded.events, file_name)?;

    match base_url {
        Some(base) => Ok(timetable_share::share_url(base, &token)?),
        None => Ok(token),
    }
}

/// Prints the contents of a share link as pretty JSON.
pub fn decode(input: &str) -> CliResult<()> {
    let data = decode_input(input)?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

/// Decodes a share link or bare token.
pub fn decode_input(input: &str) -> CliResult<ShareData> {
    let token = timetable_share::extract_token(input)
        .ok_or_else(|| CliError::Share(format!("no share token found in {input:?}")))?;
    timetable_share::decode(&token)
        .ok_or_else(|| CliError::Share("invalid or corrupted share link".to_string()))
}
