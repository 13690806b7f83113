use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::ranker::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Resolves a path relative to the directory of a configuration file.
/// Absolute paths are returned as they are.
pub fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(r) if Path::new(path).is_relative() => {
            let p: PathBuf = [r, Path::new(path)].iter().collect();
            p.as_path().display().to_string()
        }
        _ => path.to_string(),
    }
}

/// Asks a question on the standard output and reads one line of answer.
pub fn prompt(message: &str) -> RankerResult<String> {
    print!("{}", message);
    std::io::stdout().flush().context(PromptSnafu {})?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context(PromptSnafu {})?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
