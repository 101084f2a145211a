use std::io;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

const FRONT_MATTER_DELIMITER: &str = "---";

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == FRONT_MATTER_DELIMITER
}

fn parse_yaml_mapping(file_name: &Path, yaml: &str) -> io::Result<Mapping> {
    let value: Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Invalid front-matter: {} - file={}", e, file_name.display()),
        )),
    };

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Front-matter is not a mapping - file={}", file_name.display()),
        )),
    }
}

/// Splits `---` delimited YAML front-matter from the body.
///
/// Files not starting with the delimiter have no front-matter and the whole text
/// is the body.
pub fn split_front_matter<'a>(file_name: &Path, raw: &'a str) -> io::Result<(Mapping, &'a str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');

    let start = match lines.next() {
        Some(first) if is_delimiter(first) => first.len(),
        _ => return Ok((Mapping::new(), raw)),
    };

    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            let mapping = parse_yaml_mapping(file_name, &raw[start..offset])?;
            return Ok((mapping, &raw[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(io::Error::new(
        ErrorKind::InvalidData,
        format!("End of front-matter is missing - file={}", file_name.display()),
    ))
}

/// Writes front-matter followed by the body, the body always ends with a new line
pub fn render_post<T: Serialize>(front_matter: &T, body: &str) -> io::Result<String> {
    let yaml = match serde_yaml::to_string(front_matter) {
        Ok(yaml) => yaml,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, format!("Error writing front-matter: {}", e))),
    };

    let mut res = String::with_capacity(yaml.len() + body.len() + 10);
    res.push_str(FRONT_MATTER_DELIMITER);
    res.push('\n');
    res.push_str(&yaml);
    if !yaml.ends_with('\n') {
        res.push('\n');
    }
    res.push_str(FRONT_MATTER_DELIMITER);
    res.push('\n');
    res.push_str(body);
    if !body.ends_with('\n') {
        res.push('\n');
    }

    Ok(res)
}
