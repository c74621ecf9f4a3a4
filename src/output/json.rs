//
//  esclient
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON and YAML writers.

use serde::Serialize;
use std::io::Write;

/// Writes pretty JSON followed by a newline.
///
/// # Example
///
/// ```rust
/// use esclient::output::write_json_to;
///
/// let mut out = Vec::new();
/// write_json_to(&mut out, &serde_json::json!({"acknowledged": true}))?;
/// assert_eq!(String::from_utf8(out)?, "{\n  \"acknowledged\": true\n}\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes YAML. `serde_yaml` already terminates the document with a newline.
pub fn write_yaml_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    writer.write_all(yaml.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_nested_indent() {
        let mut out = Vec::new();
        write_json_to(&mut out, &json!({"a": [1]})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}\n");
    }

    #[test]
    fn test_yaml() {
        let mut out = Vec::new();
        write_yaml_to(&mut out, &json!({"status": "green"})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "status: green\n");
    }
}
