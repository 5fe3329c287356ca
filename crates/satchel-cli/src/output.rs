//! JSON output on stdout

use anyhow::{Context, Result};
use serde::Serialize;

pub struct Output {
    pretty: bool,
    indent: usize,
}

impl Output {
    /// `--compact` wins over the configured `output.pretty`
    pub fn from_config(config: &satchel_config::Config, compact: bool) -> Self {
        Self {
            pretty: config.pretty() && !compact,
            indent: config.indent(),
        }
    }

    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        if !self.pretty {
            return serde_json::to_string(value).context("JSON serialization failed");
        }

        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value
            .serialize(&mut serializer)
            .context("JSON serialization failed")?;
        String::from_utf8(buf).context("UTF-8 conversion failed")
    }

    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_core::Map;

    fn sample() -> Map {
        [("a", 1), ("b", 2)].into_iter().collect()
    }

    #[test]
    fn test_compact_render() {
        let out = Output {
            pretty: false,
            indent: 2,
        };
        assert_eq!(out.render(&sample()).unwrap(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_pretty_render_uses_indent() {
        let out = Output {
            pretty: true,
            indent: 4,
        };
        assert_eq!(
            out.render(&sample()).unwrap(),
            "{\n    \"a\": 1,\n    \"b\": 2\n}"
        );
    }
}
