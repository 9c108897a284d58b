use crate::domain::model::CodeUnit;
use crate::domain::ports::SliceAssignment;
use crate::domain::slice::Slice;
use anyhow::{Result, bail};
use regex::Regex;

const SEGMENT: &str = r"[\w$]+";
const ANY_SEGMENTS: &str = r"(?:\.[\w$]+)*";

/// Package-pattern slice assignment
///
/// Patterns are matched against package names:
/// - `..` any number of segments (including none)
/// - `*` exactly one segment, `**` one or more
/// - `(*)` and `(**)` capture the matched segments; the captures identify the slice
///
/// `com.example.(*)..` puts `com.example.shop` and `com.example.shop.cart` into
/// the slice `shop`. Units whose package does not match are outside the slice
/// universe.
#[derive(Debug, Clone)]
pub struct PatternSlices {
    pattern: String,
    regex: Regex,
    naming: Option<String>,
}

impl PatternSlices {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = compile(pattern)?;
        if regex.captures_len() < 2 {
            bail!("Slice pattern '{pattern}' has no capture group, e.g. '(*)'");
        }
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            naming: None,
        })
    }

    /// Describe slices with a template; `$1`, `$2`, ... refer to the captures.
    pub fn with_naming(mut self, template: impl Into<String>) -> Self {
        self.naming = Some(template.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn describe(&self, identifier: &[String]) -> Option<String> {
        let template = self.naming.as_ref()?;
        // Highest index first so `$1` never eats the prefix of `$10`
        let described = identifier
            .iter()
            .enumerate()
            .rev()
            .fold(template.clone(), |text, (i, part)| {
                text.replace(&format!("${}", i + 1), part)
            });
        Some(described)
    }
}

impl SliceAssignment for PatternSlices {
    type Slice = Slice;

    fn slice_of(&self, unit: &CodeUnit) -> Option<Slice> {
        let package = format!(".{}", unit.package_name());
        let captures = self.regex.captures(&package)?;
        let identifier: Vec<String> = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect();

        let slice = match self.describe(&identifier) {
            Some(description) => Slice::new(identifier).with_description(description),
            None => Slice::new(identifier),
        };
        Some(slice)
    }
}

/// Translate a package pattern into an anchored regex over `.`-prefixed
/// package names.
fn compile(pattern: &str) -> Result<Regex> {
    if pattern.trim().is_empty() {
        bail!("Slice pattern must not be empty");
    }

    let mut source = String::from("^");
    for (i, piece) in pattern.split("..").enumerate() {
        if i > 0 {
            source.push_str(ANY_SEGMENTS);
        }
        for segment in piece.split('.').filter(|s| !s.is_empty()) {
            source.push_str(r"\.");
            source.push_str(&segment_regex(pattern, segment)?);
        }
    }
    source.push('$');

    Ok(Regex::new(&source)?)
}

fn segment_regex(pattern: &str, segment: &str) -> Result<String> {
    let many = format!("{SEGMENT}(?:\\.{SEGMENT})*");
    let translated = match segment {
        "*" => SEGMENT.to_string(),
        "(*)" => format!("({SEGMENT})"),
        "**" => many,
        "(**)" => format!("({many})"),
        literal => {
            if literal
                .chars()
                .any(|c| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '*'))
            {
                bail!("Invalid segment '{literal}' in slice pattern '{pattern}'");
            }
            literal
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"[\w$]*")
        }
    };
    Ok(translated)
}
