//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};

/// Marker line that opens and closes a front-matter block
const DELIMITER: &str = "---";

/// Accepts any YAML scalar and keeps its textual form.
///
/// `readTime: 5` or `date: 2023-01-01` are plain scalars that YAML would
/// otherwise type as numbers; the post model keeps every field as text.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Metadata block of a content file.
///
/// Every field is optional: a key missing from the block stays `None` and the
/// view layer decides how to display it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub category: Option<String>,
    #[serde(
        rename = "readTime",
        alias = "read_time",
        deserialize_with = "scalar_string"
    )]
    pub read_time: Option<String>,
}

/// Errors raised while splitting or decoding a front-matter block
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("unterminated front-matter block (missing closing ---)")]
    Unterminated,

    #[error("invalid YAML in front-matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("unsupported front-matter language: {0}")]
    UnsupportedLanguage(String),
}

impl FrontMatter {
    /// Split a content file into its metadata and its body.
    ///
    /// The block must start on the very first line with `---` and end at the
    /// next line that is exactly `---`. The opening marker may name the
    /// language (`---yaml`); only YAML is read. The body is everything after
    /// the closing line, byte for byte. A file that does not open with the
    /// marker has no metadata and its whole text is the body.
    pub fn parse(source: &str) -> Result<(Self, &str), FrontMatterError> {
        let (first, mut rest) = split_line(source);
        let language = match opening_language(first) {
            Some(language) => language,
            None => return Ok((FrontMatter::default(), source)),
        };
        if !matches!(language.to_ascii_lowercase().as_str(), "" | "yaml" | "yml") {
            return Err(FrontMatterError::UnsupportedLanguage(language.to_string()));
        }

        let block_start = source.len() - rest.len();
        let mut block_end = block_start;

        while !rest.is_empty() {
            let (line, next) = split_line(rest);
            if line.trim_end() == DELIMITER {
                let yaml = &source[block_start..block_end];
                return Ok((Self::from_yaml(yaml)?, next));
            }
            block_end += rest.len() - next.len();
            rest = next;
        }

        Err(FrontMatterError::Unterminated)
    }

    fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        let blank = yaml.lines().all(|line| {
            let trimmed = line.trim();
            trimmed.is_empty() || trimmed.starts_with('#')
        });
        if blank {
            return Ok(FrontMatter::default());
        }

        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Language named on an opening marker line, `""` when none is given
fn opening_language(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(DELIMITER)?;
    // `----` is a thematic break, not a marker
    if rest.starts_with('-') {
        return None;
    }
    Some(rest.trim())
}

/// Split off the first line, consuming its line break
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}
