//! Route template parsing and path matching.
//!
//! # Responsibilities
//! - Parse templates such as `/questions/:uuid/` into segments
//! - Match a path against those segments, capturing named parameters
//! - Build a concrete path back from parameters
//!
//! # Design Decisions
//! - Literal segments are case-sensitive and compared byte-for-byte
//! - A named segment matches exactly one non-empty path segment
//! - Captured values are returned verbatim (no percent-decoding)
//! - Reverse refuses values that would not match back as one segment
//! - Trailing slashes are significant unless the caller relaxes it
//! - No regex: one pass over the segments

use std::fmt;

use crate::routing::error::ConfigurationError;
use crate::routing::params::Params;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Why a path could not be built from parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverseError {
    /// No value for the named segment.
    Missing(String),
    /// The value is empty or contains `/`, `?` or `#`.
    Invalid { param: String, value: String },
}

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a route template.
    ///
    /// Segments beginning with `:` are named segments; the name must be
    /// non-empty, made of ASCII alphanumerics or `_`, and unique within the
    /// template.
    pub fn parse(template: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidPattern {
            pattern: template.to_string(),
            reason,
        };

        if !template.starts_with('/') {
            return Err(invalid("must start with '/'".into()));
        }

        let mut segments = Vec::new();
        for part in template.split('/') {
            match part.strip_prefix(':') {
                Some(name) => {
                    if name.is_empty() {
                        return Err(invalid("empty parameter name".into()));
                    }
                    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        return Err(invalid(format!("invalid parameter name ':{}'", name)));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(invalid(format!("duplicate parameter ':{}'", name)));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template this pattern was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Names of the named segments, in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the template has no named segments.
    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Match `path` against this pattern and capture its named segments.
    ///
    /// With `strict_trailing_slash` off, one trailing slash is optional on
    /// both the template and the path.
    pub fn captures(&self, path: &str, strict_trailing_slash: bool) -> Option<Params> {
        let (segments, path) = if strict_trailing_slash {
            (self.segments.as_slice(), path)
        } else {
            (self.segments_without_trailing_slash(), strip_trailing_slash(path))
        };

        let mut parts = path.split('/');
        let mut params = Params::new();
        for segment in segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.as_str(), part);
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Returns true if `path` matches this pattern.
    pub fn is_match(&self, path: &str, strict_trailing_slash: bool) -> bool {
        self.captures(path, strict_trailing_slash).is_some()
    }

    /// Substitute named segments with values from `params`.
    ///
    /// Every value must fill exactly one segment, so the built path matches
    /// this pattern again with the same captures.
    pub fn reverse(&self, params: &Params) -> Result<String, ReverseError> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push(literal.as_str()),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| ReverseError::Missing(name.clone()))?;
                    if !is_segment_value(value) {
                        return Err(ReverseError::Invalid {
                            param: name.clone(),
                            value: value.to_string(),
                        });
                    }
                    parts.push(value);
                }
            }
        }
        Ok(parts.join("/"))
    }

    fn segments_without_trailing_slash(&self) -> &[Segment] {
        match self.segments.split_last() {
            Some((Segment::Literal(last), rest)) if last.is_empty() && rest.len() > 1 => rest,
            _ => &self.segments,
        }
    }
}

fn is_segment_value(value: &str) -> bool {
    !value.is_empty() && !value.contains(['/', '?', '#'])
}

fn strip_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
