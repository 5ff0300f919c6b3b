//! Conventional route templates: `{controller=Home}/{action=Index}/{id?}`.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("empty parameter name in segment '{0}'")]
    EmptyName(String),
    #[error("unbalanced braces in segment '{0}'")]
    Unbalanced(String),
    #[error("required parameter '{0}' follows an optional one")]
    RequiredAfterOptional(String),
    #[error("parameter '{0}' appears twice")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param {
        name: String,
        default: Option<String>,
        optional: bool,
    },
}

impl Segment {
    fn parse(raw: &str) -> Result<Self, PatternError> {
        let Some(inner) = raw.strip_prefix('{') else {
            if raw.contains(['{', '}']) {
                return Err(PatternError::Unbalanced(raw.to_string()));
            }
            return Ok(Segment::Literal(raw.to_string()));
        };
        let inner = inner
            .strip_suffix('}')
            .filter(|s| !s.contains(['{', '}']))
            .ok_or_else(|| PatternError::Unbalanced(raw.to_string()))?;

        let (name, default, optional) = match inner.split_once('=') {
            Some((name, default)) => (name, Some(default.to_string()), false),
            None => match inner.strip_suffix('?') {
                Some(name) => (name, None, true),
                None => (inner, None, false),
            },
        };

        if name.is_empty() {
            return Err(PatternError::EmptyName(raw.to_string()));
        }
        Ok(Segment::Param {
            name: name.to_string(),
            default,
            optional,
        })
    }

    /// Whether the segment may be left out of a request path.
    fn can_be_omitted(&self) -> bool {
        matches!(
            self,
            Segment::Param { default: Some(_), .. } | Segment::Param { optional: true, .. }
        )
    }
}

/// Parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let segments = path_segments(raw)
            .into_iter()
            .map(Segment::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen_omittable = false;
        let mut names = Vec::new();
        for segment in &segments {
            if let Segment::Param { name, .. } = segment {
                if names.contains(&name.as_str()) {
                    return Err(PatternError::Duplicate(name.clone()));
                }
                names.push(name.as_str());
            }
            if segment.can_be_omitted() {
                seen_omittable = true;
            } else if seen_omittable {
                let label = match segment {
                    Segment::Literal(text) => text.clone(),
                    Segment::Param { name, .. } => name.clone(),
                };
                return Err(PatternError::RequiredAfterOptional(label));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn starts_with_literal(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::Literal(_)))
    }

    /// Match a request path and return the route values.
    ///
    /// Literals compare ASCII case-insensitively; captured values keep the
    /// request's casing. Parameters missing from the path take their
    /// default; optional ones without a value are left out.
    pub fn match_path(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts = path_segments(path);
        if parts.len() > self.segments.len() {
            return None;
        }

        let mut values = BTreeMap::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match (segment, parts.get(i)) {
                (Segment::Literal(text), Some(part)) => {
                    if !text.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                (Segment::Literal(_), None) => return None,
                (Segment::Param { name, .. }, Some(part)) => {
                    values.insert(name.clone(), (*part).to_string());
                }
                (Segment::Param { name, default, optional }, None) => match default {
                    Some(value) => {
                        values.insert(name.clone(), value.clone());
                    }
                    None if *optional => {}
                    None => return None,
                },
            }
        }
        Some(values)
    }
}
