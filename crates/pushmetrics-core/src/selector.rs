//! Label selectors (panic-free parser).
//!
//! Supported requirement forms, comma separated:
//! - `key=value`, `key==value`, `key!=value`
//! - `key in (a,b)`, `key notin (a,b)`
//! - `key` (exists), `!key` (does not exist)
//!
//! `Selector` is the matching form handed to object listers. `LabelSelector`
//! is the structured form (`matchLabels` + `matchExpressions`) echoed back in
//! metric value records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Label set of an object.
pub type Labels = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

/// One parsed requirement. `values` is sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub key: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl Requirement {
    pub fn matches(&self, labels: &Labels) -> bool {
        let current = labels.get(&self.key);
        match self.operator {
            Operator::Equals | Operator::In => {
                current.is_some_and(|v| self.values.iter().any(|x| x == v))
            }
            Operator::NotEquals | Operator::NotIn => {
                current.map_or(true, |v| self.values.iter().all(|x| x != v))
            }
            Operator::Exists => current.is_some(),
            Operator::DoesNotExist => current.is_none(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let single = self.values.first().map(String::as_str).unwrap_or_default();
        match self.operator {
            Operator::Equals => write!(f, "{}={}", self.key, single),
            Operator::NotEquals => write!(f, "{}!={}", self.key, single),
            Operator::In => write!(f, "{} in ({})", self.key, self.values.join(",")),
            Operator::NotIn => write!(f, "{} notin ({})", self.key, self.values.join(",")),
            Operator::Exists => f.write_str(&self.key),
            Operator::DoesNotExist => write!(f, "!{}", self.key),
        }
    }
}

/// Parsed label selector. The empty selector matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    requirements: Vec<Requirement>,
}

impl Selector {
    /// Selector matching every object.
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn parse(s: &str) -> Result<Self> {
        let mut requirements = Vec::new();
        for raw in split_top_level(s)? {
            let raw = raw.trim();
            if raw.is_empty() {
                if s.trim().is_empty() {
                    continue;
                }
                return Err(MetricsError::SelectorParse(format!("empty requirement in {s:?}")));
            }
            requirements.push(parse_requirement(raw)?);
        }
        requirements.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(Self { requirements })
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn matches(&self, labels: &Labels) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.requirements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{r}")?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split on commas that are not inside a `( ... )` value set.
fn split_top_level(s: &str) -> Result<Vec<&str>> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| MetricsError::SelectorParse(format!("unbalanced ')' in {s:?}")))?;
            }
            ',' if depth == 0 => {
                out.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(MetricsError::SelectorParse(format!("unclosed '(' in {s:?}")));
    }
    out.push(&s[start..]);
    Ok(out)
}

fn parse_requirement(raw: &str) -> Result<Requirement> {
    if let Some(rest) = raw.strip_prefix('!') {
        let key = validate_key(rest.trim())?;
        return Ok(Requirement {
            key,
            operator: Operator::DoesNotExist,
            values: Vec::new(),
        });
    }

    let key_end = raw.find(|c: char| !is_key_char(c)).unwrap_or(raw.len());
    let key = validate_key(&raw[..key_end])?;
    let rest = raw[key_end..].trim_start();

    if rest.is_empty() {
        return Ok(Requirement {
            key,
            operator: Operator::Exists,
            values: Vec::new(),
        });
    }

    let (operator, values) = if let Some(v) = rest.strip_prefix("!=") {
        (Operator::NotEquals, vec![validate_value(v.trim())?])
    } else if let Some(v) = rest.strip_prefix("==").or_else(|| rest.strip_prefix('=')) {
        (Operator::Equals, vec![validate_value(v.trim())?])
    } else if let Some(v) = strip_keyword(rest, "notin") {
        (Operator::NotIn, parse_value_set(v)?)
    } else if let Some(v) = strip_keyword(rest, "in") {
        (Operator::In, parse_value_set(v)?)
    } else {
        return Err(MetricsError::SelectorParse(format!(
            "unknown operator in requirement {raw:?}"
        )));
    };

    Ok(Requirement { key, operator, values })
}

/// Strip a set-operator keyword that must be followed by whitespace or `(`.
fn strip_keyword<'a>(s: &'a str, kw: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(kw)?;
    match rest.chars().next() {
        Some(c) if c.is_whitespace() || c == '(' => Some(rest.trim_start()),
        _ => None,
    }
}

fn parse_value_set(s: &str) -> Result<Vec<String>> {
    let inner = s
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .ok_or_else(|| MetricsError::SelectorParse(format!("expected '(values)', got {s:?}")))?;

    let mut values = inner
        .split(',')
        .map(|v| validate_value(v.trim()))
        .collect::<Result<Vec<_>>>()?;
    if values.iter().all(String::is_empty) {
        return Err(MetricsError::SelectorParse("value set must not be empty".into()));
    }
    values.sort();
    values.dedup();
    Ok(values)
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

fn validate_key(key: &str) -> Result<String> {
    if key.is_empty() || key.len() > 316 || !key.chars().all(is_key_char) {
        return Err(MetricsError::SelectorParse(format!("invalid label key {key:?}")));
    }
    Ok(key.to_string())
}

fn validate_value(v: &str) -> Result<String> {
    let ok = v.len() <= 63
        && v.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !ok {
        return Err(MetricsError::SelectorParse(format!("invalid label value {v:?}")));
    }
    Ok(v.to_string())
}

/// Structured selector requirement (`matchExpressions` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// Structured label selector as carried in metric identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

impl LabelSelector {
    /// Parse selector syntax straight into the structured form.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(Self::from(&Selector::parse(s)?))
    }
}

impl From<&Selector> for LabelSelector {
    fn from(sel: &Selector) -> Self {
        let mut out = LabelSelector::default();
        for r in sel.requirements() {
            let operator = match r.operator {
                Operator::Equals => {
                    let v = r.values.first().cloned().unwrap_or_default();
                    out.match_labels.insert(r.key.clone(), v);
                    continue;
                }
                Operator::In => "In",
                Operator::NotEquals | Operator::NotIn => "NotIn",
                Operator::Exists => "Exists",
                Operator::DoesNotExist => "DoesNotExist",
            };
            out.match_expressions.push(LabelSelectorRequirement {
                key: r.key.clone(),
                operator: operator.to_string(),
                values: r.values.clone(),
            });
        }
        out
    }
}
