use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawNode {
    #[serde(default)]
    pub(super) name: Option<Value>,
    #[serde(default)]
    pub(super) id: Option<Value>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) children: Option<Vec<RawNode>>,
    #[serde(default)]
    pub(super) sites: Option<Vec<RawRecord>>,
    #[serde(default)]
    pub(super) papers: Option<Vec<RawRecord>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawRecord {
    #[serde(default)]
    pub(super) title: Option<Value>,
    #[serde(default)]
    pub(super) url: Option<Value>,
    #[serde(default)]
    pub(super) summary: Option<Value>,
    #[serde(default)]
    pub(super) authors: Option<Value>,
    #[serde(default)]
    pub(super) year: Option<Value>,
}

pub(super) fn parse_raw_document(raw: &str) -> Result<RawNode> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in content document")?;
    if !parsed.is_object() {
        return Err(anyhow!(
            "unexpected JSON type for content root; expected an object"
        ));
    }

    RawNode::deserialize(parsed).context("content document does not describe a topic tree")
}

/// Renders a scalar document value as text. `null`, empty strings and
/// structured values yield `None`.
pub(super) fn scalar_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() { None } else { Some(text) }
}
