use std::str::FromStr;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use spdlog::warn;

use crate::text_utils::strip_md_extension;
use crate::util::post_date::PostDate;

/// Front-matter of a post in the Astro content collection
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<PostDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PostDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_date: Option<PostDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<PostDate>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    pub published: bool,
}

pub struct NormalizedMeta {
    pub meta: PostMeta,
    pub warnings: Vec<String>,
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Same notion of "set" the Hexo templates use: null, false, 0 and "" are unset
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_present(&tagged.value),
    }
}

fn present<'a>(front_matter: &'a Mapping, key: &str) -> Option<&'a Value> {
    front_matter.get(key).filter(|v| is_present(v))
}

fn push_flattened(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Sequence(items) => items.iter().for_each(|item| push_flattened(item, out)),
        Value::Tagged(tagged) => push_flattened(&tagged.value, out),
        other => {
            if let Some(s) = scalar_to_string(other) {
                out.push(s);
            }
        }
    }
}

/// A list stays a list, a single value becomes a list of one and a missing
/// value an empty list. Nested lists (Hexo category hierarchies) are flattened.
pub fn coerce_to_list(value: Option<&Value>) -> Vec<String> {
    let mut res = vec![];
    match value {
        None | Some(Value::Mapping(_)) => {}
        Some(Value::String(s)) if s.is_empty() => {}
        Some(value) => push_flattened(value, &mut res),
    }
    res
}

fn parse_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "no" | "off" | "0" => false,
            _ => true,
        },
        other => is_present(other),
    }
}

fn normalize_date(file_name: &str, front_matter: &Mapping, key: &str, warnings: &mut Vec<String>) -> Option<PostDate> {
    let value = present(front_matter, key)?;
    let Some(date_str) = scalar_to_string(value) else {
        let msg = format!("{}: unsupported {} value {:?}", file_name, key, value);
        warn!("{}", msg);
        warnings.push(msg);
        return None;
    };

    match PostDate::from_str(&date_str) {
        Ok(date) => Some(date),
        Err(e) => {
            let msg = format!("{}: {} in field {}", file_name, e, key);
            warn!("{}", msg);
            warnings.push(msg);
            None
        }
    }
}

/// Maps Hexo front-matter to the Astro schema. Never fails: missing or invalid
/// fields fall back to defaults and produce a warning when something is dropped.
pub fn normalize_meta(front_matter: &Mapping, file_name: &str) -> NormalizedMeta {
    let mut warnings = vec![];

    let title = present(front_matter, "title")
        .and_then(scalar_to_string)
        .unwrap_or_else(|| strip_md_extension(file_name).to_string());

    let publish_date = normalize_date(file_name, front_matter, "date", &mut warnings);
    let update_date = normalize_date(file_name, front_matter, "updated", &mut warnings);

    let categories = coerce_to_list(front_matter.get("categories"));
    let tags = coerce_to_list(front_matter.get("tags"));

    let excerpt = present(front_matter, "excerpt").cloned();
    let draft = front_matter.get("draft").map(parse_bool).unwrap_or(false);

    let meta = PostMeta {
        title,
        publish_date,
        date: publish_date,
        update_date,
        updated: update_date,
        categories,
        tags,
        description: excerpt.clone(),
        excerpt,
        image: present(front_matter, "hero").cloned(),
        draft,
        permalink: present(front_matter, "permalink").cloned(),
        layout: present(front_matter, "layout").cloned(),
        published: !draft,
    };

    NormalizedMeta { meta, warnings }
}
