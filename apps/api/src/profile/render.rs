use serde_json::{Map, Value};

use super::data::ProfileData;

const CENTREPIECE_SECTIONS: [(&str, &str); 5] = [
    ("demographics", "Demographics"),
    ("lifestyle", "Lifestyle"),
    ("media_culture", "Media & Culture"),
    ("personality", "Personality"),
    ("values_beliefs", "Values & Beliefs"),
];

const NEW_FORMAT_GROUPS: [&str; 3] = ["centrepiece", "categories", "products"];

/// Renders profile data as a Markdown document for display.
pub fn render_profile_markdown(profile_id: &str, data: &ProfileData) -> String {
    let mut md = format!("# Digital Twin Profile: {profile_id}\n\n");
    match data {
        ProfileData::New(new) => render_new(&mut md, new),
        ProfileData::Legacy(legacy) => {
            md.push_str("_Legacy profile format_\n\n");
            push_top_level(&mut md, legacy.iter());
        }
    }
    md
}

fn render_new(md: &mut String, data: &Map<String, Value>) {
    if let Some(Value::Object(centrepiece)) = data.get("centrepiece") {
        md.push_str("## Centrepiece (Core Foundation)\n\n");
        for (key, title) in CENTREPIECE_SECTIONS {
            if let Some(Value::Object(section)) = centrepiece.get(key) {
                push_fields(md, title, section);
            }
        }
        let rest: Map<String, Value> = centrepiece
            .iter()
            .filter(|(k, v)| !(v.is_object() && is_centrepiece_section(k)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        push_nested(md, &rest);
    }

    for (group, label) in [("categories", "Category"), ("products", "Product")] {
        let Some(Value::Object(entries)) = data.get(group) else {
            continue;
        };
        for (name, entry) in entries {
            match entry {
                Value::Object(obj) => {
                    md.push_str(&format!("## {label}: {}\n\n", title_case(name)));
                    push_nested(md, obj);
                }
                other => {
                    if let Some(text) = display_value(other) {
                        md.push_str(&format!("## {label}: {}\n\n{text}\n\n", title_case(name)));
                    }
                }
            }
        }
    }

    push_top_level(
        md,
        data.iter()
            .filter(|(k, v)| !(v.is_object() && NEW_FORMAT_GROUPS.contains(&k.as_str()))),
    );
}

fn is_centrepiece_section(key: &str) -> bool {
    CENTREPIECE_SECTIONS.iter().any(|(k, _)| *k == key)
}

/// One `##` section per object value, one bullet per scalar.
fn push_top_level<'a>(md: &mut String, entries: impl Iterator<Item = (&'a String, &'a Value)>) {
    for (key, value) in entries {
        match value {
            Value::Object(section) => {
                md.push_str(&format!("## {}\n\n", title_case(key)));
                push_nested(md, section);
            }
            other => {
                if let Some(text) = display_value(other) {
                    md.push_str(&format!("- **{}:** {}\n", title_case(key), text));
                }
            }
        }
    }
}

/// Renders an object whose values are either scalars or one level of
/// sub-sections.
fn push_nested(md: &mut String, obj: &Map<String, Value>) {
    let mut wrote_scalar = false;
    for (key, value) in obj {
        match value {
            Value::Object(section) => push_fields(md, &title_case(key), section),
            other => {
                if let Some(text) = display_value(other) {
                    md.push_str(&format!("- **{}:** {}\n", title_case(key), text));
                    wrote_scalar = true;
                }
            }
        }
    }
    if wrote_scalar {
        md.push('\n');
    }
}

fn push_fields(md: &mut String, title: &str, section: &Map<String, Value>) {
    let lines: Vec<String> = section
        .iter()
        .filter_map(|(k, v)| display_value(v).map(|text| format!("- **{}:** {text}\n", title_case(k))))
        .collect();
    if lines.is_empty() {
        return;
    }
    md.push_str(&format!("### {title}\n\n"));
    for line in lines {
        md.push_str(&line);
    }
    md.push('\n');
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(display_value)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// `facial_moisturizer` → `Facial Moisturizer`.
pub fn title_case(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().to_string() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("structure_vs_spontaneity"), "Structure Vs Spontaneity");
        assert_eq!(title_case("music"), "Music");
    }

    #[test]
    fn test_render_new_profile() {
        let data = ProfileData::classify(&json!({
            "centrepiece": {
                "demographics": { "name": "Rachita", "city": "" },
                "personality": { "social_energy": "Recharges alone" }
            },
            "products": {
                "facial_moisturizer": {
                    "moisturizer_usage": { "current_product_usage": "CeraVe PM" }
                }
            }
        }))
        .unwrap();

        let md = render_profile_markdown("rachita_v2", &data);
        assert!(md.starts_with("# Digital Twin Profile: rachita_v2\n"));
        assert!(md.contains("## Centrepiece (Core Foundation)"));
        assert!(md.contains("### Demographics"));
        assert!(md.contains("- **Name:** Rachita"));
        assert!(!md.contains("City"), "empty values are skipped");
        assert!(md.contains("- **Social Energy:** Recharges alone"));
        assert!(md.contains("## Product: Facial Moisturizer"));
        assert!(md.contains("### Moisturizer Usage"));
        assert!(!md.contains("### Lifestyle"));
    }

    #[test]
    fn test_render_legacy_profile() {
        let data = ProfileData::classify(&json!({
            "profile_id": "rachita_v1",
            "core_attitudes": { "skincare": "evidence-based" },
            "risk_tolerance": { "level": "low", "notes": null }
        }))
        .unwrap();

        let md = render_profile_markdown("rachita_v1", &data);
        assert!(md.contains("_Legacy profile format_"));
        assert!(md.contains("## Core Attitudes"));
        assert!(md.contains("- **Skincare:** evidence-based"));
        assert!(md.contains("- **Level:** low"));
        assert!(!md.contains("Notes"));
    }

    #[test]
    fn test_render_generic_category_scalars() {
        let data = ProfileData::classify(&json!({
            "categories": { "fitness": { "workout": "running", "tags": ["cardio", "outdoor"] } }
        }))
        .unwrap();
        let md = render_profile_markdown("x", &data);
        assert!(md.contains("## Category: Fitness"));
        assert!(md.contains("- **Tags:** cardio, outdoor"));
    }

    #[test]
    fn test_render_keeps_mistyped_and_unknown_fields() {
        let data = ProfileData::classify(&json!({
            "centrepiece": {
                "demographics": { "name": "Ana", "age": "31", "ethnicity": "Tamil" },
                "health": { "allergies": "none known" }
            },
            "products": { "sunscreen": "SPF 50 daily" },
            "interviewer_notes": "Prefers fragrance-free"
        }))
        .unwrap();

        let md = render_profile_markdown("ana_v1", &data);
        assert!(md.contains("- **Age:** 31"));
        assert!(md.contains("- **Ethnicity:** Tamil"));
        assert!(md.contains("### Health"));
        assert!(md.contains("- **Allergies:** none known"));
        assert!(md.contains("## Product: Sunscreen\n\nSPF 50 daily"));
        assert!(md.contains("- **Interviewer Notes:** Prefers fragrance-free"));
    }
}
