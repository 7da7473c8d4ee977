//! Identifier conventions shared by profiles, questionnaires and validation
//! results.

/// Lower-cases `text`, replaces every non-alphanumeric character with `_`,
/// collapses runs of `_` and trims them from both ends. Letters outside
/// ASCII are kept.
///
/// `"Beauty & Skincare: Deep Dive!"` → `"beauty_skincare_deep_dive"`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Slug used as the stem of a person's profile ids. Names without a single
/// letter or digit share the stem `profile`.
pub fn profile_slug(person_name: &str) -> String {
    let slug = slugify(person_name);
    if slug.is_empty() {
        "profile".to_string()
    } else {
        slug
    }
}

/// `rachita` + 3 → `rachita_v3`.
pub fn profile_version_id(person_name: &str, version_number: i32) -> String {
    format!("{}_v{}", profile_slug(person_name), version_number)
}

/// Highest version among `existing_ids` of the form `{slug}_v{n}`, or 0.
///
/// Ids are allocated per slug: different names can share one (`Mary Jane`,
/// `mary-jane`).
pub fn max_version_for_slug<'a>(
    slug: &str,
    existing_ids: impl IntoIterator<Item = &'a str>,
) -> i32 {
    let prefix = format!("{slug}_v");
    existing_ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(&prefix))
        .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|n| n.parse::<i32>().ok())
        .max()
        .unwrap_or(0)
}

/// Version label of the twin a validation run was made against.
///
/// Ids already carrying a version (`rachita_v2`) are kept; anything else maps
/// to version 1 of its first `_`-separated segment (`rachita_20250809` →
/// `rachita_v1`).
pub fn digital_twin_version(profile_id: &str) -> String {
    if profile_id.contains("_v") {
        return profile_id.to_string();
    }
    let base = profile_id.split('_').next().unwrap_or(profile_id);
    format!("{base}_v1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Beauty & Skincare: Deep Dive!"), "beauty_skincare_deep_dive");
        assert_eq!(slugify("  Rachita  "), "rachita");
        assert_eq!(slugify("__already__slugged__"), "already_slugged");
        assert_eq!(slugify("Émile"), "émile");
        assert_eq!(slugify("李明"), "李明");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_profile_slug_never_empty() {
        assert_eq!(profile_slug("Rachita"), "rachita");
        assert_eq!(profile_slug("?!"), "profile");
        assert_eq!(profile_version_id("--", 2), "profile_v2");
    }

    #[test]
    fn test_profile_version_id() {
        assert_eq!(profile_version_id("Rachita", 3), "rachita_v3");
        assert_eq!(profile_version_id("Mary Jane", 1), "mary_jane_v1");
        assert_ne!(profile_version_id("李明", 1), profile_version_id("王芳", 1));
        assert_eq!(profile_version_id("李明", 1), "李明_v1");
    }

    #[test]
    fn test_max_version_for_slug() {
        let ids = ["mary_jane_v1", "mary_jane_v3", "mary_jane_vx", "mary_jane_v", "mary_v9"];
        assert_eq!(max_version_for_slug("mary_jane", ids), 3);
        assert_eq!(max_version_for_slug("mary", ids), 9);
        assert_eq!(max_version_for_slug("ana", ids), 0);
    }

    #[test]
    fn test_names_sharing_a_slug_get_distinct_ids() {
        // "mary-jane" already holds v1; "Mary Jane" must not reuse it.
        let existing = [profile_version_id("mary-jane", 1)];
        let slug = profile_slug("Mary Jane");
        let next = max_version_for_slug(&slug, existing.iter().map(String::as_str)) + 1;
        assert_ne!(profile_version_id("Mary Jane", next), existing[0]);
        assert_eq!(profile_version_id("Mary Jane", next), "mary_jane_v2");
    }

    #[test]
    fn test_digital_twin_version() {
        assert_eq!(digital_twin_version("rachita_v12"), "rachita_v12");
        assert_eq!(digital_twin_version("rachita_20250809"), "rachita_v1");
        assert_eq!(digital_twin_version("rachita"), "rachita_v1");
    }
}
