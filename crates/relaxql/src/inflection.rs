//! English inflection helpers for model and association names
//!
//! Suffix rules only; irregular nouns are not handled. Letter case of the
//! input is preserved, so `"Posts"` singularizes to `"Post"`.

/// Simple singularization (English-centric)
pub fn singularize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();

    if lower.ends_with("ies") && name.len() > 3 {
        format!("{}{}", &name[..name.len() - 3], matching_case(name, "y"))
    } else if lower.ends_with("es") && takes_es_suffix(&lower[..lower.len() - 2]) {
        name[..name.len() - 2].to_string()
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        name.to_string()
    } else if lower.ends_with('s') && name.len() > 1 {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}

// Stems ending in "che" pluralize with a bare "s" (caches, niches).
const CHE_STEMS: [&str; 5] = ["cache", "niche", "headache", "avalanche", "moustache"];

/// Returns true if `stem` is a singular that pluralizes with "es"
fn takes_es_suffix(stem: &str) -> bool {
    if stem.ends_with("ch") {
        return !CHE_STEMS.iter().any(|che| format!("{stem}e").ends_with(che));
    }
    stem.ends_with("ss")
        || stem.ends_with("sh")
        || stem.ends_with('x')
        || stem.ends_with('z')
        || is_consonant_us(stem)
}

// "status", "bus" and "campus" take "es"; "house" and "cause" do not.
fn is_consonant_us(stem: &str) -> bool {
    stem.strip_suffix("us")
        .and_then(|head| head.chars().last())
        .map_or(false, |c| !"aeiou".contains(c))
}

/// Simple pluralization (English-centric)
pub fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();

    if lower.ends_with('y')
        && !["ay", "ey", "iy", "oy", "uy"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
    {
        format!("{}{}", &name[..name.len() - 1], matching_case(name, "ies"))
    } else if lower.ends_with('s')
        || lower.ends_with("sh")
        || lower.ends_with("ch")
        || lower.ends_with('x')
        || lower.ends_with('z')
    {
        format!("{}{}", name, matching_case(name, "es"))
    } else if name.is_empty() {
        String::new()
    } else {
        format!("{}{}", name, matching_case(name, "s"))
    }
}

/// Lowercase the first character (`"PostTag"` -> `"postTag"`)
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Shouting names ("POSTS") keep shouting suffixes.
fn matching_case(name: &str, suffix: &str) -> String {
    let has_letters = name.chars().any(|c| c.is_ascii_alphabetic());
    if has_letters && !name.chars().any(|c| c.is_ascii_lowercase()) {
        suffix.to_ascii_uppercase()
    } else {
        suffix.to_string()
    }
}
