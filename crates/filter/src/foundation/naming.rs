//! Identity names derived from attribute names.
//!
//! A union declared as `accounts` whose alternative is an `object` filter with
//! no explicit `class` means "an object of class `Account`". The derivation is
//! a plain string transform: singularize the last underscore-separated word,
//! then camelize.

/// Derives a class-like identity from an attribute name.
///
/// ```rust
/// use strainer_filter::foundation::derive_class_name;
///
/// assert_eq!(derive_class_name("account"), "Account");
/// assert_eq!(derive_class_name("user_profiles"), "UserProfile");
/// assert_eq!(derive_class_name("categories"), "Category");
/// ```
pub fn derive_class_name(name: &str) -> String {
    let words: Vec<&str> = name.split('_').filter(|w| !w.is_empty()).collect();
    let Some((last, init)) = words.split_last() else {
        return String::new();
    };

    let mut out = String::with_capacity(name.len());
    for word in init {
        push_capitalized(&mut out, word);
    }
    push_capitalized(&mut out, &singularize(last));
    out
}

fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    for suffix in ["sses", "xes", "ches", "shes", "zes"] {
        if lower.ends_with(suffix) {
            return word[..word.len() - 2].to_owned();
        }
    }
    if lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return word[..word.len() - 1].to_owned();
    }
    word.to_owned()
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}
