/// Converts a camel-cased identifier to `snake_case`.
///
/// Runs of capitals keep together until the last one that starts a word
/// (`HTMLParser` -> `html_parser`), and a capital following a lowercase letter
/// or digit starts a new word (`recipeBox2Go` -> `recipe_box2_go`).
pub fn underscore(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut split_acronyms = Vec::with_capacity(chars.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        let after_capital = i > 0 && chars[i - 1].is_ascii_uppercase();
        let before_lower = chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());
        if c.is_ascii_uppercase() && after_capital && before_lower {
            split_acronyms.push('_');
        }
        split_acronyms.push(*c);
    }

    let mut out = String::with_capacity(split_acronyms.len() + 4);
    let mut prev: Option<char> = None;
    for c in split_acronyms {
        if let Some(p) = prev {
            if c.is_ascii_uppercase() && (p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    out
}
