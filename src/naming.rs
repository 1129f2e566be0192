//! Casing helpers that derive every identifier form from one canonical name.
//! All functions are total: any input, including the empty string, yields
//! a deterministic output.

/// Converts a kebab-case name into PascalCase.
///
/// Each `-` separated segment gets its first character upper-cased and the
/// rest lower-cased. Empty segments disappear.
///
/// ```
/// use meower::naming::to_pascal_case;
/// assert_eq!(to_pascal_case("my-social-app"), "MySocialApp");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a PascalCase name into snake_case.
///
/// ```
/// use meower::naming::to_snake_case;
/// assert_eq!(to_snake_case("UserService"), "user_service");
/// ```
pub fn to_snake_case(s: &str) -> String {
    split_on_uppercase(s, '_')
}

/// Converts a PascalCase name into kebab-case.
///
/// ```
/// use meower::naming::to_kebab_case;
/// assert_eq!(to_kebab_case("UserService"), "user-service");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    split_on_uppercase(s, '-')
}

/// Converts a kebab-case project name into UPPER_SNAKE_CASE.
pub fn to_upper_snake_case(s: &str) -> String {
    s.replace('-', "_").to_uppercase()
}

/// Naive English pluralization used for table names.
///
/// Lower-cases the input, then: a trailing `y` becomes `ies`, words ending in
/// `s`, `sh` or `ch` get `es`, everything else gets `s`.
///
/// Irregular plurals are not handled (`person` becomes `persons`, `day`
/// becomes `daies`). Generated table names depend on this exact behaviour,
/// so it must stay reproducible rather than linguistically correct.
pub fn to_plural(word: &str) -> String {
    let word = word.to_lowercase();
    if let Some(stem) = word.strip_suffix('y') {
        format!("{stem}ies")
    } else if word.ends_with('s') || word.ends_with("sh") || word.ends_with("ch") {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

// Inserts `separator` before every uppercase character except the first one.
fn split_on_uppercase(s: &str, separator: char) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push(separator);
        }
        result.extend(c.to_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_uppercase_keeps_leading_capital_attached() {
        assert_eq!(split_on_uppercase("Post", '_'), "post");
        assert_eq!(split_on_uppercase("HTTPServer", '-'), "h-t-t-p-server");
        assert_eq!(split_on_uppercase("", '-'), "");
    }
}
