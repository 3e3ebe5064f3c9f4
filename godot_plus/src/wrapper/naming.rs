// Identifier case conversion.
//
// Exposed names are snake_case. Manifests may spell members either way
// (Rust methods are already `get_speed`; hand-written manifests may say
// `GetSpeed`), so accessor lookup compares snake-cased forms.

/// Convert an identifier to snake_case.
///
/// Word boundaries: lower/digit followed by upper (`myDir` → `my_dir`), the
/// end of an acronym (`HTTPServer` → `http_server`), and any run of `_`,
/// `-` or whitespace (collapsed to one `_`). Digits stay attached to the
/// preceding word (`speed2` stays `speed2`). Leading and trailing
/// separators are dropped.
pub fn to_snake(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// True when `declared` names the same member as `wanted`, either exactly
/// or after snake-casing both.
pub fn same_member(declared: &str, wanted: &str) -> bool {
    declared == wanted || to_snake(declared) == to_snake(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_splits_on_upper() {
        assert_eq!(to_snake("MyDirection"), "my_direction");
        assert_eq!(to_snake("GetSpeed"), "get_speed");
        assert_eq!(to_snake("secretPrinted"), "secret_printed");
    }

    #[test]
    fn snake_case_is_unchanged() {
        assert_eq!(to_snake("get_speed"), "get_speed");
        assert_eq!(to_snake("speed2"), "speed2");
    }

    #[test]
    fn acronyms_end_at_next_word() {
        assert_eq!(to_snake("HTTPServer"), "http_server");
        assert_eq!(to_snake("ID"), "id");
        assert_eq!(to_snake("NodeID"), "node_id");
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(to_snake("X_Ready"), "x_ready");
        assert_eq!(to_snake("__private__"), "private");
        assert_eq!(to_snake("kebab-case name"), "kebab_case_name");
    }

    #[test]
    fn digits_stay_attached() {
        assert_eq!(to_snake("Vector2"), "vector2");
        assert_eq!(to_snake("Area2D"), "area2_d");
    }

    #[test]
    fn same_member_matches_either_spelling() {
        assert!(same_member("GetSpeed", "get_speed"));
        assert!(same_member("get_speed", "get_speed"));
        assert!(same_member("MyDirection", "MyDirection"));
        assert!(!same_member("GetSpeed", "get_speed2"));
    }
}
