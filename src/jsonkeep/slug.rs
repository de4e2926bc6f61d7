use deunicode::deunicode;

const SEPARATOR: char = '_';

/// Turns `text` into a lowercase ASCII identifier made of alphanumeric runs
/// joined by `_`. Non-ASCII text is transliterated first (`Küche` becomes
/// `kuche`), and apostrophes are dropped so `Paul's Room` becomes `pauls_room`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for ch in ascii.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')) {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_and_case() {
        assert_eq!(slugify("Living Room Lamp"), "living_room_lamp");
    }

    #[test]
    fn test_punctuation_runs_collapse() {
        assert_eq!(slugify("Hue -- color   lamp!!"), "hue_color_lamp");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(slugify("  __Office__  "), "office");
    }

    #[test]
    fn test_apostrophes_dropped() {
        assert_eq!(slugify("Paul's Room"), "pauls_room");
        assert_eq!(slugify("Kid\u{2019}s Room"), "kids_room");
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(slugify("Light 12.5"), "light_12_5");
    }

    #[test]
    fn test_unicode_transliterated() {
        assert_eq!(slugify("Küche Decke"), "kuche_decke");
        assert_eq!(slugify("Décor"), "decor");
    }

    #[test]
    fn test_output_is_always_ascii() {
        let slug = slugify("Küche Décor 東京");
        assert!(slug.starts_with("kuche_decor_"));
        assert!(slug.len() > "kuche_decor_".len());
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn test_nothing_left() {
        assert_eq!(slugify("!!! ---"), "");
        assert_eq!(slugify(""), "");
    }
}
