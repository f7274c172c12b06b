//! Slug conventions shared by realm names, class names and spec names.

/// Convert a display name into an upstream-style slug.
///
/// Convention: lower-case, with every run of whitespace replaced by a
/// single hyphen. Other punctuation is kept as-is.
///
/// # Examples
///
/// ```
/// use guildboard_core::naming::slugify;
///
/// assert_eq!(slugify("Argent Dawn"), "argent-dawn");
/// assert_eq!(slugify("Beast Mastery"), "beast-mastery");
/// assert_eq!(slugify("Not fetched"), "not-fetched");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word() {
        assert_eq!(slugify("Frost"), "frost");
    }

    #[test]
    fn multi_word_realm() {
        assert_eq!(slugify("Twisting Nether"), "twisting-nether");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(slugify("Tarren   Mill"), "tarren-mill");
        assert_eq!(slugify("Tarren\tMill"), "tarren-mill");
    }

    #[test]
    fn leading_and_trailing_whitespace_become_hyphens() {
        assert_eq!(slugify(" Silvermoon "), "-silvermoon-");
    }

    #[test]
    fn apostrophes_survive() {
        assert_eq!(slugify("Kel'Thuzad"), "kel'thuzad");
    }

    #[test]
    fn empty() {
        assert_eq!(slugify(""), "");
    }
}
