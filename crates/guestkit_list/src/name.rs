//! Casing-based surname / given-names split.
//!
//! Surnames are expected in capitals (`DUPONT Jean`). Lines that do not follow
//! the convention fall back to "last word is the surname".

use crate::spec::EnumNameSplit;

/// Split a cleaned name line into surname and given names.
pub fn split_name(text: &str) -> EnumNameSplit {
    let c_text = text.replace('\'', " ");
    let (l_surname_tokens, l_given_tokens): (Vec<&str>, Vec<&str>) =
        c_text.split_whitespace().partition(|token| is_surname_token(token));

    let c_given_names = to_title_case(&l_given_tokens.join(" "));
    // A line made only of capitals keeps empty given names; the whole line is
    // not echoed back as given names.
    if !l_surname_tokens.is_empty() {
        return EnumNameSplit::SurnameFound {
            surname: to_title_case(&l_surname_tokens.join(" ")),
            given_names: c_given_names,
        };
    }

    let l_words: Vec<&str> = c_given_names.split_whitespace().collect();
    match l_words.split_last() {
        Some((c_last, l_leading)) if !l_leading.is_empty() => EnumNameSplit::NoSurnameFallback {
            surname: c_last.to_uppercase(),
            given_names: l_leading.join(" "),
        },
        _ => EnumNameSplit::GivenNamesOnly {
            given_names: c_given_names,
        },
    }
}

/// Uppercase token, or a 3+ char token uppercase except for its last char.
pub fn is_surname_token(token: &str) -> bool {
    if is_uppercase_word(token) {
        return true;
    }
    let l_chars: Vec<char> = token.chars().collect();
    if l_chars.len() <= 2 {
        return false;
    }
    let c_head: String = l_chars[..l_chars.len() - 1].iter().collect();
    is_uppercase_word(&c_head)
}

/// At least one cased character and no lowercase one.
fn is_uppercase_word(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Capitalize the first letter of every run of letters, lowercase the rest.
pub fn to_title_case(text: &str) -> String {
    let mut c_out = String::with_capacity(text.len());
    let mut if_prev_cased = false;
    for chr in text.chars() {
        let if_cased = chr.is_uppercase() || chr.is_lowercase();
        if if_cased && if_prev_cased {
            c_out.extend(chr.to_lowercase());
        } else if if_cased {
            c_out.extend(chr.to_uppercase());
        } else {
            c_out.push(chr);
        }
        if_prev_cased = if_cased;
    }
    c_out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_surname_in_capitals() {
        assert_eq!(
            split_name("DUPONT Jean"),
            EnumNameSplit::SurnameFound {
                surname: "Dupont".to_string(),
                given_names: "Jean".to_string(),
            }
        );
        assert_eq!(
            split_name("Marie-claire DE LA TOUR"),
            EnumNameSplit::SurnameFound {
                surname: "De La Tour".to_string(),
                given_names: "Marie-Claire".to_string(),
            }
        );
    }

    #[test]
    fn test_split_name_tolerates_trailing_lowercase() {
        assert!(is_surname_token("DUPONTs"));
        assert!(!is_surname_token("Du"));
        assert!(!is_surname_token("Jean"));
        assert_eq!(
            split_name("MARTINs Paul").into_parts(),
            ("Martins".to_string(), "Paul".to_string())
        );
    }

    #[test]
    fn test_split_name_apostrophe_splits_tokens() {
        assert_eq!(
            split_name("D'ARTAGNAN Charles").into_parts(),
            ("D Artagnan".to_string(), "Charles".to_string())
        );
    }

    #[test]
    fn test_split_name_falls_back_to_last_word() {
        assert_eq!(
            split_name("jean dupont"),
            EnumNameSplit::NoSurnameFallback {
                surname: "DUPONT".to_string(),
                given_names: "Jean".to_string(),
            }
        );
        assert_eq!(
            split_name("Anne Marie Leroy").into_parts(),
            ("LEROY".to_string(), "Anne Marie".to_string())
        );
    }

    #[test]
    fn test_split_name_single_word_without_capitals() {
        assert_eq!(
            split_name("cher"),
            EnumNameSplit::GivenNamesOnly {
                given_names: "Cher".to_string(),
            }
        );
        assert_eq!(
            split_name(""),
            EnumNameSplit::GivenNamesOnly {
                given_names: String::new(),
            }
        );
    }

    #[test]
    fn test_split_name_only_capitals_leaves_given_names_empty() {
        assert_eq!(
            split_name("DUPONT").into_parts(),
            ("Dupont".to_string(), String::new())
        );
    }

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("jean-PIERRE"), "Jean-Pierre");
        assert_eq!(to_title_case("ÉLODIE"), "Élodie");
        assert_eq!(to_title_case(""), "");
    }
}
