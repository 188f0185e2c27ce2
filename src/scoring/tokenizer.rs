/// Split a transcript into lowercase ASCII-alphanumeric words.
///
/// Any run of other characters separates words, so punctuation and case never
/// affect the word sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_and_case_insensitive() {
        assert_eq!(tokenize("Hi, there!"), vec!["hi", "there"]);
        assert_eq!(tokenize("Hi, there!"), tokenize("hi there"));
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...!?  ").is_empty());
    }

    #[test]
    fn test_apostrophes_and_digits_split() {
        assert_eq!(
            tokenize("I'm 13 years-old, class 8th"),
            vec!["i", "m", "13", "years", "old", "class", "8th"]
        );
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        assert_eq!(tokenize("café crème"), vec!["caf", "cr", "me"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Hello everyone, myself Muskan.";
        assert_eq!(tokenize(text), tokenize(text));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokenize_is_deterministic(text in any::<String>()) {
            prop_assert_eq!(tokenize(&text), tokenize(&text));
        }

        #[test]
        fn tokenize_ignores_ascii_case(text in any::<String>()) {
            prop_assert_eq!(tokenize(&text), tokenize(&text.to_ascii_uppercase()));
        }

        #[test]
        fn tokenize_ignores_punctuation(text in "[a-zA-Z0-9 .,!?;:'\"()\\-]{0,80}") {
            let spaced: String = text
                .chars()
                .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
                .collect();
            prop_assert_eq!(tokenize(&text), tokenize(&spaced));
        }

        #[test]
        fn tokens_are_lowercase_alphanumeric(text in any::<String>()) {
            for token in tokenize(&text) {
                prop_assert!(!token.is_empty());
                prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
            }
        }
    }
}
