//! Spoken number words to digit strings.

/// Map a transcript to the digits it speaks.
///
/// Number words (`zero`/`oh` through `nine`) become digits, digits pass
/// through, and everything else is dropped.
#[must_use]
pub fn transcript_to_digits(transcript: &str) -> String {
    let lower = transcript.to_lowercase();
    let mut digits = String::new();
    for token in lower.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
        if let Some(digit) = word_digit(token) {
            digits.push(digit);
        } else {
            digits.extend(token.chars().filter(char::is_ascii_digit));
        }
    }
    digits
}

fn word_digit(word: &str) -> Option<char> {
    let digit = match word {
        "zero" | "oh" | "o" => '0',
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        "nine" => '9',
        _ => return None,
    };
    Some(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_words_map_to_digits() {
        assert_eq!(
            transcript_to_digits("one two three four five six seven eight nine oh"),
            "1234567890"
        );
    }

    #[test]
    fn digits_and_words_mix() {
        assert_eq!(transcript_to_digits("98 seven 6, Five."), "98765");
    }

    #[test]
    fn other_words_are_dropped() {
        assert_eq!(transcript_to_digits("my number is nine eight"), "98");
        assert_eq!(transcript_to_digits("hello"), "");
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(transcript_to_digits("ZERO Oh"), "00");
    }
}
