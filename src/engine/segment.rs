//! Line segmentation for one-line-at-a-time practice.
//!
//! Lines are cut at the last space inside a window of `max_line_length`
//! characters (the space stays at the end of the line), or mid-word when the
//! window has no space. Once the unscanned rest fits into a single window it
//! becomes the final line. Cutting never drops or duplicates characters, so
//! concatenating the output reproduces the input.

/// Split `text` into lines of at most `max_line_length` characters before
/// the cut point. A value of 0 is treated as 1.
pub fn segment(text: &str, max_line_length: usize) -> Vec<String> {
    let max = max_line_length.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < max {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == ' ' {
            last_space = Some(i);
        }

        if i - start == max {
            let cut = match last_space {
                Some(space) if space >= start => space + 1,
                _ => i,
            };
            lines.push(chars[start..cut].iter().collect());
            start = cut;
            last_space = None;

            if chars.len() - start <= max {
                break;
            }
            i = start;
            continue;
        }
        i += 1;
    }

    if start < chars.len() {
        lines.push(chars[start..].iter().collect());
    }
    lines
}

/// Segment a title and its body as two units: the title gets a trailing
/// newline so the user types a line break before the body starts.
pub fn segment_titled(title: &str, body: &str, max_line_length: usize) -> Vec<String> {
    let mut lines = segment(&format!("{title}\n"), max_line_length);
    lines.extend(segment(body, max_line_length));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_line() {
        assert_eq!(segment("hello", 24), vec!["hello"]);
        assert_eq!(segment("", 24), vec![""]);
    }

    #[test]
    fn test_short_line_is_idempotent() {
        let once = segment("already short", 24);
        let twice = segment(&once[0], 24);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_exact_length_text_is_one_line() {
        assert_eq!(segment("abcdef", 6), vec!["abcdef"]);
    }

    #[test]
    fn test_soft_wrap_keeps_trailing_space() {
        let lines = segment("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick ", "brown fox ", "jumps"]);
    }

    #[test]
    fn test_hard_wrap_without_spaces() {
        let lines = segment("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(lines, vec!["abcdefghij", "klmnopqrst", "uvwxyz"]);
    }

    #[test]
    fn test_space_before_window_does_not_trigger_soft_wrap() {
        // The only space sits in the first window; the second window must
        // hard-wrap instead of cutting at the stale space.
        let lines = segment("ab cdefghijklmnopqrstuvwxyz", 5);
        assert_eq!(lines[0], "ab ");
        assert_eq!(lines[1], "cdefg");
        assert_eq!(lines[2], "hijkl");
        assert_eq!(lines.concat(), "ab cdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_space_at_cut_position_stays_on_line() {
        // Window "abcde" is full when the scan reaches the space at index 5.
        let lines = segment("abcde fghijklm", 5);
        assert_eq!(lines[0], "abcde ");
        assert_eq!(lines.concat(), "abcde fghijklm");
    }

    #[test]
    fn test_short_remainder_is_not_split() {
        let lines = segment("aaaa b cc", 5);
        assert_eq!(lines, vec!["aaaa ", "b cc"]);
    }

    #[test]
    fn test_trailing_space_at_cut_leaves_no_empty_line() {
        let lines = segment("abcde ", 5);
        assert_eq!(lines, vec!["abcde "]);
    }

    #[test]
    fn test_zero_length_is_treated_as_one() {
        assert_eq!(segment("abc", 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reconstruction_and_line_bound() {
        let texts = [
            "Rust is a multi-paradigm, general-purpose programming language that emphasizes performance, type safety, and concurrency.",
            "Supercalifragilisticexpialidocious is long and so is pneumonoultramicroscopicsilicovolcanoconiosis indeed",
            "a b c d e f g h i j k l m n o p q r s t u v w x y z",
            "Zeile\nmit\tTab und Umlauten äöü über mehrere Wörter hinweg",
        ];
        for max in [1, 3, 7, 10, 24] {
            for text in texts {
                let lines = segment(text, max);
                assert_eq!(lines.concat(), text, "max={max}");
                for line in &lines[..lines.len() - 1] {
                    let len = line.chars().count();
                    let content = line.strip_suffix(' ').map_or(len, |l| l.chars().count());
                    assert!(content <= max, "line {line:?} too long for max={max}");
                    assert!(!line.is_empty());
                }
                assert!(lines.last().unwrap().chars().count() <= max);
            }
        }
    }

    #[test]
    fn test_titled_segments_title_separately() {
        let lines = segment_titled("Ferris", "the crab mascot of rust", 10);
        assert_eq!(lines[0], "Ferris\n");
        assert_eq!(lines[1..].concat(), "the crab mascot of rust");
    }
}
