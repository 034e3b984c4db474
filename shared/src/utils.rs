// Number display helpers shared across the engine and host UIs.

pub mod ja_jp_format {
    /// Groups integer digits the way the calling UI expects.
    ///
    /// Implementations must insert a separator every three digits from the
    /// right and never emit decimal places for integer input.
    pub trait DigitGrouping: Send + Sync {
        /// Groups a plain decimal digit string, optionally led by `-`.
        fn group_str(&self, digits: &str) -> String;

        fn group(&self, n: i64) -> String {
            self.group_str(&n.to_string())
        }
    }

    /// `ja-JP` grouping: comma every three digits.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct JaJpGrouping;

    impl DigitGrouping for JaJpGrouping {
        fn group_str(&self, digits: &str) -> String {
            group_digit_str(digits)
        }
    }

    // Formats integers like 1234567 as "1,234,567" and -1234 as "-1,234"
    pub fn group_digits(n: i64) -> String {
        group_digit_str(&n.to_string())
    }

    /// Same as [`group_digits`] for integers of any size given as a digit string.
    pub fn group_digit_str(digits: &str) -> String {
        let (negative, digits) = match digits.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, digits),
        };
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

}
