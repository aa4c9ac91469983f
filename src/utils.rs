use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Trims the text and collapses every whitespace run (newlines included) to one space.
pub fn normalize_text(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_ellipsis() {
        assert_eq!(safe_truncate_ellipsis("hello world", 5), "hello...");
        assert_eq!(safe_truncate_ellipsis("hi", 10), "hi");
        assert_eq!(safe_truncate_ellipsis("안녕하세요 개발자", 5), "안녕하세요...");
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        let text = "\n    안녕하세요.  저는\t창의적인\n\n개발자입니다.   ";
        assert_eq!(normalize_text(text), "안녕하세요. 저는 창의적인 개발자입니다.");
    }

    #[test]
    fn test_normalize_text_blank() {
        assert_eq!(normalize_text(" \n\t "), "");
    }
}
