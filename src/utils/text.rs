use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max` terminal columns, ending with `…` when shortened.
/// Wide (CJK) characters count as two columns.
pub fn fit_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Pads `s` with spaces on both sides to `width` columns (left-biased).
pub fn center(s: &str, width: usize) -> String {
    let s = fit_width(s, width);
    let w = UnicodeWidthStr::width(s.as_str());
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit_width("柔和", 4), "柔和");
        assert_eq!(fit_width("abc", 10), "abc");
    }

    #[test]
    fn wide_chars_count_double() {
        // 种宠物 = 6 columns; 5 columns leaves room for two glyphs and the ellipsis
        assert_eq!(fit_width("种宠物", 5), "种宠…");
        assert_eq!(fit_width("abcdef", 4), "abc…");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn center_pads_to_width() {
        assert_eq!(center("#FFFFFF", 11), "  #FFFFFF  ");
        assert_eq!(center("宠", 5), " 宠  ");
        assert_eq!(UnicodeWidthStr::width(center("种宠物之家温馨感", 7).as_str()), 7);
    }
}
