// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace('\u{a0}', " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    s!(out.trim())
}

/// File stem to display title: "2026_rose_gold_classic" → "2026 Rose Gold Classic".
pub fn title_from_stem(stem: &str) -> String {
    stem.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => s!(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_and_whitespace() {
        assert_eq!(normalize_ws(&normalize_entities("  Level:&nbsp;&nbsp;4D1 \n")), "Level: 4D1");
        assert_eq!(normalize_entities("Tom &amp; Jerry&#39;s"), "Tom & Jerry's");
    }

    #[test]
    fn stem_titles() {
        assert_eq!(title_from_stem("2026_rose_gold_classic"), "2026 Rose Gold Classic");
        assert_eq!(title_from_stem("MARDI_GRAS"), "Mardi Gras");
    }
}
