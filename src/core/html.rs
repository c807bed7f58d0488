// src/core/html.rs
//! Just enough HTML reading for score pages: tag blocks, classes, attributes,
//! visible text and `<table>` grids. Byte offsets are shared between the
//! source and its ASCII-lowercased copy, so matching is case-insensitive.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

fn is_name_end(b: Option<&u8>) -> bool {
    matches!(b, Some(b'>') | Some(b'/') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r'))
}

/// Start offset of the next `<tag` opener at or after `from` (not `<tagfoo`).
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut at = from;
    loop {
        let i = lc.get(at..)?.find(&pat)? + at;
        if is_name_end(lc.as_bytes().get(i + pat.len())) {
            return Some(i);
        }
        at = i + pat.len();
    }
}

/// Byte range of the next `<tag ...>...</tag>` block at or after `from`.
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    next_block_lc(&lc, &tag, from)
}

fn next_block_lc(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_open(lc, tag, from)?;
    let open_end = lc[start..].find('>')? + start + 1;
    let close = format!("</{tag}");
    let end = match lc[open_end..].find(&close) {
        Some(rel) => {
            let close_at = open_end + rel;
            lc[close_at..].find('>').map(|g| close_at + g + 1).unwrap_or(lc.len())
        }
        // Unclosed cells and rows run to the next sibling opener.
        None => find_open(lc, tag, open_end).unwrap_or(lc.len()),
    };
    Some((start, end))
}

/// Every `<tag>` block in `s`, in document order (no nesting of the same tag).
pub fn blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some((a, b)) = next_block_lc(&lc, &tag, pos) {
        out.push(&s[a..b]);
        pos = b.max(a + 1);
    }
    out
}

/// Opening tag of a block, up to and including its `>`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

pub fn inner_after_open_tag(block: &str) -> &str {
    let Some(oe) = block.find('>') else {
        return "";
    };
    match block.rfind("</") {
        Some(cs) if cs > oe => &block[oe + 1..cs],
        _ => &block[oe + 1..],
    }
}

/// Attribute value from a block's opening tag.
pub fn attr<'a>(block: &'a str, name: &str) -> Option<&'a str> {
    let open = open_tag(block);
    let lc = to_lower(open);
    let pat = format!("{}=", to_lower(name));
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&pat) {
        let i = from + rel;
        let boundary = i == 0 || matches!(lc.as_bytes()[i - 1], b' ' | b'\t' | b'\n' | b'\r');
        let v = i + pat.len();
        if boundary {
            let rest = &open[v..];
            return match rest.chars().next() {
                Some(q @ ('"' | '\'')) => rest[1..].find(q).map(|e| &rest[1..1 + e]),
                _ => Some(rest.split(|c: char| c.is_whitespace() || c == '>').next().unwrap_or("")),
            };
        }
        from = v;
    }
    None
}

pub fn has_class(block: &str, class: &str) -> bool {
    attr(block, "class")
        .map(|c| c.split_whitespace().any(|x| x.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// First `<tag class="...">` block carrying `class`.
pub fn find_by_class<'a>(s: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    blocks(s, tag).into_iter().find(|b| has_class(b, class))
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a fragment: no tags, decoded entities, collapsed whitespace.
pub fn text(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(without_scripts(fragment))))
}

fn without_scripts(s: &str) -> String {
    let mut out = s!(s);
    for tag in ["script", "style"] {
        while let Some((a, b)) = next_tag_block_ci(&out, tag, 0) {
            out.replace_range(a..b, " ");
        }
    }
    out
}

/// `<title>` text, if any.
pub fn title(doc: &str) -> Option<String> {
    blocks(doc, "title").first().map(|b| text(inner_after_open_tag(b)))
}

#[derive(Clone, Debug)]
pub struct Cell<'a> {
    pub header: bool,
    pub html: &'a str,
}

impl Cell<'_> {
    pub fn text(&self) -> String {
        text(self.html)
    }
}

/// `<th>`/`<td>` cells of one `<tr>`, in order.
pub fn row_cells(tr: &str) -> Vec<Cell<'_>> {
    let body = inner_after_open_tag(tr);
    let lc = to_lower(body);
    let mut out = Vec::new();
    let mut pos = 0;
    loop {
        let th = next_block_lc(&lc, "th", pos);
        let td = next_block_lc(&lc, "td", pos);
        let (header, (a, b)) = match (th, td) {
            (Some(h), Some(d)) if h.0 < d.0 => (true, h),
            (_, Some(d)) => (false, d),
            (Some(h), None) => (true, h),
            (None, None) => break,
        };
        // A cell never extends past the next cell opener.
        let next = [find_open(&lc, "th", a + 1), find_open(&lc, "td", a + 1)]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(b);
        let end = b.min(next.max(a + 1));
        out.push(Cell { header, html: inner_after_open_tag(&body[a..end]) });
        pos = end;
    }
    out
}

/// A `<table>` read as text: header cells plus body rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Every table in the document. The header row is the first row made only of `<th>` cells;
/// rows with at least one `<td>` are body rows.
pub fn tables(doc: &str) -> Vec<HtmlTable> {
    let mut out = Vec::new();
    for table in blocks(doc, "table") {
        let mut t = HtmlTable::default();
        for tr in blocks(inner_after_open_tag(table), "tr") {
            let cells = row_cells(tr);
            if cells.is_empty() {
                continue;
            }
            let texts: Vec<String> = cells.iter().map(Cell::text).collect();
            if cells.iter().all(|c| c.header) {
                if t.headers.is_empty() {
                    t.headers = texts;
                }
            } else {
                t.rows.push(texts);
            }
        }
        out.push(t);
    }
    out
}
