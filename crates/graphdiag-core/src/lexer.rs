//! Line and token scanning for the graphDiagram language.
//!
//! The language is line oriented: every statement fits on one line, so the lexer only needs to
//! cut the input into trimmed lines, split a line into whitespace-delimited words, and locate
//! the edge marker (`->`, `<-`, `--` and their weighted forms) inside an edge expression.

pub const COMMENT_PREFIX: &str = "//";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the original input.
    pub number: usize,
    /// Trimmed line contents, never empty and never a comment.
    pub text: &'a str,
}

/// Non-blank, non-comment lines of `input`, trimmed.
pub fn lines(input: &str) -> impl Iterator<Item = Line<'_>> {
    input.lines().enumerate().filter_map(|(idx, raw)| {
        let text = raw.trim();
        if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
            return None;
        }
        Some(Line {
            number: idx + 1,
            text,
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Byte offset of the word inside its line.
    pub start: usize,
}

pub fn words(line: &str) -> impl Iterator<Item = Word<'_>> {
    let base = line.as_ptr() as usize;
    line.split_whitespace().map(move |text| Word {
        text,
        start: text.as_ptr() as usize - base,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `A->B`: arrow points at the right-hand endpoint.
    Forward,
    /// `A<-B`: arrow points at the left-hand endpoint.
    Backward,
    Undirected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMarker {
    /// Byte range of the marker inside the edge expression.
    pub start: usize,
    pub end: usize,
    pub direction: Direction,
    pub weight: Option<u32>,
}

impl EdgeMarker {
    pub fn split<'a>(&self, expr: &'a str) -> (&'a str, &'a str) {
        (&expr[..self.start], &expr[self.end..])
    }
}

/// True if `text` contains anything [`scan_edge_marker`] could match.
pub fn contains_edge_marker(text: &str) -> bool {
    text.contains("->")
        || text.contains("<-")
        || text.contains("--")
        || weighted_dash_at_any(text.as_bytes())
}

/// Finds the edge marker of an edge expression (the part before the label colon).
///
/// Right arrows take priority over left arrows, which take priority over undirected markers.
/// Within one direction the weighted form (`A-3->B`, `A<-3-B`, `A-3--B`, `A-3-B`) is tried
/// first, requiring non-empty text on both sides; if it cannot match, the expression is split
/// on the first plain occurrence of the marker with no weight, even if a side ends up empty.
pub fn scan_edge_marker(expr: &str) -> Option<EdgeMarker> {
    let bytes = expr.as_bytes();

    if expr.contains("->") {
        return scan_forward(bytes).or_else(|| plain_marker(expr, "->", Direction::Forward));
    }
    if expr.contains("<-") {
        return scan_backward(bytes).or_else(|| plain_marker(expr, "<-", Direction::Backward));
    }
    if expr.contains("--") || weighted_dash_at_any(bytes) {
        return scan_undirected(bytes).or_else(|| plain_marker(expr, "--", Direction::Undirected));
    }
    None
}

fn plain_marker(expr: &str, marker: &str, direction: Direction) -> Option<EdgeMarker> {
    let start = expr.find(marker)?;
    Some(EdgeMarker {
        start,
        end: start + marker.len(),
        direction,
        weight: None,
    })
}

/// Consumes ASCII digits starting at `from`, returning the end offset and the parsed value.
fn digits(bytes: &[u8], from: usize) -> (usize, Option<u32>) {
    let mut end = from;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == from {
        return (end, None);
    }
    let value = std::str::from_utf8(&bytes[from..end])
        .ok()
        .and_then(|s| s.parse::<u32>().ok());
    (end, value)
}

fn scan_forward(bytes: &[u8]) -> Option<EdgeMarker> {
    for i in 1..bytes.len() {
        if bytes[i] != b'-' {
            continue;
        }
        let (k, weight) = digits(bytes, i + 1);
        if k > i + 1 && bytes[k..].starts_with(b"->") && k + 2 < bytes.len() {
            return Some(EdgeMarker {
                start: i,
                end: k + 2,
                direction: Direction::Forward,
                weight,
            });
        }
        if bytes[i + 1..].starts_with(b"->") && i + 3 < bytes.len() {
            return Some(EdgeMarker {
                start: i,
                end: i + 3,
                direction: Direction::Forward,
                weight: None,
            });
        }
        if bytes[i..].starts_with(b"->") && i + 2 < bytes.len() {
            return Some(EdgeMarker {
                start: i,
                end: i + 2,
                direction: Direction::Forward,
                weight: None,
            });
        }
    }
    None
}

fn scan_backward(bytes: &[u8]) -> Option<EdgeMarker> {
    for i in 1..bytes.len() {
        if !bytes[i..].starts_with(b"<-") {
            continue;
        }
        let (k, weight) = digits(bytes, i + 2);
        if k > i + 2 && bytes.get(k) == Some(&b'-') && k + 1 < bytes.len() {
            return Some(EdgeMarker {
                start: i,
                end: k + 1,
                direction: Direction::Backward,
                weight,
            });
        }
        if i + 2 < bytes.len() {
            return Some(EdgeMarker {
                start: i,
                end: i + 2,
                direction: Direction::Backward,
                weight: None,
            });
        }
    }
    None
}

fn scan_undirected(bytes: &[u8]) -> Option<EdgeMarker> {
    for i in 1..bytes.len() {
        if bytes[i] != b'-' {
            continue;
        }
        let (k, weight) = digits(bytes, i + 1);
        if k > i + 1 {
            let end = if bytes[k..].starts_with(b"--") {
                k + 2
            } else if bytes.get(k) == Some(&b'-') {
                k + 1
            } else {
                continue;
            };
            if end < bytes.len() {
                return Some(EdgeMarker {
                    start: i,
                    end,
                    direction: Direction::Undirected,
                    weight,
                });
            }
            continue;
        }
        if bytes.get(i + 1) == Some(&b'-') && i + 2 < bytes.len() {
            return Some(EdgeMarker {
                start: i,
                end: i + 2,
                direction: Direction::Undirected,
                weight: None,
            });
        }
    }
    None
}

/// `-<digits>-` somewhere after the first byte.
fn weighted_dash_at_any(bytes: &[u8]) -> bool {
    (1..bytes.len()).any(|i| {
        if bytes[i] != b'-' {
            return false;
        }
        let (k, _) = digits(bytes, i + 1);
        k > i + 1 && bytes.get(k) == Some(&b'-')
    })
}
