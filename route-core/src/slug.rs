use std::collections::HashSet;

/// Drop each bracketed run, from an opening `(`/`（` to the first closing
/// `)`/`）` after it. An opening bracket with no closer is left in place.
fn strip_bracketed(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(['(', '（']) {
        let Some(close) = rest[open..].find([')', '）']) else {
            break;
        };
        out.push_str(&rest[..open]);
        let close = open + close;
        let close_len = rest[close..].chars().next().map_or(1, char::len_utf8);
        rest = &rest[close + close_len..];
    }
    out.push_str(rest);
    out
}

/// ASCII slug for a node name. Whitespace runs become `-`, bracketed parts
/// are dropped and anything outside `[a-z0-9-]` is removed, so purely
/// Japanese names slug to "".
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let dashed = lowered.split_whitespace().collect::<Vec<_>>().join("-");
    let mut out = String::with_capacity(dashed.len());
    for ch in strip_bracketed(&dashed).chars() {
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
            continue;
        }
        if ch == '-' && out.ends_with('-') {
            continue;
        }
        out.push(ch);
    }
    out.trim_matches('-').to_string()
}

/// Hands out unique node ids within one route.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for the `position`-th node (1-based) named `name`. Collisions get
    /// the smallest free `-2`, `-3`, ... suffix.
    pub fn allocate(&mut self, name: &str, position: usize) -> String {
        let base = match slugify(name) {
            s if s.is_empty() => format!("node-{position}"),
            s => s,
        };
        let mut id = base.clone();
        let mut suffix = 2;
        while self.used.contains(&id) {
            id = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.used.insert(id.clone());
        id
    }
}
