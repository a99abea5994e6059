//! Type extraction from TypeScript hover text
//!
//! tsserver hovers are a fenced declaration such as `const x: number`,
//! `(parameter) p: string` or `function f(a: number): string`, optionally
//! followed by documentation. Only the type part is kept.

use crate::resolve::RenderFlags;

/// Declaration keywords whose remainder is `name: Type`
const BINDING_KEYWORDS: &[&str] = &["const ", "let ", "var ", "readonly "];

/// Declaration keywords that name a value of type `typeof Name`
const VALUE_TYPE_KEYWORDS: &[&str] = &["class ", "enum ", "namespace ", "module "];

/// Extract the type string from a hover's markdown.
///
/// Returns `None` when the hover holds no declaration.
#[must_use]
pub fn type_from_hover(markdown: &str) -> Option<String> {
    let declaration = declaration_text(markdown)?;
    let declaration = strip_overload_suffix(&declaration);
    let declaration = strip_labels(declaration);

    let ty = if let Some(rest) = strip_any_prefix(declaration, &["type "]) {
        split_top_level(rest, '=').map_or_else(|| rest.to_string(), |(_, ty)| ty.to_string())
    } else if let Some(rest) = strip_any_prefix(declaration, &["function "]) {
        signature_as_arrow(rest).unwrap_or_else(|| rest.to_string())
    } else if let Some(rest) = strip_any_prefix(declaration, VALUE_TYPE_KEYWORDS) {
        format!("typeof {}", rest.trim())
    } else if let Some(rest) = strip_any_prefix(declaration, &["interface "]) {
        rest.to_string()
    } else {
        let rest = strip_any_prefix(declaration, BINDING_KEYWORDS).unwrap_or(declaration);
        binding_type(rest)
    };

    let ty = ty.trim();
    (!ty.is_empty()).then(|| ty.to_string())
}

/// Apply the render flags the server cannot honor itself to an extracted
/// hover type.
///
/// With `no_truncation`, an elided type renders as the empty string so that it
/// counts as unavailable. With `out_of_scope_aliases` or `structural_fallback`,
/// `import("...").` qualifiers are dropped and the bare names kept.
#[must_use]
pub fn render_hover_type(ty: &str, flags: RenderFlags) -> String {
    if flags.no_truncation && is_truncated(ty) {
        tracing::debug!("Hover type was truncated by the server: {}", ty);
        return String::new();
    }
    if flags.out_of_scope_aliases || flags.structural_fallback {
        strip_import_qualifiers(ty)
    } else {
        ty.to_string()
    }
}

/// Remove every `import("module").` qualifier outside string literals
#[must_use]
pub fn strip_import_qualifiers(ty: &str) -> String {
    let mut out = String::with_capacity(ty.len());
    let mut rest = ty;
    loop {
        let Some(at) = find_outside_quotes(rest, "import(") else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..at]);
        let after = &rest[at..];
        match qualifier_len(after) {
            Some(len) => rest = &after[len..],
            None => {
                out.push_str("import(");
                rest = &after["import(".len()..];
            }
        }
    }
}

/// Length of an `import("...").` prefix of `text`
fn qualifier_len(text: &str) -> Option<usize> {
    let inner = text.strip_prefix("import(")?;
    let quote = inner.chars().next().filter(|ch| matches!(ch, '"' | '\''))?;
    let close = inner[1..].find(quote)? + 1;
    let tail = inner[close + 1..].strip_prefix(").")?;
    Some(text.len() - tail.len())
}

/// Whether the server elided part of `ty`: a `... N more ...` run or a bare
/// `...` that is not a rest or spread
#[must_use]
pub fn is_truncated(ty: &str) -> bool {
    let mut rest = ty;
    while let Some(at) = find_outside_quotes(rest, "...") {
        let after = &rest[at + 3..];
        match after.chars().next() {
            None | Some(';' | ',' | '}' | ']' | ')' | ' ') => return true,
            Some(_) => rest = after,
        }
    }
    false
}

fn find_outside_quotes(text: &str, needle: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            if ch == q && prev != '\\' {
                quote = None;
            }
        } else if matches!(ch, '"' | '\'' | '`') {
            quote = Some(ch);
        } else if text[i..].starts_with(needle) {
            return Some(i);
        }
        prev = ch;
    }
    None
}

/// The first fenced code block, or the whole text when there is none
fn declaration_text(markdown: &str) -> Option<String> {
    let body = match markdown.find("```") {
        Some(open) => {
            let after_fence = &markdown[open + 3..];
            let content_start = after_fence.find('\n').map_or(after_fence.len(), |i| i + 1);
            let content = &after_fence[content_start..];
            let close = content.find("```").unwrap_or(content.len());
            &content[..close]
        }
        None => markdown,
    };

    let lines: Vec<&str> = body
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .take_while(|line| !line.starts_with("import "))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(lines.join("\n"))
}

fn strip_overload_suffix(text: &str) -> &str {
    let trimmed = text.trim_end();
    if let Some(open) = trimmed.rfind("(+") {
        let suffix = &trimmed[open..];
        if suffix.ends_with(" overload)") || suffix.ends_with(" overloads)") {
            return trimmed[..open].trim_end();
        }
    }
    trimmed
}

/// Drop leading `(parameter)`-style kind labels
fn strip_labels(mut text: &str) -> &str {
    loop {
        text = text.trim_start();
        let Some(rest) = text.strip_prefix('(') else {
            return text;
        };
        let Some(close) = rest.find(')') else {
            return text;
        };
        let label = &rest[..close];
        if label.is_empty() || !label.chars().all(|ch| ch.is_ascii_lowercase() || ch == ' ') {
            return text;
        }
        text = &rest[close + 1..];
    }
}

fn strip_any_prefix<'a>(text: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
}

/// `name: Type` yields `Type`; a method-like `name(...): R` yields its arrow
/// form; anything else is returned as is
fn binding_type(text: &str) -> String {
    let paren = find_top_level(text, '(');
    let colon = find_top_level(text, ':');
    match (paren, colon) {
        (Some(p), Some(c)) if p < c => {
            signature_as_arrow(text).unwrap_or_else(|| text[c + 1..].to_string())
        }
        (_, Some(c)) => text[c + 1..].to_string(),
        _ => text.to_string(),
    }
}

/// Rewrite `name<T>(params): R` as `<T>(params) => R`
fn signature_as_arrow(text: &str) -> Option<String> {
    let open = find_top_level(text, '(')?;
    let name = &text[..open];
    let generics = match name.strip_suffix('>') {
        Some(without_close) => {
            let start = matching_open_angle(without_close)?;
            &name[start..]
        }
        None => "",
    };

    let close = open + matching_close(&text[open..])?;
    let params = &text[open..=close];
    let return_type = text[close + 1..]
        .trim_start()
        .strip_prefix(':')
        .map_or("void", str::trim);
    Some(format!("{generics}{params} => {return_type}"))
}

/// Index of the `<` opening the generic list that ends `text` (whose final
/// `>` has already been removed)
fn matching_open_angle(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text.char_indices().rev() {
        match ch {
            '>' => depth += 1,
            '<' if depth == 0 => return Some(i),
            '<' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Index of the bracket closing the one `text` starts with
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut prev = '\0';
    for (i, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == '=' => {}
            ')' | ']' | '}' | '>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        prev = ch;
    }
    None
}

/// First occurrence of `needle` outside brackets and string literals
fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            if ch == q && prev != '\\' {
                quote = None;
            }
            prev = ch;
            continue;
        }
        if depth == 0 && ch == needle {
            return Some(i);
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == '=' => {}
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
        prev = ch;
    }
    None
}

fn split_top_level(text: &str, needle: char) -> Option<(&str, &str)> {
    let at = find_top_level(text, needle)?;
    Some((&text[..at], &text[at + needle.len_utf8()..]))
}
