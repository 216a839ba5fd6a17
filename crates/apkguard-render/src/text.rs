//! Template markup handling.
//!
//! Rendered titles and descriptions use a tiny inline markup: `<b>`/`<strong>` and `<br>`
//! variants. Text taken from the manifest is entity-escaped (`&lt;`, `&gt;`, `&amp;`) when
//! substituted, so any other `<` here is literal text.

const BOLD_TAGS: [&str; 4] = ["<b>", "</b>", "<strong>", "</strong>"];
const BREAK_TAGS: [&str; 4] = ["<br/>", "<br />", "</br>", "<br>"];

/// Characters that can start inline Markdown or HTML constructs.
const MARKDOWN_SPECIAL: &[char] = &['\\', '`', '*', '_', '[', '<', '>', '&', '|', '~'];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Bold,
    Break,
    Text(&'a str),
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < s.len() {
        let rest = &s[i..];
        let tag = if rest.starts_with('<') {
            BOLD_TAGS
                .iter()
                .map(|t| (Token::Bold, *t))
                .chain(BREAK_TAGS.iter().map(|t| (Token::Break, *t)))
                .find(|(_, t)| rest.starts_with(t))
        } else {
            None
        };

        match tag {
            Some((token, t)) => {
                if text_start < i {
                    tokens.push(Token::Text(&s[text_start..i]));
                }
                tokens.push(token);
                i += t.len();
                text_start = i;
            }
            None => i += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    if text_start < s.len() {
        tokens.push(Token::Text(&s[text_start..]));
    }
    tokens
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Backslash-escape everything Markdown could read as formatting, links, or HTML.
pub(crate) fn escape_markdown(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn convert(s: &str, bold: &str, text: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(s.len());
    for token in tokenize(s) {
        match token {
            Token::Bold => out.push_str(bold),
            Token::Break => out.push(' '),
            Token::Text(t) => out.push_str(&text(&decode_entities(t))),
        }
    }
    // Collapse the double spaces left behind by "x <br>y".
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out.trim().to_string()
}

/// Convert template markup to Markdown: `<b>` becomes bold, line breaks become spaces, and
/// text is escaped.
pub fn markup_to_markdown(s: &str) -> String {
    convert(s, "**", escape_markdown)
}

/// Strip template markup entirely and decode entities.
pub fn markup_to_plain(s: &str) -> String {
    convert(s, "", str::to_string)
}
