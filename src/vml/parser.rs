/// ===============================
/// VML tokens
/// ===============================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Text(String),
    /// `<name ...>`
    Open(String),
    /// `</name>`
    Close(String),
    /// `<name/>`, only meaningful for `br`
    SelfClosing(String),
}

/// Tokenize a VML string. Never fails: anything that does not look like a
/// tag is kept as text.
pub fn parse(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(['<', '&']) {
        buf.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('&') {
            match read_entity(rest) {
                Some((ch, len)) => {
                    buf.push(ch);
                    rest = &rest[len..];
                }
                None => {
                    buf.push('&');
                    rest = &rest[1..];
                }
            }
            continue;
        }

        match read_tag(rest) {
            Some((token, len)) => {
                if !buf.is_empty() {
                    out.push(Token::Text(std::mem::take(&mut buf)));
                }
                out.push(token);
                rest = &rest[len..];
            }
            None => {
                // not a tag, '<' is literal
                buf.push('<');
                rest = &rest[1..];
            }
        }
    }
    buf.push_str(rest);
    if !buf.is_empty() {
        out.push(Token::Text(buf));
    }
    out
}

// Read `<...>` at the start of `s`; returns the token and its byte length.
fn read_tag(s: &str) -> Option<(Token, usize)> {
    let end = s.find('>')?;
    let inner = &s[1..end];
    // a second '<' before '>' means the first one was text
    if inner.contains('<') {
        return None;
    }

    let (closing, body) = match inner.strip_prefix('/') {
        Some(b) => (true, b),
        None => (false, inner),
    };
    let (self_closing, body) = match body.strip_suffix('/') {
        Some(b) if !closing => (true, b),
        _ => (false, body),
    };

    // name ends at first whitespace; anything after it (attributes) is ignored
    let name = body.split_whitespace().next().unwrap_or("");
    if !is_tag_name(name) || (closing && body.trim() != name) {
        return None;
    }
    let name = name.to_ascii_lowercase();

    let token = if closing {
        Token::Close(name)
    } else if self_closing {
        Token::SelfClosing(name)
    } else {
        Token::Open(name)
    };
    Some((token, end + 1))
}

fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        _ => false,
    }
}

fn read_entity(s: &str) -> Option<(char, usize)> {
    const ENTITIES: [(&str, char); 5] = [("&lt;", '<'), ("&gt;", '>'), ("&amp;", '&'), ("&quot;", '"'), ("&apos;", '\'')];
    ENTITIES
        .iter()
        .find(|(name, _)| s.starts_with(name))
        .map(|(name, ch)| (*ch, name.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(n: &str) -> Token {
        Token::Open(n.to_string())
    }
    fn close(n: &str) -> Token {
        Token::Close(n.to_string())
    }
    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(parse("A town square."), vec![text("A town square.")]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn tags_and_text() {
        assert_eq!(
            parse("<npc>Bob</npc> waves."),
            vec![open("npc"), text("Bob"), close("npc"), text(" waves.")]
        );
    }

    #[test]
    fn names_are_lowercased_and_attributes_dropped() {
        assert_eq!(parse("<Item id=3>x</ITEM>"), vec![open("item"), text("x"), close("item")]);
    }

    #[test]
    fn self_closing() {
        assert_eq!(
            parse("a<br/>b<br>"),
            vec![text("a"), Token::SelfClosing("br".into()), text("b"), open("br")]
        );
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(parse("1 < 2 and 3 > 2"), vec![text("1 < 2 and 3 > 2")]);
        assert_eq!(parse("<npc"), vec![text("<npc")]);
        assert_eq!(parse("<<b>x"), vec![text("<"), open("b"), text("x")]);
        assert_eq!(parse("<3 hearts>"), vec![text("<3 hearts>")]);
    }

    #[test]
    fn entities() {
        assert_eq!(parse("&lt;npc&gt; &amp; &quot;x&quot;"), vec![text("<npc> & \"x\"")]);
        assert_eq!(parse("AT&T"), vec![text("AT&T")]);
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(parse("Café <item>épée</item>"), vec![text("Café "), open("item"), text("épée"), close("item")]);
    }
}
