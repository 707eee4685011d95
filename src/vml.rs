//! VML, the game's inline markup: `<npc>Bob</npc> is here.`
//!
//! Tags named in the theme palette colour their content, `<b>` and `<u>`
//! set bold and underline, `<br>` breaks the line. Any other tag is
//! transparent. Broken markup degrades to text, it never fails.

mod parser;

pub use parser::{Token, parse};

use crate::theme::Theme;
use crate::view::{Node, Style};

struct Frame {
    tag: String,
    style: Style,
    children: Vec<Node>,
}

/// Translate a VML string into inline display nodes.
pub fn translate(vml: &str, theme: &Theme) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    fn push(stack: &mut [Frame], root: &mut Vec<Node>, node: Node) {
        match stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => root.push(node),
        }
    }

    fn close_top(stack: &mut Vec<Frame>, root: &mut Vec<Node>) {
        if let Some(frame) = stack.pop() {
            let node = Node::span(frame.style, frame.children);
            push(stack, root, node);
        }
    }

    for token in parse(vml) {
        match token {
            Token::Text(s) => push(&mut stack, &mut root, Node::text(s)),
            Token::Open(tag) | Token::SelfClosing(tag) if tag == "br" => {
                push(&mut stack, &mut root, Node::LineBreak)
            }
            Token::SelfClosing(_) => {}
            Token::Open(tag) => {
                let style = tag_style(&tag, theme);
                stack.push(Frame {
                    tag,
                    style,
                    children: Vec::new(),
                });
            }
            Token::Close(tag) => {
                // unwind to the matching open tag; a close without one is dropped
                if let Some(pos) = stack.iter().rposition(|f| f.tag == tag) {
                    while stack.len() > pos {
                        close_top(&mut stack, &mut root);
                    }
                } else if tag != "br" {
                    tracing::trace!(%tag, "stray closing tag in vml");
                }
            }
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root);
    }

    root
}

fn tag_style(tag: &str, theme: &Theme) -> Style {
    match tag {
        "b" | "strong" => Style::bold(),
        "u" => Style {
            underline: true,
            ..Style::default()
        },
        _ => theme.vml_color(tag).map(Style::color).unwrap_or_default(),
    }
}
