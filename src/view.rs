//! Renderer-independent display tree produced by the panel and the VML
//! translator. The ANSI renderer in `crate::renderer` turns it into text.

use crate::theme::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub fn color(c: Color) -> Self {
        Self {
            color: Some(c),
            ..Self::default()
        }
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, c: Color) -> Self {
        self.color = Some(c);
        self
    }

    /// Child style on top of an inherited one. Colours replace, flags add up.
    pub fn over(self, parent: Style) -> Style {
        Style {
            color: self.color.or(parent.color),
            bold: self.bold || parent.bold,
            underline: self.underline || parent.underline,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.color.is_none() && !self.bold && !self.underline
    }
}

/// What happens when an activatable element is activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Send a command to the game, e.g. an exit direction
    Send(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text { text: String, style: Style },
    /// Inline group
    Span { style: Style, children: Vec<Node> },
    /// Starts on its own line and ends the line after it
    Block { align: Align, style: Style, children: Vec<Node> },
    /// Inline group that can be activated (clicked)
    Actionable { action: Action, style: Style, children: Vec<Node> },
    LineBreak,
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text {
            text: s.into(),
            style: Style::default(),
        }
    }

    pub fn styled(s: impl Into<String>, style: Style) -> Self {
        Node::Text { text: s.into(), style }
    }

    pub fn span(style: Style, children: Vec<Node>) -> Self {
        Node::Span { style, children }
    }

    pub fn block(align: Align, style: Style, children: Vec<Node>) -> Self {
        Node::Block { align, style, children }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Span { children, .. } | Node::Block { children, .. } | Node::Actionable { children, .. } => {
                children
            }
            Node::Text { .. } | Node::LineBreak => &[],
        }
    }

    /// Unstyled text of the tree. Blocks are put on their own lines the same
    /// way the ANSI renderer lays them out (without wrapping).
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        write_plain(self, &mut out);
        out
    }

    /// All activatable elements in document order.
    pub fn actions(&self) -> Vec<(&Action, String)> {
        let mut found = Vec::new();
        collect_actions(self, &mut found);
        found
    }

    /// Depth-first search for the first node matching `pred`.
    pub fn find(&self, pred: &impl Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(pred))
    }
}

fn write_plain(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::LineBreak => out.push('\n'),
        Node::Span { children, .. } | Node::Actionable { children, .. } => {
            children.iter().for_each(|c| write_plain(c, out));
        }
        Node::Block { children, .. } => {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            let start = out.len();
            children.iter().for_each(|c| write_plain(c, out));
            if !out.ends_with('\n') || out.len() == start {
                out.push('\n');
            }
        }
    }
}

fn collect_actions<'a>(node: &'a Node, found: &mut Vec<(&'a Action, String)>) {
    match node {
        Node::Actionable { action, .. } => found.push((action, node.plain_text())),
        _ => node.children().iter().for_each(|c| collect_actions(c, found)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_inheritance() {
        let parent = Style::bold().with_color(Color::WHITE);
        let child = Style::color(Color::Ansi(31));
        let s = child.over(parent);
        assert_eq!(s.color, Some(Color::Ansi(31)));
        assert!(s.bold);
        assert_eq!(Style::default().over(parent), parent);
    }

    #[test]
    fn blocks_get_their_own_lines() {
        let tree = Node::block(
            Align::Left,
            Style::default(),
            vec![
                Node::block(Align::Center, Style::default(), vec![Node::text("Title")]),
                Node::LineBreak,
                Node::text("inline "),
                Node::text("text"),
                Node::block(Align::Left, Style::default(), vec![]),
                Node::text("tail"),
            ],
        );
        assert_eq!(tree.plain_text(), "Title\n\ninline text\n\ntail\n");
    }

    #[test]
    fn actions_are_listed_in_order() {
        let tree = Node::span(
            Style::default(),
            vec![
                Node::Actionable {
                    action: Action::Send("north".into()),
                    style: Style::default(),
                    children: vec![Node::text("north"), Node::text(", ")],
                },
                Node::Actionable {
                    action: Action::Send("up".into()),
                    style: Style::default(),
                    children: vec![Node::text("up"), Node::text(". ")],
                },
            ],
        );
        let actions = tree.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], (&Action::Send("north".into()), "north, ".to_string()));
        assert_eq!(actions[1].0, &Action::Send("up".into()));
    }
}
