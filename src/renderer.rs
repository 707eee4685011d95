pub mod ansi;

use crate::view::{Align, Node, Style};
pub use ansi::{strip, visible_len};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Terminal width used for wrapping and centring
    pub width: usize,
    /// Emit ANSI escape codes
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: 80, color: true }
    }
}

#[derive(Clone, Debug)]
struct Run {
    text: String,
    style: Style,
}

struct Line {
    align: Align,
    runs: Vec<Run>,
}

#[derive(Default)]
struct Layout {
    lines: Vec<Line>,
    current: Vec<Run>,
}

impl Layout {
    fn break_line(&mut self, align: Align) {
        let runs = std::mem::take(&mut self.current);
        self.lines.push(Line { align, runs });
    }
}

/// Render a display tree for the terminal. Every line, including the last,
/// ends with a newline.
pub fn render_ansi(node: &Node, opts: &RenderOptions) -> String {
    let mut layout = Layout::default();
    lay_out(node, Style::default(), Align::Left, &mut layout);
    if !layout.current.is_empty() {
        layout.break_line(Align::Left);
    }

    let width = opts.width.max(20);
    let mut out = String::new();
    for line in &layout.lines {
        for runs in wrap_runs(&line.runs, width) {
            let rendered = render_runs(&runs, opts.color);
            if line.align == Align::Center {
                // trailing separators do not count towards the centre
                let len = visible_len(&rendered).saturating_sub(trailing_spaces(&runs));
                out.push_str(&" ".repeat(width.saturating_sub(len) / 2));
            }
            out.push_str(&rendered);
            out.push('\n');
        }
    }
    out
}

fn lay_out(node: &Node, inherited: Style, align: Align, layout: &mut Layout) {
    match node {
        Node::Text { text, style } => {
            if !text.is_empty() {
                layout.current.push(Run {
                    text: text.clone(),
                    style: style.over(inherited),
                });
            }
        }
        Node::LineBreak => layout.break_line(align),
        Node::Span { style, children } => {
            let style = style.over(inherited);
            children.iter().for_each(|c| lay_out(c, style, align, layout));
        }
        Node::Actionable { style, children, .. } => {
            let style = Style {
                underline: true,
                ..style.over(inherited)
            };
            children.iter().for_each(|c| lay_out(c, style, align, layout));
        }
        Node::Block {
            align: block_align,
            style,
            children,
        } => {
            if !layout.current.is_empty() {
                layout.break_line(align);
            }
            let start = layout.lines.len();
            let style = style.over(inherited);
            children.iter().for_each(|c| lay_out(c, style, *block_align, layout));
            if !layout.current.is_empty() || layout.lines.len() == start {
                layout.break_line(*block_align);
            }
        }
    }
}

fn trailing_spaces(runs: &[Run]) -> usize {
    let mut n = 0;
    for run in runs.iter().rev() {
        let trimmed = run.text.trim_end().chars().count();
        n += run.text.chars().count() - trimmed;
        if trimmed > 0 {
            break;
        }
    }
    n
}

fn runs_len(runs: &[Run]) -> usize {
    runs.iter().map(|r| r.text.chars().count()).sum()
}

/// Greedy word wrap over styled runs. Lines that fit are kept untouched;
/// wrapped lines have their whitespace collapsed to single spaces.
fn wrap_runs(runs: &[Run], width: usize) -> Vec<Vec<Run>> {
    if runs_len(runs) <= width {
        return vec![runs.to_vec()];
    }

    // a word may span several runs (e.g. "rock" + ".")
    let mut words: Vec<Vec<Run>> = Vec::new();
    let mut word: Vec<Run> = Vec::new();
    for run in runs {
        for (i, piece) in run.text.split(char::is_whitespace).enumerate() {
            if i > 0 && !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            if !piece.is_empty() {
                word.push(Run {
                    text: piece.to_string(),
                    style: run.style,
                });
            }
        }
    }
    if !word.is_empty() {
        words.push(word);
    }

    let mut lines = Vec::new();
    let mut line: Vec<Run> = Vec::new();
    let mut line_len = 0usize;
    for word in words {
        let wlen = runs_len(&word);
        if line_len > 0 && line_len + 1 + wlen > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(Run {
                text: " ".to_string(),
                style: Style::default(),
            });
            line_len += 1;
        }
        line.extend(word);
        line_len += wlen;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn render_runs(runs: &[Run], color: bool) -> String {
    let mut out = String::new();
    for run in runs {
        let sgr = if color { ansi::compose_sgr(&run.style) } else { String::new() };
        if sgr.is_empty() {
            out.push_str(&run.text);
        } else {
            out.push_str(&sgr);
            out.push_str(&run.text);
            out.push_str(ansi::RESET);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;
    use crate::view::Action;

    fn plain(width: usize) -> RenderOptions {
        RenderOptions { width, color: false }
    }

    #[test]
    fn centred_block_is_padded() {
        let tree = Node::block(Align::Center, Style::default(), vec![Node::text("Square")]);
        assert_eq!(render_ansi(&tree, &plain(20)), "       Square\n");
    }

    #[test]
    fn centring_ignores_escape_codes() {
        let tree = Node::block(Align::Center, Style::bold(), vec![Node::text("Square")]);
        let out = render_ansi(&tree, &RenderOptions { width: 20, color: true });
        assert_eq!(out, "       \x1b[1mSquare\x1b[0m\n");
    }

    #[test]
    fn centring_ignores_trailing_separator_with_or_without_colour() {
        let tree = Node::block(
            Align::Center,
            Style::default(),
            vec![
                Node::text("You can leave: "),
                Node::styled("north", Style::color(Color::Ansi(37))),
                Node::styled(". ", Style::color(Color::Ansi(36))),
            ],
        );
        // "You can leave: north." is 21 wide, so (40 - 21) / 2 = 9
        let plain_out = render_ansi(&tree, &plain(40));
        let coloured = render_ansi(&tree, &RenderOptions { width: 40, color: true });
        assert!(plain_out.starts_with(&format!("{}You", " ".repeat(9))));
        assert!(coloured.starts_with(&format!("{}You", " ".repeat(9))));
        assert_eq!(strip(&coloured), plain_out);
    }

    #[test]
    fn long_lines_wrap_on_words() {
        let tree = Node::block(
            Align::Left,
            Style::default(),
            vec![Node::text("one two three four five six seven eight nine")],
        );
        assert_eq!(
            render_ansi(&tree, &plain(20)),
            "one two three four\nfive six seven eight\nnine\n"
        );
    }

    #[test]
    fn words_spanning_runs_stay_together() {
        let tree = Node::block(
            Align::Left,
            Style::default(),
            vec![
                Node::text("aaaa bbbb cccc dddd "),
                Node::styled("rock", Style::color(Color::Ansi(33))),
                Node::text(". "),
            ],
        );
        assert_eq!(render_ansi(&tree, &plain(20)), "aaaa bbbb cccc dddd\nrock.\n");
    }

    #[test]
    fn no_colour_means_no_escapes() {
        let tree = Node::block(
            Align::Left,
            Style::color(Color::Ansi(31)),
            vec![Node::Actionable {
                action: Action::Send("north".into()),
                style: Style::bold(),
                children: vec![Node::text("north")],
            }],
        );
        let out = render_ansi(&tree, &plain(80));
        assert_eq!(out, "north\n");
        let coloured = render_ansi(&tree, &RenderOptions::default());
        assert_eq!(coloured, "\x1b[1;4;31mnorth\x1b[0m\n");
    }

    #[test]
    fn layout_matches_plain_text() {
        let tree = Node::block(
            Align::Left,
            Style::default(),
            vec![
                Node::block(Align::Left, Style::default(), vec![Node::text("a")]),
                Node::LineBreak,
                Node::block(Align::Left, Style::default(), vec![]),
                Node::text("b"),
            ],
        );
        assert_eq!(render_ansi(&tree, &plain(80)), tree.plain_text());
    }
}
