use crate::models::{ExitEntry, ItemEntry, RoomInfo};
use crate::sink::CommandSink;
use crate::store::RoomInfoSubscription;
use crate::theme::Theme;
use crate::view::{Action, Align, Node, Style};
use crate::vml;
use std::sync::Arc;

pub const LEAVE_LABEL: &str = "You can leave: ";
pub const SEPARATOR: &str = ", ";
pub const TERMINATOR: &str = ". ";

/// Space between the players, npcs, shops and items groups
const GROUP_GAP: &str = "  ";

/// Map every element together with its punctuation: `", "` after all but the
/// last one, `". "` after the last.
pub fn join_terminated<T, R>(items: &[T], mut f: impl FnMut(&T, &'static str) -> R) -> Vec<R> {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| f(item, if idx == last { TERMINATOR } else { SEPARATOR }))
        .collect()
}

/// The room information panel: name, description, who and what is here,
/// and the exits.
#[derive(Clone)]
pub struct RoomPanel {
    theme: Arc<Theme>,
}

impl RoomPanel {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(&self, room: &RoomInfo) -> Node {
        tracing::debug!(
            room = %room.name,
            players = room.players.len(),
            npcs = room.npcs.len(),
            items = room.items.len(),
            exits = room.exits.as_ref().map(Vec::len),
            "rendering room panel"
        );

        let mut children = vec![
            self.render_name(&room.name),
            Node::LineBreak,
            Node::block(Align::Left, Style::default(), vml::translate(&room.description, &self.theme)),
            Node::LineBreak,
            self.render_contents(room),
        ];

        if let Some(exits) = &room.exits {
            children.push(Node::LineBreak);
            children.push(self.render_exits(exits));
        }

        Node::block(Align::Left, Style::color(self.theme.text), children)
    }

    fn render_name(&self, name: &str) -> Node {
        Node::block(
            Align::Center,
            Style::bold().with_color(self.theme.room_name),
            vec![Node::text(name)],
        )
    }

    fn render_contents(&self, room: &RoomInfo) -> Node {
        let players = self.render_status_lines(room.players.iter().map(|p| p.status_line.as_str()));
        let npcs = self.render_status_lines(room.npcs.iter().map(|n| n.status_line.as_str()));
        let shops = self.render_status_lines(room.shops.iter().map(|s| s.name.as_str()));
        let items = join_terminated(&room.items, |item, sep| self.render_item(item, sep));

        let mut children = Vec::new();
        for group in [players, npcs, shops, items] {
            if group.is_empty() {
                continue;
            }
            if !children.is_empty() {
                children.push(Node::text(GROUP_GAP));
            }
            children.extend(group);
        }

        Node::block(Align::Left, Style::default(), children)
    }

    fn render_status_lines<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Vec<Node> {
        let mut out = Vec::new();
        for line in lines {
            if !out.is_empty() {
                out.push(Node::text(" "));
            }
            out.push(Node::span(Style::default(), vml::translate(line, &self.theme)));
        }
        out
    }

    // Items arrive without VML tags, so they are coloured here.
    fn render_item(&self, item: &ItemEntry, sep: &'static str) -> Node {
        Node::span(
            Style::color(self.theme.item()),
            vec![Node::text(item.name.as_str()), Node::styled(sep, Style::color(self.theme.text))],
        )
    }

    fn render_exits(&self, exits: &[ExitEntry]) -> Node {
        let mut children = vec![Node::text(LEAVE_LABEL)];
        children.extend(join_terminated(exits, |exit, sep| Node::Actionable {
            action: Action::Send(exit.direction.clone()),
            style: Style::color(self.theme.exit),
            children: vec![
                Node::text(exit.direction.as_str()),
                Node::styled(sep, Style::color(self.theme.exit_separator)),
            ],
        }));
        Node::block(Align::Center, Style::default(), children)
    }

    /// Fire an action. Nothing comes back; the game answers with a new room.
    pub fn activate(&self, action: &Action, sink: &dyn CommandSink) {
        match action {
            Action::Send(command) => {
                tracing::debug!(%command, "exit activated");
                sink.send(command);
            }
        }
    }

    /// Activate the exit with `direction` in a rendered panel, as a click on
    /// it would. Returns false when the panel shows no such exit.
    pub fn click(&self, tree: &Node, direction: &str, sink: &dyn CommandSink) -> bool {
        let found = tree
            .actions()
            .into_iter()
            .find(|(action, _)| matches!(action, Action::Send(d) if d == direction));

        match found {
            Some((action, _)) => {
                self.activate(action, sink);
                true
            }
            None => {
                tracing::debug!(%direction, "no such exit in panel");
                false
            }
        }
    }

    /// Render the current room, then again after every change, until the
    /// store goes away.
    pub async fn run<F>(&self, mut subscription: RoomInfoSubscription, mut on_render: F)
    where
        F: FnMut(Node),
    {
        on_render(self.render(&subscription.current()));
        while let Some(room) = subscription.changed().await {
            on_render(self.render(&room));
        }
        tracing::debug!("room info store closed, panel stopped");
    }
}
