//! Per-sequence scanner state.
//!
//! Open containers are tracked by position rather than by reference: the
//! fence, custom block and blockquote by their index in the node sequence,
//! open lists by the path of child indices leading to them.

use crate::node::{Content, CustomKind, ListKind, Node};

/// An open list on the nesting stack.
#[derive(Debug)]
pub(crate) struct ListFrame {
    pub kind: ListKind,
    /// Child indices from the sequence root to the list node.
    pub path: Vec<usize>,
}

/// An open `...keyword` block.
#[derive(Debug)]
pub(crate) struct OpenCustom {
    pub index: usize,
    pub kind: CustomKind,
}

/// State for one block sequence. Recursive scans start from a fresh state.
#[derive(Debug, Default)]
pub(crate) struct ScannerState {
    pub nodes: Vec<Node>,
    /// Index of the open code block.
    pub fence: Option<usize>,
    pub custom: Option<OpenCustom>,
    /// Index of the blockquote absorbing consecutive `> ` lines.
    pub blockquote: Option<usize>,
    pub lists: Vec<ListFrame>,
    /// Indent baseline of the last list item. Signed because dedent
    /// subtracts a fixed step that may overshoot.
    pub indent: isize,
}

/// Indent removed per popped list frame on dedent.
const DEDENT_STEP: isize = 4;

impl ScannerState {
    /// Append a top-level node, returning its index.
    pub fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Append a child to the top-level node at `index`.
    pub fn push_child(&mut self, index: usize, child: impl Into<Content>) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.push(child);
        }
    }

    /// Close every open list and reset the indent baseline.
    pub fn close_lists(&mut self) {
        self.lists.clear();
        self.indent = 0;
    }

    pub fn top_list_kind(&self) -> Option<ListKind> {
        self.lists.last().map(|frame| frame.kind)
    }

    /// Pop list frames while `indent` is below the baseline.
    pub fn dedent(&mut self, indent: isize) {
        while !self.lists.is_empty() && indent < self.indent {
            self.lists.pop();
            self.indent -= DEDENT_STEP;
        }
    }

    /// Open a list nested under the top frame.
    ///
    /// The list goes inside the last item of the enclosing list when there is
    /// one, otherwise directly into the enclosing list. With no open list it
    /// becomes a top-level node.
    pub fn open_nested_list(&mut self, kind: ListKind, is_rtl: bool) {
        let Some(mut path) = self.lists.last().map(|frame| frame.path.clone()) else {
            self.open_top_level_list(kind, is_rtl);
            return;
        };
        let list = new_list(kind, is_rtl);
        let nested = node_at_mut(&mut self.nodes, &path)
            .and_then(|parent| nest_in_list(parent, list, &mut path));

        if nested.is_some() {
            self.lists.push(ListFrame { kind, path });
        } else {
            self.open_top_level_list(kind, is_rtl);
        }
    }

    /// Open a list as a new top-level node.
    pub fn open_top_level_list(&mut self, kind: ListKind, is_rtl: bool) {
        let index = self.push(new_list(kind, is_rtl));
        self.lists.push(ListFrame {
            kind,
            path: vec![index],
        });
    }

    /// Append an item to the innermost open list.
    pub fn push_list_item(&mut self, item: Node) {
        let target = self
            .lists
            .last()
            .and_then(|frame| node_at_mut(&mut self.nodes, &frame.path));
        match target {
            Some(list) => {
                list.push(item);
            }
            None => {
                self.push(item);
            }
        }
    }
}

fn new_list(kind: ListKind, is_rtl: bool) -> Node {
    Node::List {
        kind,
        is_rtl,
        content: Vec::new(),
    }
}

/// Insert `child` into `list`, inside its last item when it ends with one,
/// extending `path` to point at the inserted node.
fn nest_in_list(list: &mut Node, child: Node, path: &mut Vec<usize>) -> Option<()> {
    let content = list.content_mut()?;
    let ends_with_item = matches!(
        content.last(),
        Some(Content::Node(Node::ListItem { .. } | Node::TaskItem { .. }))
    );

    if ends_with_item {
        let last = content.len() - 1;
        let Some(Content::Node(item)) = content.get_mut(last) else {
            return None;
        };
        let index = item.push(child)?;
        path.push(last);
        path.push(index);
    } else {
        content.push(Content::Node(child));
        path.push(content.len() - 1);
    }
    Some(())
}

/// Resolve a path of child indices to a node.
pub(crate) fn node_at_mut<'n>(nodes: &'n mut [Node], path: &[usize]) -> Option<&'n mut Node> {
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get_mut(*first)?;
    for &index in rest {
        node = match node.content_mut()?.get_mut(index)? {
            Content::Node(child) => child,
            Content::Text(_) => return None,
        };
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> Node {
        Node::ListItem {
            is_rtl: false,
            content: vec![Content::Text(text.to_owned())],
        }
    }

    #[test]
    fn test_nested_list_goes_inside_last_item() {
        let mut state = ScannerState::default();
        state.open_top_level_list(ListKind::Unordered, false);
        state.push_list_item(item("a"));
        state.open_nested_list(ListKind::Ordered, false);
        state.push_list_item(item("b"));

        assert_eq!(state.lists.len(), 2);
        assert_eq!(state.lists[1].path, vec![0, 0, 1]);
        let nested = node_at_mut(&mut state.nodes, &[0, 0, 1]).unwrap();
        assert_eq!(nested.type_name(), "ol");
        assert_eq!(nested.content().len(), 1);
    }

    #[test]
    fn test_nested_list_in_empty_list() {
        let mut state = ScannerState::default();
        state.open_top_level_list(ListKind::Unordered, false);
        state.open_nested_list(ListKind::Unordered, true);

        assert_eq!(state.lists[1].path, vec![0, 0]);
    }

    #[test]
    fn test_nested_list_without_frame_is_top_level() {
        let mut state = ScannerState::default();
        state.open_nested_list(ListKind::Ordered, false);

        assert_eq!(state.nodes.len(), 1);
        assert_eq!(state.lists[0].path, vec![0]);
    }

    #[test]
    fn test_dedent_pops_fixed_step() {
        let mut state = ScannerState::default();
        state.open_top_level_list(ListKind::Unordered, false);
        state.open_nested_list(ListKind::Unordered, false);
        state.open_nested_list(ListKind::Unordered, false);
        state.indent = 8;

        state.dedent(2);
        assert_eq!(state.lists.len(), 1);
        assert_eq!(state.indent, 0);
    }

    #[test]
    fn test_dedent_stops_when_stack_is_empty() {
        let mut state = ScannerState::default();
        state.open_top_level_list(ListKind::Unordered, false);
        state.indent = 20;

        state.dedent(0);
        assert!(state.lists.is_empty());
        assert_eq!(state.indent, 16);
    }

    #[test]
    fn test_close_lists_resets_baseline() {
        let mut state = ScannerState::default();
        state.open_top_level_list(ListKind::Ordered, false);
        state.indent = 4;
        state.close_lists();

        assert!(state.lists.is_empty());
        assert_eq!(state.indent, 0);
        assert_eq!(state.top_list_kind(), None);
    }

    #[test]
    fn test_node_at_mut_rejects_text_and_bad_paths() {
        let mut nodes = vec![Node::paragraph("x")];
        assert!(node_at_mut(&mut nodes, &[0, 0]).is_none());
        assert!(node_at_mut(&mut nodes, &[3]).is_none());
        assert!(node_at_mut(&mut nodes, &[]).is_none());
        assert!(node_at_mut(&mut nodes, &[0]).is_some());
    }
}
