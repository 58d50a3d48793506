use std::{collections::HashSet, fmt::Write};

use crate::graph::node::NodeRef;

/// Appended to the header of a node already rendered in the same call.
pub const CYCLE_MARKER: &str = " _/";

impl NodeRef {
    /// Renders the node and everything reachable from it as an indented tree.
    ///
    /// Each line starts with a newline and one tab per depth level. A line is
    /// the optional `key = ` or `index = ` prefix followed by the `<kind:value>`
    /// header; outside `test_mode` the header carries the node identity as
    /// ` @hex`. Attributes come before children.
    ///
    /// A node met a second time in the same call prints its header followed
    /// by [`CYCLE_MARKER`] and is not descended into, so self-referential
    /// graphs terminate.
    ///
    /// # Example
    /// ```
    /// use kb::graph::node::NodeRef;
    ///
    /// let hello = NodeRef::symbol("Hello");
    /// hello.push(&NodeRef::symbol("World"));
    /// assert_eq!(hello.render(true), "\n<symbol:Hello>\n\t0 = <symbol:World>");
    ///
    /// hello.push(&hello);
    /// assert_eq!(hello.render(true),
    ///            "\n<symbol:Hello>\n\t0 = <symbol:World>\n\t1 = <symbol:Hello> _/");
    /// ```
    #[must_use]
    pub fn render(&self, test_mode: bool) -> String {
        let mut visited = HashSet::new();
        let mut tree = String::new();
        // Pending lines as (node, depth, prefix), next one on top.
        let mut stack = vec![(self.clone(), 0, String::new())];

        while let Some((node, depth, prefix)) = stack.pop() {
            tree.push('\n');
            tree.extend(std::iter::repeat_n('\t', depth));
            tree.push_str(&prefix);
            tree.push_str(&node.header());
            if !test_mode {
                // Writing to a String cannot fail.
                let _ = write!(tree, " @{:x}", node.id());
            }

            if !visited.insert(node.id()) {
                tree.push_str(CYCLE_MARKER);
                continue;
            }

            for (index, child) in node.children().into_iter().enumerate().rev() {
                stack.push((child, depth + 1, format!("{index} = ")));
            }
            for (key, child) in node.attributes().into_iter().rev() {
                stack.push((child, depth + 1, format!("{key} = ")));
            }
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{kind::Kind, node::NodeRef};

    #[test]
    fn empty_leaf() {
        assert_eq!(NodeRef::new(Kind::Symbol, "").render(true), "\n<symbol:>");
    }

    #[test]
    fn identity_suffix_outside_test_mode() {
        let node = NodeRef::string("x");
        assert_eq!(node.render(false), format!("\n<string:x> @{:x}", node.id()));
    }

    #[test]
    fn attributes_before_children_and_nesting() {
        let root = NodeRef::symbol("root");
        let inner = NodeRef::symbol("inner");
        inner.push(&NodeRef::integer(1));
        root.push(&inner);
        root.set_attribute("key", &NodeRef::string("v"));

        assert_eq!(root.render(true),
                   "\n<symbol:root>\n\tkey = <string:v>\n\t0 = <symbol:inner>\n\t\t0 = <integer:1>");
    }

    #[test]
    fn visited_set_is_per_call() {
        let node = NodeRef::symbol("a");
        node.bind_by_kind(&node);
        let first = node.render(true);
        let second = node.render(true);
        assert_eq!(first, "\n<symbol:a>\n\tsymbol = <symbol:a> _/");
        assert_eq!(first, second);
    }

    #[test]
    fn deep_chain_renders_without_recursion() {
        let root = NodeRef::symbol("n");
        let mut tip = root.clone();
        for _ in 0..10_000 {
            let next = NodeRef::symbol("n");
            tip.push(&next);
            tip = next;
        }
        let tree = root.render(true);
        assert_eq!(tree.matches("<symbol:n>").count(), 10_001);
        assert!(tree.ends_with(&format!("\n{}0 = <symbol:n>", "\t".repeat(10_000))));
    }

    #[test]
    fn shared_node_marked_on_second_visit() {
        let root = NodeRef::symbol("root");
        let shared = NodeRef::string("s");
        root.push(&shared).push(&shared);
        assert_eq!(root.render(true),
                   "\n<symbol:root>\n\t0 = <string:s>\n\t1 = <string:s> _/");
    }
}
