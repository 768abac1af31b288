//! Generic AST traversal shared by the metrics and extraction engines.
//!
//! Both engines are visitors over one pre-order depth-first walk. The walk
//! is iterative (cursor-driven) so deeply nested sources cannot overflow
//! the stack, and it never mutates the tree.

use tree_sitter::Node;

/// Visitor invoked during a tree walk.
///
/// `enter` fires before a node's children are visited, `exit` after all of
/// them have been. The exit hook exists for scope bookkeeping: the metrics
/// engine closes per-function aggregation scopes there.
pub trait TreeVisitor {
    fn enter(&mut self, node: Node);

    fn exit(&mut self, _node: Node) {}
}

/// Walks the subtree rooted at `root` in pre-order, children in source
/// order, visiting every node exactly once.
///
/// A `None` root performs zero visits; consumers are expected to produce
/// all-zero metrics / empty extraction from a no-op walk.
pub fn walk<V: TreeVisitor>(root: Option<Node>, visitor: &mut V) {
    let Some(root) = root else { return };

    let mut cursor = root.walk();
    loop {
        visitor.enter(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            visitor.exit(cursor.node());
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Iterate over all children of a node, in source order.
pub fn children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    (0..node.child_count()).filter_map(move |i| node.child(i))
}

/// Get the source text covered by a node.
///
/// Tree-sitter spans are byte offsets; invalid UTF-8 slices degrade to an
/// empty string rather than failing the walk.
pub fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Text of the first child whose type is in `types`, in document order.
pub fn first_child_text_by_types(node: Node, source: &str, types: &[&str]) -> Option<String> {
    children(node)
        .find(|c| types.contains(&c.kind()))
        .map(|c| node_text(c, source).to_string())
}

/// Texts of all children whose type equals `child_type`, in document order.
pub fn all_children_text_by_type(node: Node, source: &str, child_type: &str) -> Vec<String> {
    children(node)
        .filter(|c| c.kind() == child_type)
        .map(|c| node_text(c, source).to_string())
        .collect()
}

/// First child of the given type, if any.
pub fn first_child_by_type<'t>(node: Node<'t>, child_type: &str) -> Option<Node<'t>> {
    children(node).find(|c| c.kind() == child_type)
}

/// Depth-first search for the first descendant of the given type.
pub fn find_descendant_by_type<'t>(node: Node<'t>, target_type: &str) -> Option<Node<'t>> {
    for child in children(node) {
        if child.kind() == target_type {
            return Some(child);
        }
        if let Some(found) = find_descendant_by_type(child, target_type) {
            return Some(found);
        }
    }
    None
}

/// Collect the text of every descendant of the given type, in source order.
pub fn collect_descendant_texts(node: Node, source: &str, target_type: &str, out: &mut Vec<String>) {
    for child in children(node) {
        if child.kind() == target_type {
            out.push(node_text(child, source).to_string());
        }
        collect_descendant_texts(child, source, target_type, out);
    }
}

/// Whether any node in the subtree (excluding `node` itself) has the type.
pub fn subtree_contains_type(node: Node, target_type: &str) -> bool {
    find_descendant_by_type(node, target_type).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        events: Vec<String>,
    }

    impl TreeVisitor for Recorder {
        fn enter(&mut self, node: Node) {
            self.events.push(format!("enter {}", node.kind()));
        }

        fn exit(&mut self, node: Node) {
            self.events.push(format!("exit {}", node.kind()));
        }
    }

    fn parse_js(source: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn walk_of_none_visits_nothing() {
        let mut recorder = Recorder { events: Vec::new() };
        walk(None, &mut recorder);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn walk_enters_before_descending_and_exits_after() {
        let tree = parse_js("f();");
        let mut recorder = Recorder { events: Vec::new() };
        walk(Some(tree.root_node()), &mut recorder);

        let enter_program = recorder
            .events
            .iter()
            .position(|e| e == "enter program")
            .expect("program entered");
        let exit_program = recorder
            .events
            .iter()
            .rposition(|e| e == "exit program")
            .expect("program exited");
        assert_eq!(enter_program, 0, "root entered first");
        assert_eq!(
            exit_program,
            recorder.events.len() - 1,
            "root exited last"
        );

        let enter_call = recorder
            .events
            .iter()
            .position(|e| e == "enter call_expression")
            .expect("call entered");
        let exit_call = recorder
            .events
            .iter()
            .position(|e| e == "exit call_expression")
            .expect("call exited");
        assert!(enter_program < enter_call && enter_call < exit_call);
    }

    #[test]
    fn walk_visits_every_node_exactly_once() {
        let tree = parse_js("const a = 1;\nconst b = 2;\n");
        let mut recorder = Recorder { events: Vec::new() };
        walk(Some(tree.root_node()), &mut recorder);

        let enters = recorder.events.iter().filter(|e| e.starts_with("enter")).count();
        let exits = recorder.events.iter().filter(|e| e.starts_with("exit")).count();
        assert_eq!(enters, exits, "every enter pairs with one exit");
    }

    #[test]
    fn child_lookup_helpers() {
        let tree = parse_js("function greet(name) {}");
        let source = "function greet(name) {}";
        let func = find_descendant_by_type(tree.root_node(), "function_declaration")
            .expect("function node");

        assert_eq!(
            first_child_text_by_types(func, source, &["identifier"]),
            Some("greet".to_string())
        );
        assert!(first_child_by_type(func, "formal_parameters").is_some());
        assert!(subtree_contains_type(func, "statement_block"));

        let mut names = Vec::new();
        collect_descendant_texts(func, source, "identifier", &mut names);
        assert_eq!(names, vec!["greet", "name"]);
    }
}
