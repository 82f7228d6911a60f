use super::node::{AstNode, NodeKind};

/// Depth of the member-access chain feeding a call, plus the node the chain
/// bottoms out on. Starting at the callee, each consecutive MemberAccess
/// adds one step; the walk stops at the first non-MemberAccess node.
fn member_chain(call: &AstNode) -> (usize, Option<&AstNode>) {
    let mut depth = 0;
    let mut current = call.expression.as_deref();
    while let Some(node) = current {
        if node.node_type != NodeKind::MemberAccess {
            break;
        }
        depth += 1;
        current = node.expression.as_deref();
    }
    (depth, current)
}

/// Whether a single call site matches: chain of at least `min_depth`
/// member accesses bottoming out on a plain Identifier. A chain ending on
/// anything else (another call, an index expression) never matches,
/// regardless of depth.
fn call_matches(call: &AstNode, min_depth: usize) -> bool {
    let (depth, terminator) = member_chain(call);
    depth >= min_depth
        && terminator.is_some_and(|node| node.node_type == NodeKind::Identifier)
}

/// All FunctionCall nodes under `root` whose callee is a member-access
/// chain of at least `min_depth` steps ending on an Identifier, in
/// pre-order. Used by detectors that report every site.
pub fn chained_call_sites(root: &AstNode, min_depth: usize) -> Vec<&AstNode> {
    root.find_all(NodeKind::FunctionCall)
        .into_iter()
        .filter(|call| call_matches(call, min_depth))
        .collect()
}

/// Existential form: does any call under `root` sit at the end of a
/// member-access chain of at least `min_depth` (e.g. `a.b.c(...)` for
/// depth 2)? Read-only; returns on the first match.
pub fn has_chained_member_access(root: &AstNode, min_depth: usize) -> bool {
    root.find_all(NodeKind::FunctionCall)
        .into_iter()
        .any(|call| call_matches(call, min_depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps an expression JSON fragment in SourceUnit > Contract > Function.
    fn tree_with_expression(expr_json: &str) -> AstNode {
        let json = format!(
            r#"{{
                "nodeType": "SourceUnit",
                "nodes": [{{
                    "nodeType": "ContractDefinition",
                    "name": "C",
                    "nodes": [{{
                        "nodeType": "FunctionDefinition",
                        "name": "f",
                        "body": {{
                            "nodeType": "Block",
                            "statements": [{{
                                "nodeType": "ExpressionStatement",
                                "expression": {expr_json}
                            }}]
                        }}
                    }}]
                }}]
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn call_with_chain(depth: usize, terminator: &str) -> AstNode {
        let mut callee = terminator.to_string();
        for i in 0..depth {
            callee = format!(
                r#"{{"nodeType":"MemberAccess","memberName":"m{i}","expression":{callee}}}"#
            );
        }
        tree_with_expression(&format!(
            r#"{{"nodeType":"FunctionCall","expression":{callee},"arguments":[]}}"#
        ))
    }

    const IDENT: &str = r#"{"nodeType":"Identifier","name":"token"}"#;
    const INNER_CALL: &str = r#"{"nodeType":"FunctionCall","expression":{"nodeType":"Identifier","name":"factory"},"arguments":[]}"#;

    #[test]
    fn test_depth_boundary() {
        // Exactly min_depth matches; one less does not.
        assert!(has_chained_member_access(&call_with_chain(2, IDENT), 2));
        assert!(!has_chained_member_access(&call_with_chain(1, IDENT), 2));
        assert!(has_chained_member_access(&call_with_chain(3, IDENT), 2));
    }

    #[test]
    fn test_chain_must_end_on_identifier() {
        // Deep chain bottoming out on another call never matches.
        assert!(!has_chained_member_access(&call_with_chain(3, INNER_CALL), 2));
    }

    #[test]
    fn test_depth_zero_only_matches_min_depth_zero() {
        let direct = call_with_chain(0, IDENT);
        assert!(!has_chained_member_access(&direct, 2));
        assert!(!has_chained_member_access(&direct, 1));
        assert!(has_chained_member_access(&direct, 0));
    }

    #[test]
    fn test_no_calls_no_match() {
        let tree = tree_with_expression(r#"{"nodeType":"Identifier","name":"x"}"#);
        assert!(!has_chained_member_access(&tree, 0));
    }

    #[test]
    fn test_chained_call_sites_collects_each_match() {
        // Two statements: one matching chain, one direct call.
        let json = r#"{
            "nodeType": "Block",
            "statements": [
                {"nodeType": "ExpressionStatement", "expression": {
                    "nodeType": "FunctionCall", "arguments": [],
                    "expression": {"nodeType": "MemberAccess", "memberName": "transfer",
                        "expression": {"nodeType": "MemberAccess", "memberName": "token",
                            "expression": {"nodeType": "Identifier", "name": "vault"}}}}},
                {"nodeType": "ExpressionStatement", "expression": {
                    "nodeType": "FunctionCall", "arguments": [],
                    "expression": {"nodeType": "Identifier", "name": "sync"}}}
            ]
        }"#;
        let root: AstNode = serde_json::from_str(json).unwrap();
        assert_eq!(chained_call_sites(&root, 2).len(), 1);
        assert_eq!(chained_call_sites(&root, 0).len(), 2);
    }

    #[test]
    fn test_nested_call_in_arguments_is_considered() {
        // The matching call sits inside another call's argument list.
        let inner = r#"{"nodeType":"FunctionCall","arguments":[],
            "expression":{"nodeType":"MemberAccess","memberName":"balanceOf",
                "expression":{"nodeType":"MemberAccess","memberName":"token",
                    "expression":{"nodeType":"Identifier","name":"pool"}}}}"#;
        let outer = format!(
            r#"{{"nodeType":"FunctionCall","arguments":[{inner}],
                "expression":{{"nodeType":"Identifier","name":"require"}}}}"#
        );
        let tree = tree_with_expression(&outer);
        assert!(has_chained_member_access(&tree, 2));
    }
}
