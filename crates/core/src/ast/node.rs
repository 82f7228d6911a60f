use serde::{Deserialize, Serialize};

/// Node kinds from the solc compact JSON AST (`nodeType` tags). The set is
/// closed: tags this tool never inspects deserialize as `Other` and are
/// still traversed through their known child fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    ContractDefinition,
    FunctionDefinition,
    ModifierDefinition,
    ParameterList,
    VariableDeclaration,
    Block,
    ExpressionStatement,
    VariableDeclarationStatement,
    IfStatement,
    ForStatement,
    WhileStatement,
    Return,
    EmitStatement,
    FunctionCall,
    FunctionCallOptions,
    MemberAccess,
    IndexAccess,
    Identifier,
    BinaryOperation,
    UnaryOperation,
    Assignment,
    Conditional,
    TupleExpression,
    NewExpression,
    ElementaryTypeNameExpression,
    Literal,
    #[default]
    #[serde(other)]
    Other,
}

/// One node of a compiled contract's syntax tree, deserialized from solc
/// `--ast-compact-json` output. Child links are explicit: `expression` is
/// the callee of a FunctionCall and the base of a MemberAccess; the
/// remaining fields cover the statement and expression forms the walkers
/// need. Unknown JSON fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AstNode {
    pub node_type: NodeKind,
    pub name: Option<String>,
    pub member_name: Option<String>,
    /// `"offset:length:file-index"` source span, as emitted by solc.
    pub src: Option<String>,
    pub expression: Option<Box<AstNode>>,
    pub arguments: Vec<AstNode>,
    pub nodes: Vec<AstNode>,
    pub body: Option<Box<AstNode>>,
    pub statements: Vec<AstNode>,
    pub declarations: Vec<AstNode>,
    pub components: Vec<AstNode>,
    pub condition: Option<Box<AstNode>>,
    pub true_body: Option<Box<AstNode>>,
    pub false_body: Option<Box<AstNode>>,
    pub left_hand_side: Option<Box<AstNode>>,
    pub right_hand_side: Option<Box<AstNode>>,
    pub left_expression: Option<Box<AstNode>>,
    pub right_expression: Option<Box<AstNode>>,
    pub sub_expression: Option<Box<AstNode>>,
    pub base_expression: Option<Box<AstNode>>,
    pub index_expression: Option<Box<AstNode>>,
    pub initial_value: Option<Box<AstNode>>,
    pub initialization_expression: Option<Box<AstNode>>,
    pub loop_expression: Option<Box<AstNode>>,
}

impl AstNode {
    /// Direct children, in field order. Fields absent from the JSON are
    /// simply empty; no field probing is needed.
    pub fn children(&self) -> Vec<&AstNode> {
        let mut out = Vec::new();
        let singles = [
            &self.expression,
            &self.body,
            &self.condition,
            &self.true_body,
            &self.false_body,
            &self.left_hand_side,
            &self.right_hand_side,
            &self.left_expression,
            &self.right_expression,
            &self.sub_expression,
            &self.base_expression,
            &self.index_expression,
            &self.initial_value,
            &self.initialization_expression,
            &self.loop_expression,
        ];
        for child in singles.into_iter().flatten() {
            out.push(child.as_ref());
        }
        for list in [
            &self.arguments,
            &self.nodes,
            &self.statements,
            &self.declarations,
            &self.components,
        ] {
            out.extend(list.iter());
        }
        out
    }

    /// Depth-first pre-order walk. The tree is acyclic and bounded, so no
    /// visited-set is needed.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a AstNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// All reachable nodes of the given kind, in pre-order.
    pub fn find_all(&self, kind: NodeKind) -> Vec<&AstNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.node_type == kind {
                found.push(node);
            }
        });
        found
    }

    /// Byte offset of this node in its source file, from the `src` span.
    pub fn src_offset(&self) -> Option<usize> {
        self.src.as_ref()?.split(':').next()?.parse().ok()
    }
}
