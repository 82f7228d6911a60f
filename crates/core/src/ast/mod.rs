pub mod node;
pub mod parser;
pub mod patterns;

pub use node::{AstNode, NodeKind};
pub use parser::{parse_ast, parse_ast_file};
pub use patterns::{chained_call_sites, has_chained_member_access};
