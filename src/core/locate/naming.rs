//! Enclosing-function name inference.
//!
//! A call site's key is qualified by the name of its enclosing function. How
//! that name is found depends on the function's syntactic kind and, for
//! arrow functions, on what directly holds the arrow. The rules live in a
//! `(FunctionKind, ParentKind)` table so new shapes are one row each.

/// Function-like nodes that can enclose a translation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `function Home() {}`, including `export default function Home() {}`.
    Declaration,
    /// Class or object-literal method, constructor, getter or setter.
    Method,
    /// `() => {}`
    Arrow,
}

/// The node that directly holds a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    /// `const Home = () => {}`
    VariableDeclarator,
    /// `{ Home: () => {} }`
    Pair,
    /// Anything else (call argument, JSX attribute, return value, ...).
    Other,
}

/// Where the name of a function comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// The function's own declared name.
    Declared,
    /// The name held by the parent: bound variable or property key.
    FromParent,
    /// No usable name.
    Anonymous,
}

const NAME_RULES: &[(FunctionKind, ParentKind, NameRule)] = &[
    (FunctionKind::Declaration, ParentKind::VariableDeclarator, NameRule::Declared),
    (FunctionKind::Declaration, ParentKind::Pair, NameRule::Declared),
    (FunctionKind::Declaration, ParentKind::Other, NameRule::Declared),
    (FunctionKind::Method, ParentKind::VariableDeclarator, NameRule::Declared),
    (FunctionKind::Method, ParentKind::Pair, NameRule::Declared),
    (FunctionKind::Method, ParentKind::Other, NameRule::Declared),
    (FunctionKind::Arrow, ParentKind::VariableDeclarator, NameRule::FromParent),
    (FunctionKind::Arrow, ParentKind::Pair, NameRule::FromParent),
    (FunctionKind::Arrow, ParentKind::Other, NameRule::Anonymous),
];

pub fn name_rule(kind: FunctionKind, parent: ParentKind) -> NameRule {
    NAME_RULES
        .iter()
        .find(|(k, p, _)| *k == kind && *p == parent)
        .map(|(_, _, rule)| *rule)
        .unwrap_or(NameRule::Anonymous)
}

/// Everything the visitor knows about a function when it enters it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSite {
    pub kind: FunctionKind,
    pub parent: ParentKind,
    /// Name written on the function itself, if any.
    pub declared_name: Option<String>,
    /// Name carried by the parent (bound variable or property key), if any.
    pub parent_name: Option<String>,
}

impl FunctionSite {
    pub fn declaration(name: impl Into<String>) -> Self {
        Self {
            kind: FunctionKind::Declaration,
            parent: ParentKind::Other,
            declared_name: Some(name.into()),
            parent_name: None,
        }
    }

    pub fn method(name: Option<String>) -> Self {
        Self {
            kind: FunctionKind::Method,
            parent: ParentKind::Other,
            declared_name: name,
            parent_name: None,
        }
    }

    pub fn arrow(parent: ParentKind, parent_name: Option<String>) -> Self {
        Self {
            kind: FunctionKind::Arrow,
            parent,
            declared_name: None,
            parent_name,
        }
    }

    /// Inferred name, empty when the function is anonymous.
    pub fn name(&self) -> String {
        let name = match name_rule(self.kind, self.parent) {
            NameRule::Declared => self.declared_name.as_deref(),
            NameRule::FromParent => self.parent_name.as_deref(),
            NameRule::Anonymous => None,
        };
        name.unwrap_or_default().to_string()
    }
}
