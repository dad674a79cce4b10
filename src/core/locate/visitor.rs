//! AST visitor collecting translation call sites with their enclosing function.
//!
//! swc nodes carry no parent links, so instead of walking ancestors from each
//! call the visitor keeps a stack of the function-like nodes it is inside.
//! The innermost frame at a call site is its enclosing function.

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Callee, ClassMethod, Constructor, DefaultDecl, ExportDefaultDecl, Expr,
    FnDecl, GetterProp, KeyValueProp, Lit, MethodProp, Pat, PrivateMethod, PropName, SetterProp,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use super::naming::{FunctionSite, ParentKind};
use crate::core::parsers::source::ParsedSource;

/// A function-like node the traversal is currently inside.
#[derive(Debug, Clone)]
struct FunctionFrame {
    name: String,
    lo: BytePos,
    hi: BytePos,
}

/// A `t("literal")` call with a resolved enclosing function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Inferred enclosing function name (may be empty).
    pub function_name: String,
    /// Key literal as written between the quotes.
    pub literal: String,
    /// Full source text of the enclosing function.
    pub function_text: String,
}

impl CallSite {
    /// `functionName.literal`, the key expected in the flattened dictionary.
    pub fn full_key(&self) -> String {
        format!("{}.{}", self.function_name, self.literal)
    }
}

/// Collect every call to `callee` whose first argument is a string literal.
pub fn collect_call_sites(parsed: &ParsedSource, callee: &str) -> Vec<CallSite> {
    let mut visitor = UsageVisitor::new(parsed, callee);
    parsed.module.visit_with(&mut visitor);
    visitor.calls
}

pub struct UsageVisitor<'a> {
    parsed: &'a ParsedSource,
    /// Exact identifier of the translation function (e.g. `t`).
    callee: &'a str,
    frames: Vec<FunctionFrame>,
    calls: Vec<CallSite>,
}

impl<'a> UsageVisitor<'a> {
    pub fn new(parsed: &'a ParsedSource, callee: &'a str) -> Self {
        Self {
            parsed,
            callee,
            frames: Vec::new(),
            calls: Vec::new(),
        }
    }

    fn with_frame(
        &mut self,
        site: FunctionSite,
        lo: BytePos,
        hi: BytePos,
        visit: impl FnOnce(&mut Self),
    ) {
        self.frames.push(FunctionFrame {
            name: site.name(),
            lo,
            hi,
        });
        visit(self);
        self.frames.pop();
    }

    fn enter_arrow(&mut self, arrow: &ArrowExpr, parent: ParentKind, parent_name: Option<String>) {
        self.with_frame(
            FunctionSite::arrow(parent, parent_name),
            arrow.span.lo,
            arrow.span.hi,
            |this| arrow.visit_children_with(this),
        );
    }

    fn record_call(&mut self, literal: &str) {
        let Some(frame) = self.frames.last() else {
            debug!(key = literal, "call outside any function, skipped");
            return;
        };
        let Some(function_text) = self.parsed.slice(frame.lo, frame.hi) else {
            return;
        };
        self.calls.push(CallSite {
            function_name: frame.name.clone(),
            literal: literal.to_string(),
            function_text: function_text.to_string(),
        });
    }

    /// The key literal of `t("key")`: a plain string first argument.
    fn key_literal(&self, node: &CallExpr) -> Option<&'a str> {
        let arg = node.args.first()?;
        if arg.spread.is_some() {
            return None;
        }
        let Expr::Lit(Lit::Str(s)) = &*arg.expr else {
            return None;
        };
        let raw = self.parsed.slice(s.span.lo, s.span.hi)?;
        let literal = strip_quotes(raw)?;
        (!literal.is_empty()).then_some(literal)
    }
}

fn strip_quotes(raw: &str) -> Option<&str> {
    raw.strip_prefix(['"', '\''])?.strip_suffix(['"', '\''])
}

/// Name of a property or method key as written in source.
///
/// Computed keys (`[expr]`) have no static name.
fn prop_name_text(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        PropName::Num(n) => Some(
            n.raw
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_else(|| n.value.to_string()),
        ),
        PropName::BigInt(b) => b.raw.as_ref().map(|r| r.to_string()),
        PropName::Computed(_) => None,
    }
}

impl Visit for UsageVisitor<'_> {
    fn visit_fn_decl(&mut self, node: &FnDecl) {
        // Generator declarations are not enclosing functions.
        if node.function.is_generator {
            node.visit_children_with(self);
            return;
        }
        let site = FunctionSite::declaration(node.ident.sym.to_string());
        self.with_frame(site, node.function.span.lo, node.function.span.hi, |this| {
            node.function.visit_children_with(this)
        });
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        // `export default function Page() {}` is a named declaration;
        // the anonymous form is a plain function expression.
        if let DefaultDecl::Fn(fn_expr) = &node.decl
            && let Some(ident) = &fn_expr.ident
            && !fn_expr.function.is_generator
        {
            let site = FunctionSite::declaration(ident.sym.to_string());
            let span = fn_expr.function.span;
            self.with_frame(site, span.lo, span.hi, |this| {
                fn_expr.function.visit_children_with(this)
            });
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.enter_arrow(node, ParentKind::Other, None);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        node.name.visit_with(self);
        match node.init.as_deref() {
            Some(Expr::Arrow(arrow)) => {
                let name = match &node.name {
                    Pat::Ident(binding) => Some(binding.id.sym.to_string()),
                    _ => None,
                };
                self.enter_arrow(arrow, ParentKind::VariableDeclarator, name);
            }
            Some(init) => init.visit_with(self),
            None => {}
        }
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        node.key.visit_with(self);
        if let Expr::Arrow(arrow) = &*node.value {
            self.enter_arrow(arrow, ParentKind::Pair, prop_name_text(&node.key));
        } else {
            node.value.visit_with(self);
        }
    }

    fn visit_class_method(&mut self, node: &ClassMethod) {
        let site = FunctionSite::method(prop_name_text(&node.key));
        self.with_frame(site, node.span.lo, node.span.hi, |this| {
            node.visit_children_with(this)
        });
    }

    fn visit_private_method(&mut self, node: &PrivateMethod) {
        let site = FunctionSite::method(Some(format!("#{}", node.key.name)));
        self.with_frame(site, node.span.lo, node.span.hi, |this| {
            node.visit_children_with(this)
        });
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        let site = FunctionSite::method(Some("constructor".to_string()));
        self.with_frame(site, node.span.lo, node.span.hi, |this| {
            node.visit_children_with(this)
        });
    }

    fn visit_method_prop(&mut self, node: &MethodProp) {
        let site = FunctionSite::method(prop_name_text(&node.key));
        let lo = node.key.span().lo;
        let hi = node.function.span.hi;
        self.with_frame(site, lo, hi, |this| node.visit_children_with(this));
    }

    fn visit_getter_prop(&mut self, node: &GetterProp) {
        let site = FunctionSite::method(prop_name_text(&node.key));
        self.with_frame(site, node.span.lo, node.span.hi, |this| {
            node.visit_children_with(this)
        });
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        let site = FunctionSite::method(prop_name_text(&node.key));
        self.with_frame(site, node.span.lo, node.span.hi, |this| {
            node.visit_children_with(this)
        });
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(expr) = &node.callee
            && let Expr::Ident(ident) = &**expr
            && ident.sym.as_str() == self.callee
            && let Some(literal) = self.key_literal(node)
        {
            self.record_call(literal);
        }

        node.visit_children_with(self);
    }
}
