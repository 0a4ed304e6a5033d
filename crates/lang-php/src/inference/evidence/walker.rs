//! Assignment search over the syntax model.
//!
//! Pre-order walk over statements and expressions, descending into nested
//! assignments and closure bodies.

use docsync_api::models::{ClassMethod, Expr, Param, Stmt};
use std::ops::ControlFlow;

/// An assignment whose target is a named property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyAssign<'a> {
    /// Left-hand side as written.
    pub target: &'a Expr,
    /// Right-hand side.
    pub expr: &'a Expr,
    /// `$this->items[] = $expr` (or any subscript write).
    pub is_subscript: bool,
}

/// Visit every expression under `stmts`, stopping early on `Break`.
pub fn walk_exprs<'a, F>(stmts: &'a [Stmt], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&'a Expr) -> ControlFlow<()>,
{
    for stmt in stmts {
        walk_stmt(stmt, visit)?;
    }
    ControlFlow::Continue(())
}

fn walk_stmt<'a, F>(stmt: &'a Stmt, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&'a Expr) -> ControlFlow<()>,
{
    match stmt {
        Stmt::Expr(expr) => walk_expr(expr, visit),
        Stmt::Return(expr) => match expr {
            Some(expr) => walk_expr(expr, visit),
            None => ControlFlow::Continue(()),
        },
        Stmt::If {
            cond,
            then,
            otherwise,
        } => {
            walk_expr(cond, visit)?;
            walk_exprs(then, visit)?;
            walk_exprs(otherwise, visit)
        }
        Stmt::Foreach { expr, body, .. } => {
            walk_expr(expr, visit)?;
            walk_exprs(body, visit)
        }
        Stmt::Block(stmts) => walk_exprs(stmts, visit),
    }
}

fn walk_expr<'a, F>(expr: &'a Expr, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&'a Expr) -> ControlFlow<()>,
{
    visit(expr)?;

    match expr {
        Expr::PropertyFetch { var, .. } => walk_expr(var, visit),
        Expr::ArrayDimFetch { var, dim } => {
            walk_expr(var, visit)?;
            match dim {
                Some(dim) => walk_expr(dim, visit),
                None => ControlFlow::Continue(()),
            }
        }
        Expr::Assign { var, expr } => {
            walk_expr(var, visit)?;
            walk_expr(expr, visit)
        }
        Expr::Array(items) => walk_all(items, visit),
        Expr::New { args, .. } | Expr::StaticCall { args, .. } | Expr::FuncCall { args, .. } => {
            walk_all(args, visit)
        }
        Expr::MethodCall { var, args, .. } => {
            walk_expr(var, visit)?;
            walk_all(args, visit)
        }
        Expr::Closure { body, .. } => walk_exprs(body, visit),
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => {
            walk_expr(cond, visit)?;
            if let Some(then) = then {
                walk_expr(then, visit)?;
            }
            walk_expr(otherwise, visit)
        }
        Expr::Variable(_)
        | Expr::StaticPropertyFetch { .. }
        | Expr::ConstFetch(_)
        | Expr::Scalar(_)
        | Expr::Unknown => ControlFlow::Continue(()),
    }
}

fn walk_all<'a, F>(exprs: &'a [Expr], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&'a Expr) -> ControlFlow<()>,
{
    for expr in exprs {
        walk_expr(expr, visit)?;
    }
    ControlFlow::Continue(())
}

/// `$x->name` or `X::$name`.
pub fn is_property_fetch_named(expr: &Expr, property_name: &str) -> bool {
    match expr {
        Expr::PropertyFetch { name, .. } | Expr::StaticPropertyFetch { name, .. } => {
            name == property_name
        }
        _ => false,
    }
}

/// Covers:
/// - `$this->name = <expr>;`
/// - `$this->name[] = <expr>;`
pub fn match_property_assign<'a>(
    expr: &'a Expr,
    property_name: &str,
) -> Option<PropertyAssign<'a>> {
    let Expr::Assign { var, expr: value } = expr else {
        return None;
    };

    if is_property_fetch_named(var, property_name) {
        return Some(PropertyAssign {
            target: var,
            expr: value,
            is_subscript: false,
        });
    }

    if let Expr::ArrayDimFetch { var: inner, .. } = var.as_ref() {
        if is_property_fetch_named(inner, property_name) {
            return Some(PropertyAssign {
                target: var,
                expr: value,
                is_subscript: true,
            });
        }
    }

    None
}

/// Every assignment to `property_name` under `stmts`, in source order.
pub fn find_property_assigns<'a>(
    stmts: &'a [Stmt],
    property_name: &str,
) -> Vec<PropertyAssign<'a>> {
    let mut found = Vec::new();
    let _ = walk_exprs(stmts, &mut |expr| {
        if let Some(assign) = match_property_assign(expr, property_name) {
            found.push(assign);
        }
        ControlFlow::Continue(())
    });
    found
}

/// In case the property name is different to param name:
///
/// ```text
/// (SomeType $anotherValue)
/// $this->value = $anotherValue;
/// ↓
/// $anotherValue param
/// ```
pub fn find_param_bound_to_property<'a>(
    method: &'a ClassMethod,
    property_name: &str,
) -> Option<&'a Param> {
    let mut bound = None;
    let _ = walk_exprs(&method.body, &mut |expr| {
        let Some(assign) = match_property_assign(expr, property_name) else {
            return ControlFlow::Continue(());
        };
        if assign.is_subscript {
            return ControlFlow::Continue(());
        }
        match assign.expr.variable_name().and_then(|name| method.param(name)) {
            Some(param) => {
                bound = Some(param);
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    });
    bound
}
