//! Typed builder for the SQL-like criteria expressions understood by
//! `loadRecords`.
//!
//! User-supplied values never reach the predicate string raw: string
//! literals are quoted with embedded quotes doubled. `LIKE` wildcards in a
//! term are passed through unchanged; the gateway exposes no `ESCAPE`
//! clause on this surface.

use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub enum Expr {
    Eq { field: String, value: Literal },
    Like { field: String, pattern: String },
    /// OR-combination of sub-expressions.
    Any(Vec<Expr>),
    /// AND-combination of sub-expressions.
    All(Vec<Expr>),
}

#[derive(Debug, Clone)]
pub enum Literal {
    Str(String),
    Int(i64),
}

impl Expr {
    pub fn eq_str(field: &str, value: &str) -> Self {
        Self::Eq {
            field: field.to_string(),
            value: Literal::Str(value.to_string()),
        }
    }

    pub fn eq_int(field: &str, value: i64) -> Self {
        Self::Eq {
            field: field.to_string(),
            value: Literal::Int(value),
        }
    }

    /// `field LIKE '%term%'`.
    pub fn contains(field: &str, term: &str) -> Self {
        Self::Like {
            field: field.to_string(),
            pattern: format!("%{term}%"),
        }
    }

    pub fn any(exprs: Vec<Expr>) -> Self {
        Self::Any(exprs)
    }

    pub fn all(exprs: Vec<Expr>) -> Self {
        Self::All(exprs)
    }

    /// Render the predicate string sent in `criteria.expression.$`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, false);
        out
    }

    fn render_into(&self, out: &mut String, nested: bool) {
        match self {
            Expr::Eq { field, value } => {
                let _ = match value {
                    Literal::Str(s) => write!(out, "{field} = {}", quote(s)),
                    Literal::Int(n) => write!(out, "{field} = {n}"),
                };
            }
            Expr::Like { field, pattern } => {
                let _ = write!(out, "{field} LIKE {}", quote(pattern));
            }
            Expr::Any(exprs) => Self::render_joined(exprs, " OR ", out, nested),
            Expr::All(exprs) => Self::render_joined(exprs, " AND ", out, nested),
        }
    }

    fn render_joined(exprs: &[Expr], separator: &str, out: &mut String, nested: bool) {
        let parenthesize = nested && exprs.len() > 1;
        if parenthesize {
            out.push('(');
        }
        for (index, expr) in exprs.iter().enumerate() {
            if index > 0 {
                out.push_str(separator);
            }
            expr.render_into(out, true);
        }
        if parenthesize {
            out.push(')');
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes.
fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for ch in raw.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}
