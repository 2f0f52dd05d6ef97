use std::fmt;

use log::{debug, warn};

use crate::codegen::signature;
use crate::models::{Parameter, TypeExpr};
use crate::parser::ast::{ChanDir, Type};

/// Converts a parsed type into its symbolic form. Types with no textual
/// rendering become `TypeExpr::Unsupported` rather than failing.
pub fn type_expr(ty: &Type) -> TypeExpr {
    match ty {
        Type::Name(ident) => TypeExpr::Named {
            name: ident.name.clone(),
        },
        Type::Qualified { pkg, name } => TypeExpr::Qualified {
            package: pkg.name.clone(),
            name: name.name.clone(),
        },
        Type::Pointer(inner) => TypeExpr::Pointer {
            inner: Box::new(type_expr(inner)),
        },
        Type::Slice(elem) => TypeExpr::Slice {
            elem: Box::new(type_expr(elem)),
        },
        Type::Array(elem) => {
            debug!("Rendering fixed-length array as a slice");
            TypeExpr::Slice {
                elem: Box::new(type_expr(elem)),
            }
        }
        Type::Map { key, value } => TypeExpr::Map {
            key: Box::new(type_expr(key)),
            value: Box::new(type_expr(value)),
        },
        Type::Interface(_) => TypeExpr::InlineInterface,
        Type::Func(func) => TypeExpr::Function {
            params: signature::parameters(&func.params),
            results: func
                .results
                .as_deref()
                .map(signature::parameters)
                .unwrap_or_default(),
        },
        Type::Chan { dir, .. } => unsupported(match dir {
            ChanDir::Both => "chan",
            ChanDir::Send => "chan<-",
            ChanDir::Recv => "<-chan",
        }),
        Type::Variadic(elem) => {
            let node = format!("...{}", type_expr(elem));
            unsupported(&node)
        }
        Type::Struct(_) => unsupported("struct"),
        Type::Generic { base, args } => {
            let args = args
                .iter()
                .map(|a| type_expr(a).to_string())
                .collect::<Vec<_>>();
            let node = format!("{}[{}]", type_expr(base), args.join(", "));
            unsupported(&node)
        }
        Type::Paren(inner) => {
            let node = format!("({})", type_expr(inner));
            unsupported(&node)
        }
    }
}

fn unsupported(node: &str) -> TypeExpr {
    warn!("No rendering for `{}` type, leaving it empty", node);
    TypeExpr::Unsupported {
        node: node.to_string(),
    }
}

/// Joins parameters the way they appear between parentheses.
pub fn join(params: &[Parameter]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name } => f.write_str(name),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            // The mock casts through the recorded value, so the `*` is dropped
            TypeExpr::Pointer { inner } => write!(f, "{}", inner),
            TypeExpr::Slice { elem } => write!(f, "[]{}", elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::InlineInterface => f.write_str("interface{}"),
            TypeExpr::Function { params, results } => {
                write!(f, "func({})", join(params))?;
                if !results.is_empty() {
                    write!(f, "({})", join(results))?;
                }
                Ok(())
            }
            TypeExpr::Unsupported { .. } => Ok(()),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", name, self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}
