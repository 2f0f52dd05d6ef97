use log::{debug, warn};

use crate::codegen::namer;
use crate::models::{InterfaceDecl, MethodSignature, Parameter};
use crate::parser::ast::{Field, FuncType};
use crate::parser::FoundInterface;

/// How parameters declared without a name are forwarded to the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnnamedParams {
    /// The type text doubles as the parameter's name.
    #[default]
    TypeText,
    /// Unnamed parameters are called `arg<i>`, `i` being their position.
    Positional,
}

/// Expands a field list into one parameter per declared name, in order.
/// A field without names yields a single unnamed parameter.
pub fn parameters(fields: &[Field]) -> Vec<Parameter> {
    let mut params = Vec::with_capacity(fields.len());
    for field in fields {
        let ty = namer::type_expr(&field.ty);
        if field.names.is_empty() {
            params.push(Parameter::unnamed(ty));
            continue;
        }
        for name in &field.names {
            params.push(Parameter::named(&name.name, ty.clone()));
        }
    }
    params
}

pub fn method_signature(name: &str, func: &FuncType, unnamed: UnnamedParams) -> MethodSignature {
    let mut params = parameters(&func.params);
    if unnamed == UnnamedParams::Positional {
        for (i, param) in params.iter_mut().enumerate() {
            if param.name.is_none() {
                param.name = Some(format!("arg{}", i));
            }
        }
    }

    let results = func
        .results
        .as_deref()
        .map(parameters)
        .unwrap_or_default();

    MethodSignature {
        name: name.to_string(),
        params,
        results,
    }
}

pub fn interface_decl(found: &FoundInterface<'_>, unnamed: UnnamedParams) -> InterfaceDecl {
    let mock_name = found.mock_name();
    for terms in found.iface.embedded() {
        let terms = terms
            .iter()
            .map(|t| namer::type_expr(t).to_string())
            .collect::<Vec<_>>();
        warn!("{}: not expanding embedded element {}", mock_name, terms.join(" | "));
    }
    let methods = found
        .iface
        .methods()
        .map(|(name, func)| {
            debug!("Extracting {}.{}", mock_name, name.name);
            method_signature(&name.name, func, unnamed)
        })
        .collect();

    InterfaceDecl { mock_name, methods }
}
