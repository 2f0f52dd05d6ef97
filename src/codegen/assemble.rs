use crate::codegen::namer;
use crate::models::{InterfaceDecl, MethodSignature, Parameter};

/// One mock struct, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBlock {
    pub name: String,
    pub methods: Vec<MockMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMethod {
    pub name: String,
    /// Parameter list as written between the parentheses.
    pub params: String,
    /// Result list as written between the parentheses, empty without results.
    pub results: String,
    /// Call-recording statement forwarding every argument in order.
    pub call: String,
    /// One `args.Get(i).(T)` per declared result.
    pub returns: Vec<String>,
}

pub fn assemble(decl: &InterfaceDecl) -> MockBlock {
    MockBlock {
        name: decl.mock_name.clone(),
        methods: decl.methods.iter().map(assemble_method).collect(),
    }
}

fn assemble_method(sig: &MethodSignature) -> MockMethod {
    let args = sig
        .params
        .iter()
        .map(Parameter::call_site_name)
        .collect::<Vec<_>>();

    let returns = sig
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("args.Get({}).({})", i, result.bare_type()))
        .collect();

    MockMethod {
        name: sig.name.clone(),
        params: namer::join(&sig.params),
        results: namer::join(&sig.results),
        call: format!("m.Called({})", args.join(", ")),
        returns,
    }
}
