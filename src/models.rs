use serde::Serialize;

/// Symbolic type reference. Rendered to text by the type namer
/// (see `codegen::namer`).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Named { name: String },
    Qualified { package: String, name: String },
    Pointer { inner: Box<TypeExpr> },
    Slice { elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    InlineInterface,
    Function { params: Vec<Parameter>, results: Vec<Parameter> },
    /// A node the namer has no rendering for; renders as empty text.
    Unsupported { node: String },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl Parameter {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }

    /// Name forwarded to the call recorder. An unnamed parameter stands in
    /// with its own type text.
    pub fn call_site_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.ty.to_string(),
        }
    }

    /// The type text, ignoring any name.
    pub fn bare_type(&self) -> String {
        self.ty.to_string()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Parameter>,
    pub results: Vec<Parameter>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    #[serde(rename = "mockName")]
    pub mock_name: String,
    pub methods: Vec<MethodSignature>,
}

/// Every interface found in one input, in discovery order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedUnit {
    pub interfaces: Vec<InterfaceDecl>,
}
