//! Syntax tree for the subset of Go the generator accepts: type declarations
//! and the type expressions inside them. Other top-level declarations are
//! recorded by kind only.

use crate::error::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: Ident,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Type(Vec<TypeSpec>),
    /// `import`, `const`, `var` or `func`, skipped without being parsed.
    Other(DeclKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Const,
    Var,
    Func,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    /// Whether the declaration had a `[T any]` parameter list, which is skipped.
    pub type_params: bool,
    pub alias: bool,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Name(Ident),
    Qualified { pkg: Ident, name: Ident },
    Pointer(Box<Type>),
    Slice(Box<Type>),
    /// `[N]T` or `[...]T`; the length expression is not kept.
    Array(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Func(FuncType),
    Interface(InterfaceType),
    Struct(StructType),
    /// `...T`, only valid as the last parameter type.
    Variadic(Box<Type>),
    /// Instantiated generic type, `Name[A, B]`.
    Generic { base: Box<Type>, args: Vec<Type> },
    /// `(T)`
    Paren(Box<Type>),
}

/// One entry of a parameter, result or struct field list. `names` is empty
/// for unnamed parameters and embedded fields. Struct tags are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Type,
}

impl Field {
    pub fn unnamed(ty: Type) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: Vec<Field>,
    /// `None` when the signature declares no result at all.
    pub results: Option<Vec<Field>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem {
    Method { name: Ident, sig: FuncType },
    /// Embedded interface or type-set union (`io.Reader`, `~int | string`).
    Embedded(Vec<Type>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceType {
    pub elems: Vec<InterfaceElem>,
}

impl InterfaceType {
    pub fn methods(&self) -> impl Iterator<Item = (&Ident, &FuncType)> {
        self.elems.iter().filter_map(|e| match e {
            InterfaceElem::Method { name, sig } => Some((name, sig)),
            InterfaceElem::Embedded(_) => None,
        })
    }

    pub fn embedded(&self) -> impl Iterator<Item = &[Type]> {
        self.elems.iter().filter_map(|e| match e {
            InterfaceElem::Embedded(terms) => Some(terms.as_slice()),
            InterfaceElem::Method { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructType {
    pub fields: Vec<Field>,
}
