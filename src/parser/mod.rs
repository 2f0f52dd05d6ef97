//! Declaration parser: turns a fragment of Go type declarations into a
//! syntax tree and picks out the interfaces to mock.

pub mod ast;
pub mod lexer;

use log::{debug, warn};

use crate::error::{LexError, ParseError, Span};
use ast::{
    ChanDir, Decl, DeclKind, Field, File, FuncType, Ident, InterfaceElem, InterfaceType, StructType,
    Type, TypeSpec,
};
use lexer::{Lexer, Tok, Token};

/// Header that turns a bare declaration fragment into a parseable file.
const WRAPPER: &str = "package main\n";

/// Parses `input` as the body of a Go file.
pub fn parse_fragment(input: &str) -> Result<File, ParseError> {
    let source = format!("{}{}", WRAPPER, input);
    let mut parser = Parser::new(&source, WRAPPER.len())?;
    parser.parse_file()
}

/// An interface discovered in a file, with the name its mock will carry.
#[derive(Debug, Clone, Copy)]
pub struct FoundInterface<'a> {
    /// Type name, or field name for interfaces declared inside a struct.
    pub source_name: &'a str,
    pub iface: &'a InterfaceType,
}

impl<'a> FoundInterface<'a> {
    pub fn mock_name(&self) -> String {
        format!("{}Mock", self.source_name)
    }
}

/// Walks top-level type declarations in order, selecting named interfaces
/// and inline interface fields of structs.
pub fn interfaces(file: &File) -> Vec<FoundInterface<'_>> {
    let mut found = Vec::new();
    for decl in &file.decls {
        let specs = match decl {
            Decl::Type(specs) => specs,
            Decl::Other(kind) => {
                debug!("Ignoring {:?} declaration", kind);
                continue;
            }
        };

        for spec in specs {
            match &spec.ty {
                Type::Interface(iface) => {
                    debug!("Found interface {} (alias: {})", spec.name.name, spec.alias);
                    if spec.type_params {
                        warn!(
                            "{}: type parameters are not carried over to its mock",
                            spec.name.name
                        );
                    }
                    found.push(FoundInterface {
                        source_name: &spec.name.name,
                        iface,
                    });
                }
                Type::Struct(st) => {
                    for field in &st.fields {
                        if let Type::Interface(iface) = &field.ty {
                            for name in &field.names {
                                debug!("Found interface field {}.{}", spec.name.name, name.name);
                                found.push(FoundInterface {
                                    source_name: &name.name,
                                    iface,
                                });
                            }
                        }
                    }
                }
                _ => debug!("Ignoring type {}", spec.name.name),
            }
        }
    }
    found
}

/// Entry of a parameter list before Go's grouping rule is applied.
struct ParamEntry {
    name: Option<Ident>,
    ty: Option<Type>,
    start: usize,
}

struct Parser<'src> {
    source: &'src str,
    /// Length of the synthesized header, subtracted from error positions.
    offset: usize,
    lexer: Lexer<'src>,
    lookahead: Token<'src>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, offset: usize) -> Result<Self, ParseError> {
        let mut parser = Self {
            source,
            offset,
            lexer: Lexer::new(source),
            lookahead: Token {
                tok: Tok::Eof,
                text: "",
                span: Span::new(source.len(), source.len()),
            },
        };
        parser.bump()?;
        Ok(parser)
    }

    fn parse_file(&mut self) -> Result<File, ParseError> {
        self.expect(Tok::KwPackage)?;
        let package = self.expect_ident()?;
        self.expect_semi()?;

        let mut decls = Vec::new();
        while self.at(Tok::Semi) {
            self.bump()?;
        }
        while !self.at(Tok::Eof) {
            decls.push(self.parse_decl()?);
        }
        Ok(File { package, decls })
    }

    fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        let kind = match self.lookahead.tok {
            Tok::KwType => return self.parse_type_decl(),
            Tok::KwImport => DeclKind::Import,
            Tok::KwConst => DeclKind::Const,
            Tok::KwVar => DeclKind::Var,
            Tok::KwFunc => DeclKind::Func,
            _ => return Err(self.error_here("expected declaration")),
        };
        self.skip_decl()?;
        Ok(Decl::Other(kind))
    }

    fn parse_type_decl(&mut self) -> Result<Decl, ParseError> {
        self.expect(Tok::KwType)?;
        let mut specs = Vec::new();
        if self.at(Tok::LParen) {
            self.bump()?;
            while !self.at(Tok::RParen) {
                specs.push(self.parse_type_spec()?);
                self.expect_semi()?;
            }
            self.expect(Tok::RParen)?;
        } else {
            specs.push(self.parse_type_spec()?);
        }
        self.expect_semi()?;
        Ok(Decl::Type(specs))
    }

    fn parse_type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        let name = self.expect_ident()?;
        let mut type_params = false;
        if self.at(Tok::LBrack) {
            if let Some(ty) = self.parse_type_params_or_array()? {
                return Ok(TypeSpec {
                    name,
                    type_params,
                    alias: false,
                    ty,
                });
            }
            type_params = true;
        }
        let alias = self.at(Tok::Assign);
        if alias {
            self.bump()?;
        }
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            name,
            type_params,
            alias,
            ty,
        })
    }

    /// Resolves `type Name [...`. A type parameter list is skipped through
    /// its `]` and `None` returned; an array or slice type is parsed whole.
    fn parse_type_params_or_array(&mut self) -> Result<Option<Type>, ParseError> {
        self.expect(Tok::LBrack)?;
        if self.at(Tok::RBrack) {
            self.bump()?;
            return Ok(Some(Type::Slice(Box::new(self.parse_type()?))));
        }
        if self.at(Tok::Ident) {
            self.bump()?;
            if matches!(
                self.lookahead.tok,
                Tok::Ident
                    | Tok::Comma
                    | Tok::Tilde
                    | Tok::KwInterface
                    | Tok::KwMap
                    | Tok::KwFunc
                    | Tok::KwChan
                    | Tok::KwStruct
                    | Tok::Arrow
            ) {
                self.skip_type_params()?;
                return Ok(None);
            }
        }
        self.skip_array_len()?;
        self.expect(Tok::RBrack)?;
        Ok(Some(Type::Array(Box::new(self.parse_type()?))))
    }

    /// Skips the rest of a type parameter list, constraints included.
    fn skip_type_params(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.lookahead.tok {
                Tok::RBrack if depth == 0 => {
                    self.bump()?;
                    return Ok(());
                }
                Tok::LBrack | Tok::LParen | Tok::LBrace => depth += 1,
                Tok::RBrack | Tok::RParen | Tok::RBrace => depth = depth.saturating_sub(1),
                Tok::Eof => return Err(self.error_here("expected ]")),
                _ => {}
            }
            self.bump()?;
        }
    }

    /// Skips a declaration the generator does not model, checking that
    /// brackets are balanced up to the terminating `;`.
    fn skip_decl(&mut self) -> Result<(), ParseError> {
        let mut open: Vec<Tok> = Vec::new();
        loop {
            let tok = self.lookahead.tok;
            match tok {
                Tok::Eof if open.is_empty() => return Ok(()),
                Tok::Eof => return Err(self.error_here("unexpected end of input")),
                Tok::Semi if open.is_empty() => {
                    self.bump()?;
                    return Ok(());
                }
                Tok::LParen | Tok::LBrack | Tok::LBrace => open.push(tok),
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    let expected = match open.pop() {
                        Some(Tok::LParen) => Tok::RParen,
                        Some(Tok::LBrack) => Tok::RBrack,
                        Some(_) => Tok::RBrace,
                        None => return Err(self.error_here("unbalanced bracket")),
                    };
                    if tok != expected {
                        return Err(self.error_here("mismatched bracket"));
                    }
                }
                _ => {}
            }
            self.bump()?;
        }
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        match self.lookahead.tok {
            Tok::Ident => self.parse_type_name(),
            Tok::Star => {
                self.bump()?;
                Ok(Type::Pointer(Box::new(self.parse_type()?)))
            }
            Tok::LBrack => {
                self.bump()?;
                if self.at(Tok::RBrack) {
                    self.bump()?;
                    return Ok(Type::Slice(Box::new(self.parse_type()?)));
                }
                self.skip_array_len()?;
                self.expect(Tok::RBrack)?;
                Ok(Type::Array(Box::new(self.parse_type()?)))
            }
            Tok::KwMap => {
                self.bump()?;
                self.expect(Tok::LBrack)?;
                let key = self.parse_type()?;
                self.expect(Tok::RBrack)?;
                let value = self.parse_type()?;
                Ok(Type::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Tok::KwChan => {
                self.bump()?;
                let dir = if self.at(Tok::Arrow) {
                    self.bump()?;
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = Box::new(self.parse_type()?);
                Ok(Type::Chan { dir, elem })
            }
            Tok::Arrow => {
                self.bump()?;
                self.expect(Tok::KwChan)?;
                let elem = Box::new(self.parse_type()?);
                Ok(Type::Chan {
                    dir: ChanDir::Recv,
                    elem,
                })
            }
            Tok::KwFunc => {
                self.bump()?;
                Ok(Type::Func(self.parse_signature()?))
            }
            Tok::KwInterface => Ok(Type::Interface(self.parse_interface_type()?)),
            Tok::KwStruct => Ok(Type::Struct(self.parse_struct_type()?)),
            Tok::LParen => {
                self.bump()?;
                let ty = self.parse_type()?;
                self.expect(Tok::RParen)?;
                Ok(Type::Paren(Box::new(ty)))
            }
            _ => Err(self.error_here("expected type")),
        }
    }

    fn parse_type_name(&mut self) -> Result<Type, ParseError> {
        let first = self.expect_ident()?;
        self.finish_type_name(first)
    }

    /// Completes a type name whose first identifier was already consumed,
    /// including any type arguments.
    fn finish_type_name(&mut self, first: Ident) -> Result<Type, ParseError> {
        let base = if self.at(Tok::Dot) {
            self.bump()?;
            let name = self.expect_ident()?;
            Type::Qualified { pkg: first, name }
        } else {
            Type::Name(first)
        };
        if !self.at(Tok::LBrack) {
            return Ok(base);
        }
        self.bump()?;
        let mut args = vec![self.parse_type()?];
        while self.at(Tok::Comma) {
            self.bump()?;
            if self.at(Tok::RBrack) {
                break;
            }
            args.push(self.parse_type()?);
        }
        self.expect(Tok::RBrack)?;
        Ok(Type::Generic {
            base: Box::new(base),
            args,
        })
    }

    /// Resolves `ident [...` in a parameter or field list. Like Go, this
    /// is a named array or slice when a type follows the `]`, and an
    /// instantiated generic type otherwise.
    fn parse_name_or_instance(
        &mut self,
        ident: Ident,
    ) -> Result<(Option<Ident>, Type), ParseError> {
        self.expect(Tok::LBrack)?;
        if self.at(Tok::RBrack) {
            self.bump()?;
            return Ok((Some(ident), Type::Slice(Box::new(self.parse_type()?))));
        }
        let args = self.parse_index()?;
        if self.can_start_type() {
            return Ok((Some(ident), Type::Array(Box::new(self.parse_type()?))));
        }
        match args {
            Some(args) => Ok((
                None,
                Type::Generic {
                    base: Box::new(Type::Name(ident)),
                    args,
                },
            )),
            None => Err(self.error_here("expected array element type")),
        }
    }

    /// Parses the inside of `[...]` through the `]`. Returns the type list
    /// when it reads as one, `None` for an array length expression.
    fn parse_index(&mut self) -> Result<Option<Vec<Type>>, ParseError> {
        if !matches!(self.lookahead.tok, Tok::Number | Tok::Ellipsis) {
            let mut args = Vec::new();
            loop {
                if !self.can_start_type() {
                    break;
                }
                args.push(self.parse_type()?);
                match self.lookahead.tok {
                    Tok::Comma => {
                        self.bump()?;
                        if self.at(Tok::RBrack) {
                            self.bump()?;
                            return Ok(Some(args));
                        }
                    }
                    Tok::RBrack => {
                        self.bump()?;
                        return Ok(Some(args));
                    }
                    _ => break,
                }
            }
        }
        self.skip_array_len()?;
        self.expect(Tok::RBrack)?;
        Ok(None)
    }

    /// Skips the length expression of `[N]T`, up to the closing `]`.
    fn skip_array_len(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.lookahead.tok {
                Tok::RBrack if depth == 0 => return Ok(()),
                Tok::LBrack | Tok::LParen => depth += 1,
                Tok::RBrack | Tok::RParen => depth = depth.saturating_sub(1),
                Tok::Eof | Tok::Semi | Tok::LBrace | Tok::RBrace => {
                    return Err(self.error_here("expected ]"));
                }
                _ => {}
            }
            self.bump()?;
        }
    }

    fn parse_signature(&mut self) -> Result<FuncType, ParseError> {
        let params = self.parse_parameters()?;
        let results = if self.at(Tok::LParen) {
            Some(self.parse_parameters()?)
        } else if self.can_start_type() {
            Some(vec![Field::unnamed(self.parse_type()?)])
        } else {
            None
        };
        Ok(FuncType { params, results })
    }

    fn parse_parameters(&mut self) -> Result<Vec<Field>, ParseError> {
        self.expect(Tok::LParen)?;
        let mut entries = Vec::new();
        while !self.at(Tok::RParen) {
            entries.push(self.parse_param_entry()?);
            if !self.at(Tok::Comma) {
                break;
            }
            self.bump()?;
        }
        self.expect(Tok::RParen)?;
        self.resolve_param_list(entries)
    }

    fn parse_param_entry(&mut self) -> Result<ParamEntry, ParseError> {
        let start = self.lookahead.span.start;
        if !self.at(Tok::Ident) {
            let ty = self.parse_param_type()?;
            return Ok(ParamEntry {
                name: None,
                ty: Some(ty),
                start,
            });
        }

        let ident = self.expect_ident()?;
        match self.lookahead.tok {
            Tok::Dot => Ok(ParamEntry {
                name: None,
                ty: Some(self.finish_type_name(ident)?),
                start,
            }),
            Tok::Comma | Tok::RParen => Ok(ParamEntry {
                name: Some(ident),
                ty: None,
                start,
            }),
            Tok::LBrack => {
                let (name, ty) = self.parse_name_or_instance(ident)?;
                Ok(ParamEntry {
                    name,
                    ty: Some(ty),
                    start,
                })
            }
            _ if self.at(Tok::Ellipsis) || self.can_start_type() => Ok(ParamEntry {
                name: Some(ident),
                ty: Some(self.parse_param_type()?),
                start,
            }),
            _ => Err(self.error_here("expected , or )")),
        }
    }

    fn parse_param_type(&mut self) -> Result<Type, ParseError> {
        if self.at(Tok::Ellipsis) {
            self.bump()?;
            return Ok(Type::Variadic(Box::new(self.parse_type()?)));
        }
        self.parse_type()
    }

    /// Applies Go's grouping rule: when any entry is `name Type`, every
    /// entry is named and lone identifiers take the next entry's type;
    /// otherwise every entry, including lone identifiers, is a type.
    fn resolve_param_list(&self, entries: Vec<ParamEntry>) -> Result<Vec<Field>, ParseError> {
        let named = entries.iter().any(|e| e.name.is_some() && e.ty.is_some());
        if !named {
            return Ok(entries
                .into_iter()
                .filter_map(|e| match (e.name, e.ty) {
                    (_, Some(ty)) => Some(Field::unnamed(ty)),
                    (Some(name), None) => Some(Field::unnamed(Type::Name(name))),
                    (None, None) => None,
                })
                .collect());
        }

        let mut out = Vec::new();
        let mut pending: Vec<Ident> = Vec::new();
        for entry in entries {
            match (entry.name, entry.ty) {
                (Some(name), None) => pending.push(name),
                (Some(name), Some(ty)) => {
                    let mut names = std::mem::take(&mut pending);
                    names.push(name);
                    out.push(Field { names, ty });
                }
                (None, _) => {
                    return Err(self.error_at(entry.start, "mixed named and unnamed parameters"));
                }
            }
        }
        if let Some(first) = pending.first() {
            return Err(self.error_at(first.span.start, "mixed named and unnamed parameters"));
        }
        Ok(out)
    }

    fn parse_interface_type(&mut self) -> Result<InterfaceType, ParseError> {
        self.expect(Tok::KwInterface)?;
        self.expect(Tok::LBrace)?;
        let mut elems = Vec::new();
        while !self.at(Tok::RBrace) {
            elems.push(self.parse_interface_elem()?);
            self.expect_semi()?;
        }
        self.expect(Tok::RBrace)?;
        Ok(InterfaceType { elems })
    }

    fn parse_interface_elem(&mut self) -> Result<InterfaceElem, ParseError> {
        let first = if self.at(Tok::Ident) {
            let ident = self.expect_ident()?;
            if self.at(Tok::LParen) {
                let sig = self.parse_signature()?;
                return Ok(InterfaceElem::Method { name: ident, sig });
            }
            self.finish_type_name(ident)?
        } else {
            self.parse_union_term()?
        };

        let mut terms = vec![first];
        while self.at(Tok::Pipe) {
            self.bump()?;
            terms.push(self.parse_union_term()?);
        }
        Ok(InterfaceElem::Embedded(terms))
    }

    fn parse_union_term(&mut self) -> Result<Type, ParseError> {
        if self.at(Tok::Tilde) {
            self.bump()?;
        }
        self.parse_type()
    }

    fn parse_struct_type(&mut self) -> Result<StructType, ParseError> {
        self.expect(Tok::KwStruct)?;
        self.expect(Tok::LBrace)?;
        let mut fields = Vec::new();
        while !self.at(Tok::RBrace) {
            fields.push(self.parse_field_decl()?);
            self.expect_semi()?;
        }
        self.expect(Tok::RBrace)?;
        Ok(StructType { fields })
    }

    fn parse_field_decl(&mut self) -> Result<Field, ParseError> {
        let field = match self.lookahead.tok {
            Tok::Star => {
                self.bump()?;
                Field::unnamed(Type::Pointer(Box::new(self.parse_type_name()?)))
            }
            Tok::Ident => {
                let first = self.expect_ident()?;
                match self.lookahead.tok {
                    Tok::Dot | Tok::Semi | Tok::RBrace | Tok::String | Tok::RawString => {
                        Field::unnamed(self.finish_type_name(first)?)
                    }
                    Tok::LBrack => match self.parse_name_or_instance(first)? {
                        (Some(name), ty) => Field {
                            names: vec![name],
                            ty,
                        },
                        (None, ty) => Field::unnamed(ty),
                    },
                    _ => {
                        let mut names = vec![first];
                        while self.at(Tok::Comma) {
                            self.bump()?;
                            names.push(self.expect_ident()?);
                        }
                        let ty = self.parse_type()?;
                        Field { names, ty }
                    }
                }
            }
            _ => return Err(self.error_here("expected field name or embedded type")),
        };

        if matches!(self.lookahead.tok, Tok::String | Tok::RawString) {
            self.bump()?;
        }
        Ok(field)
    }

    fn can_start_type(&self) -> bool {
        matches!(
            self.lookahead.tok,
            Tok::Ident
                | Tok::Star
                | Tok::LBrack
                | Tok::KwMap
                | Tok::KwChan
                | Tok::KwFunc
                | Tok::KwInterface
                | Tok::KwStruct
                | Tok::Arrow
                | Tok::LParen
        )
    }

    #[inline]
    fn at(&self, tok: Tok) -> bool {
        self.lookahead.tok == tok
    }

    /// A `;` is optional before a closing `)` or `}` and at end of input.
    fn expect_semi(&mut self) -> Result<(), ParseError> {
        match self.lookahead.tok {
            Tok::Semi => {
                self.bump()?;
                Ok(())
            }
            Tok::RParen | Tok::RBrace | Tok::Eof => Ok(()),
            _ => Err(self.error_here("expected ; or newline")),
        }
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        if !self.at(Tok::Ident) {
            return Err(self.error_here("expected identifier"));
        }
        let tok = self.bump()?;
        Ok(Ident {
            name: tok.text.to_string(),
            span: tok.span,
        })
    }

    fn expect(&mut self, expected: Tok) -> Result<Token<'src>, ParseError> {
        if self.at(expected) {
            return self.bump();
        }
        Err(self.error_here(format!("expected {:?}", expected)))
    }

    fn bump(&mut self) -> Result<Token<'src>, ParseError> {
        let next = match self.lexer.next() {
            Some(Ok(tok)) => tok,
            Some(Err(err)) => return Err(self.lex_error(err)),
            None => Token {
                tok: Tok::Eof,
                text: "",
                span: Span::new(self.source.len(), self.source.len()),
            },
        };
        Ok(std::mem::replace(&mut self.lookahead, next))
    }

    fn lex_error(&self, err: LexError) -> ParseError {
        self.error_at(err.span.start, err.kind.to_string())
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let message = message.into();
        let found = match self.lookahead.tok {
            Tok::Eof => "end of input".to_string(),
            Tok::Semi if self.lookahead.text.is_empty() => "newline".to_string(),
            _ => format!("{:?}", self.lookahead.text),
        };
        self.error_at(self.lookahead.span.start, format!("{}, found {}", message, found))
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ParseError {
        let input = &self.source[self.offset..];
        ParseError::at(input, pos.saturating_sub(self.offset), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_spec(input: &str) -> TypeSpec {
        let file = parse_fragment(input).expect("parse ok");
        match file.decls.into_iter().next() {
            Some(Decl::Type(mut specs)) => specs.remove(0),
            other => panic!("expected a type declaration, got {:?}", other),
        }
    }

    fn method_sig(input: &str) -> FuncType {
        match type_spec(input).ty {
            Type::Interface(iface) => iface.methods().next().expect("one method").1.clone(),
            other => panic!("expected interface, got {:?}", other),
        }
    }

    fn names(field: &Field) -> Vec<&str> {
        field.names.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn wraps_fragment_in_package() {
        let file = parse_fragment("type a interface{}").unwrap();
        assert_eq!(file.package.name, "main");
        assert_eq!(file.decls.len(), 1);
    }

    #[test]
    fn grouped_parameter_names_share_type() {
        let sig = method_sig("type t interface { M(arg1, arg2 int) }");
        assert_eq!(sig.params.len(), 1);
        assert_eq!(names(&sig.params[0]), vec!["arg1", "arg2"]);
        assert!(sig.results.is_none());
    }

    #[test]
    fn lone_identifiers_are_types_when_nothing_is_named() {
        let sig = method_sig("type t interface { M(string, int) error }");
        assert_eq!(sig.params.len(), 2);
        assert!(sig.params.iter().all(|f| f.names.is_empty()));
        assert!(matches!(&sig.params[0].ty, Type::Name(n) if n.name == "string"));
        let results = sig.results.unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0].ty, Type::Name(n) if n.name == "error"));
    }

    #[test]
    fn qualified_unnamed_parameter() {
        let sig = method_sig("type t interface { M(context.Context, *foo.Bar) }");
        assert!(matches!(&sig.params[0].ty, Type::Qualified { pkg, name } if pkg.name == "context" && name.name == "Context"));
        assert!(matches!(&sig.params[1].ty, Type::Pointer(_)));
    }

    #[test]
    fn named_results() {
        let sig = method_sig("type t interface { M() (ret1 string, err error) }");
        let results = sig.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(names(&results[0]), vec!["ret1"]);
        assert_eq!(names(&results[1]), vec!["err"]);
    }

    #[test]
    fn mixed_named_and_unnamed_is_an_error() {
        let err = parse_fragment("type t interface { M(a int, string) }").unwrap_err();
        assert!(err.message.contains("mixed named and unnamed"), "{}", err);
    }

    #[test]
    fn composite_parameter_types() {
        let sig = method_sig(
            "type t interface { M(a []string, b map[string]*pkg.T, c func(int) error, d ...int, e chan<- int, f [4]byte) }",
        );
        let tys: Vec<_> = sig.params.iter().map(|f| &f.ty).collect();
        assert!(matches!(tys[0], Type::Slice(_)));
        assert!(matches!(tys[1], Type::Map { .. }));
        assert!(matches!(tys[2], Type::Func(FuncType { results: Some(r), .. }) if r.len() == 1));
        assert!(matches!(tys[3], Type::Variadic(_)));
        assert!(matches!(tys[4], Type::Chan { dir: ChanDir::Send, .. }));
        assert!(matches!(tys[5], Type::Array(_)));
    }

    #[test]
    fn func_typed_parameter_without_result() {
        let sig = method_sig("type t interface { M(cb func(), n int) }");
        assert_eq!(sig.params.len(), 2);
        assert!(matches!(&sig.params[0].ty, Type::Func(FuncType { results: None, .. })));
    }

    #[test]
    fn embedded_elements_are_kept_apart_from_methods() {
        let spec = type_spec("type t interface {\n io.Reader\n ~int | string\n Close() error\n}");
        let Type::Interface(iface) = spec.ty else {
            panic!("expected interface");
        };
        assert_eq!(iface.elems.len(), 3);
        let methods: Vec<_> = iface.methods().map(|(n, _)| n.name.as_str()).collect();
        assert_eq!(methods, vec!["Close"]);
    }

    #[test]
    fn struct_fields_with_tags_and_embedding() {
        let spec = type_spec("type s struct {\n *Base\n pkg.Mixin\n a, b int `json:\"a\"`\n svc interface{}\n}");
        let Type::Struct(st) = spec.ty else {
            panic!("expected struct");
        };
        assert_eq!(st.fields.len(), 4);
        assert!(st.fields[0].names.is_empty());
        assert!(st.fields[1].names.is_empty());
        assert_eq!(names(&st.fields[2]), vec!["a", "b"]);
        assert!(matches!(st.fields[3].ty, Type::Interface(_)));
    }

    #[test]
    fn grouped_type_declaration_and_alias() {
        let file = parse_fragment("type (\n a interface{}\n b = interface{ M() }\n)").unwrap();
        let Decl::Type(specs) = &file.decls[0] else {
            panic!("expected type decl");
        };
        assert_eq!(specs.len(), 2);
        assert!(!specs[0].alias);
        assert!(specs[1].alias);
    }

    #[test]
    fn other_declarations_are_skipped() {
        let file = parse_fragment(
            "import \"fmt\"\nconst (\n A = 1\n B = 2\n)\nvar x = []int{1, 2}\nfunc f(a int) int {\n if a > 0 { return a }\n return 0\n}\ntype t interface{}",
        )
        .unwrap();
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|d| match d {
                Decl::Other(k) => Some(*k),
                Decl::Type(_) => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(DeclKind::Import),
                Some(DeclKind::Const),
                Some(DeclKind::Var),
                Some(DeclKind::Func),
                None
            ]
        );
    }

    #[test]
    fn unbalanced_skipped_declaration_is_an_error() {
        assert!(parse_fragment("func f() { )").is_err());
        assert!(parse_fragment("const x = (1").is_err());
    }

    #[test]
    fn error_position_is_relative_to_input() {
        let err = parse_fragment("type t interface {\n  M(\n}").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 1);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_fragment("not go at all").is_err());
        assert!(parse_fragment("type t interface { M() @ }").is_err());
    }

    #[test]
    fn instantiated_generic_parameters_and_results() {
        let sig = method_sig(
            "type r interface { Get(id string, p atomic.Pointer[int]) (Option[int], error) }",
        );
        assert_eq!(sig.params.len(), 2);
        assert!(matches!(
            &sig.params[1].ty,
            Type::Generic { base, args } if matches!(**base, Type::Qualified { .. }) && args.len() == 1
        ));
        let results = sig.results.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|f| f.names.is_empty()));
        assert!(matches!(
            &results[0].ty,
            Type::Generic { base, .. } if matches!(&**base, Type::Name(n) if n.name == "Option")
        ));
    }

    #[test]
    fn bracket_after_parameter_name_is_array_or_instance() {
        let sig = method_sig("type t interface { M(a [N]int, b [4]byte, c []string) }");
        let tys: Vec<_> = sig.params.iter().map(|f| &f.ty).collect();
        assert!(matches!(tys[0], Type::Array(_)));
        assert!(matches!(tys[1], Type::Array(_)));
        assert!(matches!(tys[2], Type::Slice(_)));
        assert_eq!(names(&sig.params[0]), vec!["a"]);

        let sig = method_sig("type t interface { M(Pair[string, int], Set[T,]) }");
        assert!(sig.params.iter().all(|f| f.names.is_empty()));
        assert!(matches!(&sig.params[0].ty, Type::Generic { args, .. } if args.len() == 2));
        assert!(matches!(&sig.params[1].ty, Type::Generic { args, .. } if args.len() == 1));
    }

    #[test]
    fn generic_struct_fields_do_not_hide_interface_fields() {
        let file = parse_fragment(
            "type s struct {\n cache atomic.Pointer[int]\n List[string]\n buf [N]byte\n svc interface{ M() error }\n}",
        )
        .unwrap();
        let Decl::Type(specs) = &file.decls[0] else {
            panic!("expected type decl");
        };
        let Type::Struct(st) = &specs[0].ty else {
            panic!("expected struct");
        };
        assert!(matches!(st.fields[0].ty, Type::Generic { .. }));
        assert!(st.fields[1].names.is_empty());
        assert!(matches!(st.fields[1].ty, Type::Generic { .. }));
        assert_eq!(names(&st.fields[2]), vec!["buf"]);
        assert!(matches!(st.fields[2].ty, Type::Array(_)));
        let found: Vec<_> = interfaces(&file).iter().map(|f| f.mock_name()).collect();
        assert_eq!(found, vec!["svcMock"]);
    }

    #[test]
    fn type_parameter_lists_are_skipped() {
        let spec =
            type_spec("type Repo[T any, K interface{ ~int | ~string }] interface{ Get(k K) T }");
        assert!(spec.type_params);
        assert_eq!(spec.name.name, "Repo");
        assert!(matches!(spec.ty, Type::Interface(_)));

        let spec = type_spec("type Buf [N]byte");
        assert!(!spec.type_params);
        assert!(matches!(spec.ty, Type::Array(_)));
    }

    #[test]
    fn parenthesized_type_is_kept() {
        let spec = type_spec("type t (int)");
        assert!(matches!(spec.ty, Type::Paren(_)));
    }

    #[test]
    fn selects_interfaces_and_interface_fields_in_order() {
        let file = parse_fragment(
            "type a interface{}\ntype n int\ntype s struct {\n x int\n b, c interface{ M() }\n d interface{}\n}\nfunc f() {}\ntype e interface{ N() }",
        )
        .unwrap();
        let found: Vec<_> = interfaces(&file).iter().map(|f| f.mock_name()).collect();
        assert_eq!(found, vec!["aMock", "bMock", "cMock", "dMock", "eMock"]);
    }
}
