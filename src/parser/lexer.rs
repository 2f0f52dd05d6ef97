use crate::error::{LexError, LexErrorKind, Span};
use logos::{Lexer as LogosLexer, Logos};

#[inline]
fn lex_block_comment(lex: &mut LogosLexer<'_, Tok>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder();
    match rem.find("*/") {
        Some(pos) => {
            lex.bump(pos + 2);
            Ok(())
        }
        None => {
            lex.bump(rem.len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Go tokens. Number literals are lexed loosely: their values are never
/// interpreted, they only need to be skipped over as a single token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\f]+")]
#[rustfmt::skip]
pub enum Tok {
    #[token("\u{FEFF}")] Bom,

    // Trivia, never yielded by `Lexer`
    #[regex(r"\r\n|\n|\r")] Newline,
    #[regex(r"//[^\n\r]*", logos::skip)] _LineComment,
    #[token("/*", lex_block_comment)] BlockComment,

    #[token("break")] KwBreak,
    #[token("case")] KwCase,
    #[token("chan")] KwChan,
    #[token("const")] KwConst,
    #[token("continue")] KwContinue,
    #[token("default")] KwDefault,
    #[token("defer")] KwDefer,
    #[token("else")] KwElse,
    #[token("fallthrough")] KwFallthrough,
    #[token("for")] KwFor,
    #[token("func")] KwFunc,
    #[token("go")] KwGo,
    #[token("goto")] KwGoto,
    #[token("if")] KwIf,
    #[token("import")] KwImport,
    #[token("interface")] KwInterface,
    #[token("map")] KwMap,
    #[token("package")] KwPackage,
    #[token("range")] KwRange,
    #[token("return")] KwReturn,
    #[token("select")] KwSelect,
    #[token("struct")] KwStruct,
    #[token("switch")] KwSwitch,
    #[token("type")] KwType,
    #[token("var")] KwVar,

    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Ident,
    #[regex(r"[0-9][0-9a-zA-Z_.]*|\.[0-9][0-9a-zA-Z_]*")] Number,
    #[regex(r"`[^`]*`")] RawString,
    #[regex(r#""([^"\\\n\r]|\\.)*""#)] String,
    #[regex(r"'([^'\\\n\r]|\\.)+'")] Rune,

    #[token("...")] Ellipsis,
    #[token("<<=")] ShlAssign,
    #[token(">>=")] ShrAssign,
    #[token("&^=")] AndNotAssign,
    #[token("+=")] AddAssign,
    #[token("-=")] SubAssign,
    #[token("*=")] MulAssign,
    #[token("/=")] DivAssign,
    #[token("%=")] ModAssign,
    #[token("&=")] AndAssign,
    #[token("|=")] OrAssign,
    #[token("^=")] XorAssign,
    #[token("<<")] Shl,
    #[token(">>")] Shr,
    #[token("&^")] AndNot,
    #[token("&&")] LAnd,
    #[token("||")] LOr,
    #[token("==")] EqEq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("++")] Inc,
    #[token("--")] Dec,
    #[token(":=")] Define,
    #[token("<-")] Arrow,
    #[token("=")] Assign,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("^")] Caret,
    #[token("~")] Tilde,
    #[token("!")] Bang,
    #[token("<")] Lt,
    #[token(">")] Gt,

    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token(":")] Colon,
    #[token(".")] Dot,

    /// End of input; produced by the parser, never by the lexer.
    Eof,
}

impl Tok {
    /// Whether a line ending right after this token gets an implicit `;`.
    #[inline]
    const fn can_insert_semicolon(self) -> bool {
        matches!(
            self,
            Tok::Ident
                | Tok::Number
                | Tok::RawString
                | Tok::String
                | Tok::Rune
                | Tok::KwBreak
                | Tok::KwContinue
                | Tok::KwFallthrough
                | Tok::KwReturn
                | Tok::Inc
                | Tok::Dec
                | Tok::RParen
                | Tok::RBrack
                | Tok::RBrace
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub tok: Tok,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Inserted semicolons have an empty span and no text.
    fn implicit_semi(pos: usize) -> Self {
        Self {
            tok: Tok::Semi,
            text: "",
            span: Span::new(pos, pos),
        }
    }
}

/// Wraps the logos lexer with Go's automatic semicolon insertion.
pub struct Lexer<'src> {
    logos: LogosLexer<'src, Tok>,
    pending: Option<Token<'src>>,
    last_can_insert_semi: bool,
    src_len: usize,
    eof_done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            logos: Tok::lexer(input),
            pending: None,
            last_can_insert_semi: false,
            src_len: input.len(),
            eof_done: false,
        }
    }

    #[inline]
    fn emit_semi_at(&mut self, pos: usize) {
        self.pending = Some(Token::implicit_semi(pos));
    }

    /// Handles newlines and block comments. Returns true when the token was trivia.
    fn handle_trivia(&mut self, tok: Tok, span: &Span, slice: &str) -> bool {
        match tok {
            Tok::Newline => {
                if self.last_can_insert_semi {
                    self.last_can_insert_semi = false;
                    self.emit_semi_at(span.start);
                }
                true
            }
            Tok::BlockComment => {
                if self.last_can_insert_semi {
                    if let Some(off) = slice.find(['\n', '\r']) {
                        self.last_can_insert_semi = false;
                        self.emit_semi_at(span.start + off);
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.take() {
                return Some(Ok(tok));
            }

            if self.eof_done {
                return None;
            }

            match self.logos.next() {
                None => {
                    self.eof_done = true;
                    if self.last_can_insert_semi {
                        self.last_can_insert_semi = false;
                        self.emit_semi_at(self.src_len);
                    }
                }
                Some(Err(kind)) => {
                    self.last_can_insert_semi = false;
                    return Some(Err(LexError {
                        kind,
                        span: Span::from_range(self.logos.span()),
                    }));
                }
                Some(Ok(tok)) => {
                    let span = Span::from_range(self.logos.span());
                    let slice = self.logos.slice();

                    if tok == Tok::Bom {
                        if span.start == 0 {
                            continue;
                        }
                        return Some(Err(LexError {
                            kind: LexErrorKind::InvalidToken,
                            span,
                        }));
                    }

                    if self.handle_trivia(tok, &span, slice) {
                        continue;
                    }

                    self.last_can_insert_semi = tok.can_insert_semicolon();
                    return Some(Ok(Token {
                        tok,
                        text: slice,
                        span,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Tok> {
        Lexer::new(input)
            .map(|t| t.expect("lex ok").tok)
            .collect()
    }

    fn injected_semis(input: &str) -> Vec<usize> {
        Lexer::new(input)
            .filter_map(|t| {
                let t = t.expect("lex ok");
                (t.tok == Tok::Semi && t.text.is_empty()).then_some(t.span.start)
            })
            .collect()
    }

    #[test]
    fn keywords_and_idents() {
        assert_eq!(
            kinds("type bidule interface"),
            vec![Tok::KwType, Tok::Ident, Tok::KwInterface]
        );
    }

    #[test]
    fn unicode_identifier() {
        let toks: Vec<_> = Lexer::new("héllo").map(|t| t.unwrap()).collect();
        assert_eq!(toks[0].tok, Tok::Ident);
        assert_eq!(toks[0].text, "héllo");
    }

    #[test]
    fn semicolon_after_ident_at_newline() {
        assert_eq!(injected_semis("a\nb\n"), vec![1, 3]);
    }

    #[test]
    fn no_semicolon_after_operator_or_open_brace() {
        assert_eq!(injected_semis("interface {\n"), Vec::<usize>::new());
        assert_eq!(injected_semis("a,\nb"), vec![4]);
    }

    #[test]
    fn semicolon_after_closing_paren_and_at_eof() {
        assert_eq!(injected_semis("M() (string, error)"), vec![19]);
    }

    #[test]
    fn line_comment_is_skipped_but_newline_still_counts() {
        assert_eq!(
            kinds("x // trailing\ny"),
            vec![Tok::Ident, Tok::Semi, Tok::Ident, Tok::Semi]
        );
    }

    #[test]
    fn multiline_block_comment_acts_as_newline() {
        assert_eq!(
            kinds("x /* a\nb */ y"),
            vec![Tok::Ident, Tok::Semi, Tok::Ident, Tok::Semi]
        );
        assert_eq!(kinds("x /* a */ y"), vec![Tok::Ident, Tok::Ident, Tok::Semi]);
    }

    #[test]
    fn literals() {
        assert_eq!(
            kinds(r#"0x1F "s\"x" `raw` 'c'"#),
            vec![Tok::Number, Tok::String, Tok::RawString, Tok::Rune, Tok::Semi]
        );
    }

    #[test]
    fn multi_char_operators() {
        assert_eq!(
            kinds("... <- := &^="),
            vec![Tok::Ellipsis, Tok::Arrow, Tok::Define, Tok::AndNotAssign]
        );
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let err = Lexer::new("a /* never closed")
            .find_map(|t| t.err())
            .expect("lex error");
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    }

    #[test]
    fn stray_character_is_an_error() {
        let err = Lexer::new("a @ b").find_map(|t| t.err()).expect("lex error");
        assert_eq!(err.kind, LexErrorKind::InvalidToken);
        assert_eq!(err.span, Span::new(2, 3));
    }
}
