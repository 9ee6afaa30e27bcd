//! A lenient scanner for shape declarations in typed-declaration source.
//!
//! Only two statement forms are understood, optionally preceded by `export`
//! or `declare`:
//!
//! ```ts
//! interface Name<T> extends Base, Other<T> { member: Type; other?: Type }
//! type Name<T> = { member: Type } & Base;
//! ```
//!
//! Everything else is skipped up to the end of its statement. The body of a
//! `namespace`, `module` or `global` block is scanned as if it were at the top
//! level, so ambient declaration files work too.
//!
//! Type expressions are classified just far enough for member flattening: an
//! object literal, a (possibly qualified, possibly generic) reference, an
//! intersection of those, or anything else as opaque text.

use std::fmt;

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use crate::{
    error::ParseError,
    lexer::{Token, tokenize},
    span::Span,
};

/// Names that denote built-in types rather than declarations.
const BUILTIN_TYPES: &[&str] = &[
    "any",
    "bigint",
    "boolean",
    "false",
    "never",
    "null",
    "number",
    "object",
    "string",
    "symbol",
    "this",
    "true",
    "undefined",
    "unknown",
    "void",
];

/// Member modifiers that are skipped when they precede a member name.
const MEMBER_MODIFIERS: &[&str] = &["readonly", "get", "set"];

/// The two declaration forms that describe a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `interface Name { … }`
    Interface,
    /// `type Name = …`
    TypeAlias,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 2] = [DeclarationKind::Interface, DeclarationKind::TypeAlias];
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclarationKind::Interface => "interface",
            DeclarationKind::TypeAlias => "type alias",
        })
    }
}

/// A property of an object type or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
    optional: bool,
    ty: TypeExpr,
}

impl Member {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The declared type. Methods get an opaque type holding their signature.
    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }
}

/// A classified type expression. Every variant keeps its source text with
/// whitespace runs collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `{ a: A; b?: B }`
    Object { members: Vec<Member>, text: String },
    /// `Name`, `ns.Name` or `Name<Arg, …>`
    Reference {
        name: String,
        arguments: Vec<TypeExpr>,
        text: String,
    },
    /// `A & B & …`
    Intersection { parts: Vec<TypeExpr>, text: String },
    /// Unions, primitives, functions, arrays and everything else.
    Opaque { text: String },
}

impl TypeExpr {
    pub fn text(&self) -> &str {
        match self {
            TypeExpr::Object { text, .. }
            | TypeExpr::Reference { text, .. }
            | TypeExpr::Intersection { text, .. }
            | TypeExpr::Opaque { text } => text,
        }
    }

    fn opaque(text: impl Into<String>) -> Self {
        TypeExpr::Opaque { text: text.into() }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A named shape declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    kind: DeclarationKind,
    heritage: Vec<TypeExpr>,
    members: Vec<Member>,
    body: Option<TypeExpr>,
    span: Span,
}

impl Declaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// The `extends` list of an interface, in declared order.
    pub fn heritage(&self) -> &[TypeExpr] {
        &self.heritage
    }

    /// The members written in an interface body.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The right-hand side of a type alias.
    pub fn body(&self) -> Option<&TypeExpr> {
        self.body.as_ref()
    }

    /// Location of the first declaration with this name.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Folds a later declaration of the same interface into this one.
    fn merge(&mut self, other: Declaration) {
        self.heritage.extend(other.heritage);
        self.members.extend(other.members);
    }
}

/// The shape declarations of one source text.
///
/// Repeated `interface` declarations with one name are merged in source
/// order. A repeated `type` alias is ignored in favour of the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    declarations: IndexMap<(DeclarationKind, String), Declaration>,
}

impl SourceUnit {
    /// Scans `source` for declarations.
    ///
    /// # Errors
    ///
    /// Fails only when the source cannot be tokenized (`E001`–`E003`).
    ///
    /// # Example
    ///
    /// ```
    /// # use documentize_parser::{DeclarationKind, SourceUnit};
    /// let unit = SourceUnit::parse("interface $$Events { click: MouseEvent }").unwrap();
    /// let events = unit.declaration("$$Events", DeclarationKind::Interface).unwrap();
    ///
    /// assert_eq!(events.members()[0].name(), "click");
    /// ```
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(source)?;
        let lexemes = significant(&tokens);

        let mut unit = Self::default();
        for declaration in Scanner::new(source, &lexemes).declarations() {
            trace!(name = declaration.name.as_str(), kind = declaration.kind.to_string(); "Found declaration");
            match unit
                .declarations
                .entry((declaration.kind, declaration.name.clone()))
            {
                Entry::Vacant(entry) => {
                    entry.insert(declaration);
                }
                Entry::Occupied(mut entry) if declaration.kind == DeclarationKind::Interface => {
                    entry.get_mut().merge(declaration);
                }
                Entry::Occupied(_) => {
                    debug!(name = declaration.name.as_str(); "Ignoring repeated type alias");
                }
            }
        }
        Ok(unit)
    }

    pub fn declaration(&self, name: &str, kind: DeclarationKind) -> Option<&Declaration> {
        self.declarations.get(&(kind, name.to_string()))
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// A significant token, remembering whether a line break preceded it.
#[derive(Debug, Clone, Copy)]
struct Lexeme<'s> {
    token: Token<'s>,
    span: Span,
    line_start: bool,
}

impl Lexeme<'_> {
    fn is_punct(&self, c: char) -> bool {
        self.token == Token::Punct(c)
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        self.token == Token::Identifier(keyword)
    }

    fn opens(&self) -> bool {
        matches!(self.token, Token::Punct('(' | '[' | '{' | '<'))
    }

    fn closes(&self) -> bool {
        matches!(self.token, Token::Punct(')' | ']' | '}' | '>'))
    }

    /// Name-like tokens usable as a property key.
    fn property_name(&self) -> Option<&str> {
        match self.token {
            Token::Identifier(name) | Token::Number(name) | Token::String(name) => Some(name),
            _ => None,
        }
    }
}

fn significant<'s>(tokens: &[crate::lexer::PositionedToken<'s>]) -> Vec<Lexeme<'s>> {
    let mut lexemes = Vec::with_capacity(tokens.len());
    let mut line_start = true;

    for positioned in tokens {
        match positioned.token {
            Token::Newline => line_start = true,
            Token::BlockComment(text) if text.contains('\n') => line_start = true,
            token if token.is_trivia() => {}
            token => {
                lexemes.push(Lexeme {
                    token,
                    span: positioned.span,
                    line_start,
                });
                line_start = false;
            }
        }
    }
    lexemes
}

/// Whether a line break between `prev` and `next` continues an expression.
fn continues(prev: &Lexeme<'_>, next: &Lexeme<'_>) -> bool {
    let trailing = matches!(
        prev.token,
        Token::Arrow | Token::Punct('=' | ',' | '(' | '[' | '{' | '<' | '&' | '|' | '.' | ':' | '?' | '+' | '-' | '*' | '/')
    );
    let leading = matches!(
        next.token,
        Token::Arrow | Token::Punct('.' | '?' | '&' | '|' | '=' | ':' | ')' | ']' | '>' | ',')
    ) || next.is_keyword("extends");
    trailing || leading
}

/// Collapses whitespace runs to single spaces.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text_of(source: &str, lexemes: &[Lexeme<'_>]) -> String {
    match (lexemes.first(), lexemes.last()) {
        (Some(first), Some(last)) => normalize(&source[first.span.start()..last.span.end()]),
        _ => String::new(),
    }
}

fn delimiters_pair(open: &Lexeme<'_>, close: &Lexeme<'_>) -> bool {
    matches!(
        (open.token, close.token),
        (Token::Punct('('), Token::Punct(')'))
            | (Token::Punct('['), Token::Punct(']'))
            | (Token::Punct('{'), Token::Punct('}'))
            | (Token::Punct('<'), Token::Punct('>'))
    )
}

/// Finds the closer matching the opener at `open`.
fn matching_close(lexemes: &[Lexeme<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, lexeme) in lexemes.iter().enumerate().skip(open) {
        if lexeme.opens() {
            depth += 1;
        } else if lexeme.closes() {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Splits on `separator` outside of any brackets. Empty parts are dropped.
fn split_top_level<'l, 's>(lexemes: &'l [Lexeme<'s>], separator: char) -> Vec<&'l [Lexeme<'s>]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, lexeme) in lexemes.iter().enumerate() {
        if lexeme.opens() {
            depth += 1;
        } else if lexeme.closes() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && lexeme.is_punct(separator) {
            parts.push(&lexemes[start..index]);
            start = index + 1;
        }
    }
    parts.push(&lexemes[start..]);
    parts.retain(|part| !part.is_empty());
    parts
}

/// Classifies the type expression spanning `lexemes`.
fn type_expr(source: &str, lexemes: &[Lexeme<'_>]) -> TypeExpr {
    let text = text_of(source, lexemes);

    let union = split_top_level(lexemes, '|');
    let [lexemes] = union.as_slice() else {
        return TypeExpr::opaque(text);
    };

    let intersection = split_top_level(lexemes, '&');
    if intersection.len() > 1 {
        return TypeExpr::Intersection {
            parts: intersection
                .iter()
                .map(|part| type_expr(source, part))
                .collect(),
            text,
        };
    }
    let [lexemes] = intersection.as_slice() else {
        return TypeExpr::opaque(text);
    };

    // Only a delimiter pair spanning the whole expression wraps it.
    let inner = match lexemes {
        [open, inner @ .., close]
            if delimiters_pair(open, close)
                && matching_close(lexemes, 0) == Some(lexemes.len() - 1) =>
        {
            Some(inner)
        }
        _ => None,
    };
    match (lexemes[0].token, inner) {
        (Token::Punct('('), Some(inner)) => type_expr(source, inner),
        (Token::Punct('{'), Some(inner)) => TypeExpr::Object {
            members: Scanner::new(source, inner).members(),
            text,
        },
        (Token::Identifier(_), _) => {
            reference(source, lexemes).unwrap_or(TypeExpr::Opaque { text })
        }
        _ => TypeExpr::Opaque { text },
    }
}

/// Reads `Name`, `a.b.Name` or `Name<Args>`, covering all of `lexemes`.
fn reference(source: &str, lexemes: &[Lexeme<'_>]) -> Option<TypeExpr> {
    let mut path = Vec::new();
    let mut index = 0;

    loop {
        let Token::Identifier(segment) = lexemes.get(index)?.token else {
            return None;
        };
        path.push(segment);
        index += 1;
        match lexemes.get(index) {
            Some(lexeme) if lexeme.is_punct('.') => index += 1,
            _ => break,
        }
    }

    let name = path.join(".");
    if path.len() == 1 && BUILTIN_TYPES.contains(&name.as_str()) {
        return None;
    }

    let arguments = match lexemes.get(index) {
        None => Vec::new(),
        Some(lexeme) if lexeme.is_punct('<') => {
            if matching_close(lexemes, index) != Some(lexemes.len() - 1) {
                return None;
            }
            split_top_level(&lexemes[index + 1..lexemes.len() - 1], ',')
                .into_iter()
                .map(|argument| type_expr(source, argument))
                .collect()
        }
        Some(_) => return None,
    };

    Some(TypeExpr::Reference {
        name,
        arguments,
        text: text_of(source, lexemes),
    })
}

/// Statement and member scanner over significant tokens.
struct Scanner<'s, 'l> {
    source: &'s str,
    lexemes: &'l [Lexeme<'s>],
    pos: usize,
}

impl<'s, 'l> Scanner<'s, 'l> {
    fn new(source: &'s str, lexemes: &'l [Lexeme<'s>]) -> Self {
        Self {
            source,
            lexemes,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'l Lexeme<'s>> {
        self.lexemes.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&'l Lexeme<'s>> {
        self.lexemes.get(self.pos + n)
    }

    fn bump(&mut self) -> Option<&'l Lexeme<'s>> {
        let lexeme = self.lexemes.get(self.pos)?;
        self.pos += 1;
        Some(lexeme)
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek().is_some_and(|lexeme| lexeme.is_punct(c))
    }

    fn eat_punct(&mut self, c: char) -> bool {
        let found = self.at_punct(c);
        if found {
            self.pos += 1;
        }
        found
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let found = self.peek().is_some_and(|lexeme| lexeme.is_keyword(keyword));
        if found {
            self.pos += 1;
        }
        found
    }

    fn nth_is_identifier(&self, n: usize) -> bool {
        self.peek_nth(n)
            .is_some_and(|lexeme| matches!(lexeme.token, Token::Identifier(_)))
    }

    fn nth_is_punct(&self, n: usize, c: char) -> bool {
        self.peek_nth(n).is_some_and(|lexeme| lexeme.is_punct(c))
    }

    fn last_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|index| self.lexemes.get(index))
            .map_or(0, |lexeme| lexeme.span.end())
    }

    /// Scans statements until the end of input.
    fn declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        while let Some(lexeme) = self.peek() {
            match lexeme.token {
                Token::Punct(';' | '{' | '}') => {
                    self.bump();
                }
                Token::Identifier("export" | "declare" | "default") => {
                    self.bump();
                }
                Token::Identifier("interface") if self.nth_is_identifier(1) => {
                    declarations.push(self.interface());
                }
                Token::Identifier("type")
                    if self.nth_is_identifier(1)
                        && (self.nth_is_punct(2, '=') || self.nth_is_punct(2, '<')) =>
                {
                    if let Some(alias) = self.alias() {
                        declarations.push(alias);
                    }
                }
                Token::Identifier("namespace" | "module")
                    if self.peek_nth(1).and_then(Lexeme::property_name).is_some() =>
                {
                    // Skip the (possibly dotted) name. The block itself is
                    // entered by the `{` arm above.
                    self.bump();
                    while self.peek().is_some_and(|lexeme| !lexeme.is_punct('{') && !lexeme.is_punct(';')) {
                        self.bump();
                    }
                }
                Token::Identifier("global") if self.nth_is_punct(1, '{') => {
                    self.bump();
                }
                _ => self.skip_statement(),
            }
        }
        declarations
    }

    /// `interface Name<…> extends A, B { … }`, positioned at `interface`.
    fn interface(&mut self) -> Declaration {
        let start = self.bump().map_or(0, |lexeme| lexeme.span.start());
        let name = self.identifier();
        self.skip_type_parameters();

        let mut heritage = Vec::new();
        if self.eat_keyword("extends") {
            loop {
                let range = self.collect_type(&[',', '{'], false);
                if !range.is_empty() {
                    heritage.push(type_expr(self.source, range));
                }
                if !self.eat_punct(',') {
                    break;
                }
            }
        }

        let members = match self.peek() {
            Some(lexeme) if lexeme.is_punct('{') => self.block_members(),
            _ => Vec::new(),
        };

        Declaration {
            name,
            kind: DeclarationKind::Interface,
            heritage,
            members,
            body: None,
            span: Span::new(start..self.last_end()),
        }
    }

    /// `type Name<…> = Type;`, positioned at `type`.
    fn alias(&mut self) -> Option<Declaration> {
        let start = self.bump().map_or(0, |lexeme| lexeme.span.start());
        let name = self.identifier();
        self.skip_type_parameters();

        if !self.eat_punct('=') {
            self.skip_statement();
            return None;
        }

        let range = self.collect_type(&[';'], true);
        let body = type_expr(self.source, range);
        let end = self.last_end();
        self.eat_punct(';');

        Some(Declaration {
            name,
            kind: DeclarationKind::TypeAlias,
            heritage: Vec::new(),
            members: Vec::new(),
            body: Some(body),
            span: Span::new(start..end),
        })
    }

    fn identifier(&mut self) -> String {
        match self.peek().map(|lexeme| lexeme.token) {
            Some(Token::Identifier(name)) => {
                self.bump();
                name.to_string()
            }
            _ => String::new(),
        }
    }

    fn skip_type_parameters(&mut self) {
        if self.at_punct('<') {
            self.pos = matching_close(self.lexemes, self.pos).map_or(self.lexemes.len(), |close| close + 1);
        }
    }

    /// Parses the `{ … }` block at the cursor as members.
    fn block_members(&mut self) -> Vec<Member> {
        let open = self.pos;
        let close = matching_close(self.lexemes, open).unwrap_or(self.lexemes.len());
        let inner = &self.lexemes[open + 1..close.max(open + 1)];
        self.pos = (close + 1).min(self.lexemes.len());
        Scanner::new(self.source, inner).members()
    }

    /// Consumes a type expression and returns its tokens.
    ///
    /// Stops before any of `stops` or an unmatched closer at bracket depth 0.
    /// With `newline_ends`, a line break at depth 0 also ends the type unless
    /// the surrounding tokens continue it.
    fn collect_type(&mut self, stops: &[char], newline_ends: bool) -> &'l [Lexeme<'s>] {
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(lexeme) = self.peek() {
            if depth == 0 {
                if stops.iter().any(|stop| lexeme.is_punct(*stop)) {
                    break;
                }
                if lexeme.closes() && !lexeme.is_punct('>') {
                    break;
                }
                if newline_ends
                    && self.pos > start
                    && lexeme.line_start
                    && !continues(&self.lexemes[self.pos - 1], lexeme)
                {
                    break;
                }
            }
            if lexeme.opens() {
                depth += 1;
            } else if lexeme.closes() {
                depth = depth.saturating_sub(1);
            }
            self.pos += 1;
        }
        &self.lexemes[start..self.pos]
    }

    /// Skips to the end of the current statement.
    fn skip_statement(&mut self) {
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(lexeme) = self.peek() {
            if depth == 0
                && self.pos > start
                && lexeme.line_start
                && !continues(&self.lexemes[self.pos - 1], lexeme)
            {
                break;
            }
            match lexeme.token {
                Token::Punct('(' | '[' | '{') => depth += 1,
                Token::Punct(')' | ']' | '}') => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Token::Punct(';') if depth == 0 => {
                    self.pos += 1;
                    break;
                }
                _ => {}
            }
            self.pos += 1;
        }

        if self.pos == start {
            self.pos += 1;
        }
    }

    /// Parses members until the end of input.
    fn members(&mut self) -> Vec<Member> {
        let mut members = Vec::new();

        while self.peek().is_some() {
            if self.eat_punct(';') || self.eat_punct(',') {
                continue;
            }
            while self.peek().is_some_and(|lexeme| {
                MEMBER_MODIFIERS.iter().any(|modifier| lexeme.is_keyword(modifier))
            }) && self.peek_nth(1).and_then(Lexeme::property_name).is_some()
            {
                self.bump();
            }

            match self.member() {
                Some(member) => members.push(member),
                None => {
                    // Index signatures, call signatures and anything unknown.
                    if self.collect_type(&[';', ','], true).is_empty() {
                        self.bump();
                    }
                }
            }
        }
        members
    }

    fn member(&mut self) -> Option<Member> {
        let name = self.peek().and_then(Lexeme::property_name)?;
        if self.nth_is_punct(1, '(') && name == "new" {
            return None;
        }
        self.bump();
        let optional = self.eat_punct('?');

        let ty = if self.eat_punct(':') {
            type_expr(self.source, self.collect_type(&[';', ','], true))
        } else if self.at_punct('(') || self.at_punct('<') {
            TypeExpr::opaque(text_of(self.source, self.collect_type(&[';', ','], true)))
        } else {
            TypeExpr::opaque("any")
        };

        Some(Member {
            name: name.to_string(),
            optional,
            ty,
        })
    }
}
