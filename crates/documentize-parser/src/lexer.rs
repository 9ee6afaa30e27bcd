//! Lexical analysis of typed-declaration source.
//!
//! The lexer understands just enough TypeScript to let the declaration scanner
//! find statement boundaries: identifiers (with `$`), numbers, quoted
//! strings, template literals, comments, the `=>` arrow, whitespace and
//! newlines. Every other character is a [`Token::Punct`], so lexing never
//! fails on unexpected input. It fails only on constructs that swallow the
//! rest of the source:
//!
//! - `E001`: a `'` or `"` string not closed before the end of the line
//! - `E002`: an unclosed `/*` comment
//! - `E003`: an unclosed template literal
//!
//! A `/` where an expression may start (after `=`, `(`, `return`, …) begins a
//! regular expression literal, so `/'/g` is not read as a string. Elsewhere it
//! is division punctuation.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, none_of, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Keywords after which an expression, and so a regex, may follow.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "await", "case", "delete", "do", "else", "in", "instanceof", "new", "of", "return", "throw",
    "typeof", "void", "yield",
];

/// A lexical token. Slices borrow from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A word starting with a letter, `_` or `$`.
    Identifier(&'a str),
    /// A word starting with a digit.
    Number(&'a str),
    /// String contents, without the quotes.
    String(&'a str),
    /// Template literal contents, without the backticks.
    Template(&'a str),
    /// Regular expression literal, slashes and flags included.
    Regex(&'a str),
    LineComment(&'a str),
    BlockComment(&'a str),
    /// `=>`
    Arrow,
    Punct(char),
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Whether a `/` after this token starts a regular expression.
    fn precedes_expression(&self) -> bool {
        match self {
            Token::Punct(c) => !matches!(*c, ')' | ']' | '}'),
            Token::Arrow => true,
            Token::Identifier(word) => EXPRESSION_KEYWORDS.contains(word),
            _ => false,
        }
    }

    /// Whether the token carries no syntactic meaning.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::Newline | Token::LineComment(_) | Token::BlockComment(_)
        )
    }
}

/// A token and its location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}

/// Context attached to cut errors so they can be turned into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    help: &'static str,
    /// Where the unterminated construct starts.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded("//", take_while(0.., |c: char| c != '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

fn block_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "/*",
        cut_err(terminated(take_until(0.., "*/"), "*/")).context(LexerDiagnostic {
            code: ErrorCode::E002,
            help: "close the comment with `*/`",
            start,
        }),
    )
    .map(Token::BlockComment)
    .parse_next(input)
}

/// A string delimited by `quote`. Backslash escapes any character, so `\'`
/// does not end a single-quoted string. A raw newline does.
fn delimited_string<'a>(quote: char) -> impl FnMut(&mut Input<'a>) -> IResult<Token<'a>> {
    move |input: &mut Input<'a>| {
        let start = input.current_token_start();
        let content = repeat(
            0..,
            alt((
                preceded('\\', any).void(),
                none_of([quote, '\\', '\n']).void(),
            )),
        )
        .map(|()| ())
        .take();

        preceded(
            quote,
            cut_err(terminated(content, quote)).context(LexerDiagnostic {
                code: ErrorCode::E001,
                help: "close the string before the end of the line",
                start,
            }),
        )
        .map(Token::String)
        .parse_next(input)
    }
}

fn quoted_string<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((delimited_string('\''), delimited_string('"'))).parse_next(input)
}

/// A template literal. `${…}` placeholders are not parsed, so a backtick
/// nested inside one ends the literal early.
fn template_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    let content = repeat(
        0..,
        alt((preceded('\\', any).void(), none_of(['`', '\\']).void())),
    )
    .map(|()| ())
    .take();

    preceded(
        '`',
        cut_err(terminated(content, '`')).context(LexerDiagnostic {
            code: ErrorCode::E003,
            help: "close the template literal with a backtick",
            start,
        }),
    )
    .map(Token::Template)
    .parse_next(input)
}

/// A `[…]` class inside a regex, where `/` does not end the literal.
fn regex_class(input: &mut Input<'_>) -> IResult<()> {
    (
        '[',
        repeat(
            0..,
            alt((preceded('\\', any).void(), none_of([']', '\\', '\n']).void())),
        )
        .map(|()| ()),
        ']',
    )
        .void()
        .parse_next(input)
}

/// `/body/flags` on a single line. Backtracks, leaving `/` to [`punct`], when
/// the literal is not closed.
fn regex_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let body = repeat(
        1..,
        alt((
            preceded('\\', any).void(),
            regex_class,
            none_of(['/', '\\', '\n', '[']).void(),
        )),
    )
    .map(|()| ());

    ('/', body, '/', take_while(0.., |c: char| c.is_ascii_alphabetic()))
        .take()
        .map(Token::Regex)
        .parse_next(input)
}

fn word<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '$')
        .map(|word: &'a str| {
            if word.starts_with(|c: char| c.is_ascii_digit()) {
                Token::Number(word)
            } else {
                Token::Identifier(word)
            }
        })
        .parse_next(input)
}

fn arrow<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    literal("=>").value(Token::Arrow).parse_next(input)
}

fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

fn punct<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    any.map(Token::Punct).parse_next(input)
}

fn plain_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        quoted_string,
        template_literal,
        word,
        arrow, // before `=` punctuation
        newline,
        whitespace,
        punct,
    ))
    .parse_next(input)
}

fn positioned_token<'a>(
    input: &mut Input<'a>,
    regex_allowed: bool,
) -> IResult<PositionedToken<'a>> {
    let start = input.current_token_start();

    // Comments come before any `/` interpretation.
    let token = if regex_allowed {
        alt((line_comment, block_comment, regex_literal, plain_token)).parse_next(input)?
    } else {
        alt((line_comment, block_comment, plain_token)).parse_next(input)?
    };

    let end = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start..end)))
}

struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        let mut regex_allowed = true;
        while !input.is_empty() {
            match positioned_token(&mut input, regex_allowed) {
                Ok(token) => {
                    if !token.token.is_trivia() {
                        regex_allowed = token.token.precedes_expression();
                    }
                    self.tokens.push(token);
                }
                Err(err) => {
                    let error_pos = input.current_token_start();
                    let diagnostic = Self::convert_err_mode(err, error_pos);
                    let swallows_rest = matches!(
                        diagnostic.code(),
                        Some(ErrorCode::E002 | ErrorCode::E003)
                    );
                    self.diagnostics.emit(diagnostic);

                    // Block comments and template literals may span lines, so
                    // everything after the opening delimiter is part of them.
                    if swallows_rest {
                        break;
                    }
                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    fn convert_err_mode(err: ErrMode<ContextError<LexerDiagnostic>>, error_pos: usize) -> Diagnostic {
        let context = match err {
            ErrMode::Backtrack(context) | ErrMode::Cut(context) => context,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        match context.context().next() {
            Some(LexerDiagnostic { code, help, start }) => {
                let span = Span::new(*start..error_pos.max(start + 1));
                Diagnostic::error(code.description())
                    .with_code(*code)
                    .with_label(span, "starts here")
                    .with_help(*help)
            }
            // Every other token parser accepts any single character.
            None => Diagnostic::error("unexpected input")
                .with_label(Span::new(error_pos..error_pos + 1), "here"),
        }
    }
}

/// Splits `source` into tokens, trivia included.
///
/// # Errors
///
/// Returns every `E001`–`E003` diagnostic found in the source.
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(source));
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(source: &str) -> Vec<Token<'_>> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|positioned| positioned.token)
            .filter(|token| !token.is_trivia())
            .collect()
    }

    fn codes(source: &str) -> Vec<ErrorCode> {
        tokenize(source)
            .unwrap_err()
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_identifiers_with_dollar() {
        assert_eq!(
            significant("interface $$Props extends _Base {}"),
            vec![
                Token::Identifier("interface"),
                Token::Identifier("$$Props"),
                Token::Identifier("extends"),
                Token::Identifier("_Base"),
                Token::Punct('{'),
                Token::Punct('}'),
            ]
        );
    }

    #[test]
    fn test_numbers_and_arrow() {
        assert_eq!(
            significant("(a: 1) => 2n"),
            vec![
                Token::Punct('('),
                Token::Identifier("a"),
                Token::Punct(':'),
                Token::Number("1"),
                Token::Punct(')'),
                Token::Arrow,
                Token::Number("2n"),
            ]
        );
    }

    #[test]
    fn test_strings_keep_escapes() {
        assert_eq!(
            significant(r#"'it\'s' "say \"hi\"" 'a"b'"#),
            vec![
                Token::String(r"it\'s"),
                Token::String(r#"say \"hi\""#),
                Token::String("a\"b"),
            ]
        );
    }

    #[test]
    fn test_template_spans_lines() {
        assert_eq!(
            significant("`a\nb` x"),
            vec![Token::Template("a\nb"), Token::Identifier("x")]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = tokenize("a // note\n/* block\n */ b").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|positioned| positioned.token).collect();

        assert!(kinds.contains(&Token::LineComment(" note")));
        assert!(kinds.contains(&Token::BlockComment(" block\n ")));
        assert_eq!(significant("a // note\n/* block\n */ b").len(), 2);
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "type A = 'x';\n";
        let tokens = tokenize(source).unwrap();

        let rebuilt: String = tokens
            .iter()
            .map(|positioned| &source[positioned.span.range()])
            .collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_regex_literal_with_quote() {
        assert_eq!(
            significant("const re = /'/g;"),
            vec![
                Token::Identifier("const"),
                Token::Identifier("re"),
                Token::Punct('='),
                Token::Regex("/'/g"),
                Token::Punct(';'),
            ]
        );
    }

    #[test]
    fn test_regex_class_may_hold_slash() {
        assert_eq!(
            significant(r#"return /[/"]+/.test(s)"#)[1],
            Token::Regex(r#"/[/"]+/"#)
        );
    }

    #[test]
    fn test_division_is_punctuation() {
        assert_eq!(
            significant("(a) / b / c"),
            vec![
                Token::Punct('('),
                Token::Identifier("a"),
                Token::Punct(')'),
                Token::Punct('/'),
                Token::Identifier("b"),
                Token::Punct('/'),
                Token::Identifier("c"),
            ]
        );
    }

    #[test]
    fn test_unclosed_regex_falls_back_to_punctuation() {
        assert_eq!(significant("= /\n")[1], Token::Punct('/'));
    }

    #[test]
    fn test_unicode_punctuation() {
        assert_eq!(significant("a → b").len(), 3);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(codes("let a = 'oops\nlet b = 1;"), vec![ErrorCode::E001]);
    }

    #[test]
    fn test_unterminated_string_at_end() {
        let err = tokenize("x = \"abc").unwrap_err();
        let diagnostic = &err.diagnostics()[0];

        assert_eq!(diagnostic.code(), Some(ErrorCode::E001));
        assert_eq!(diagnostic.labels()[0].span().start(), 4);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(codes("a /* never closed 'x"), vec![ErrorCode::E002]);
    }

    #[test]
    fn test_unterminated_template() {
        assert_eq!(codes("a = `never closed"), vec![ErrorCode::E003]);
    }

    #[test]
    fn test_reports_every_unterminated_string() {
        assert_eq!(codes("'a\n\"b\n"), vec![ErrorCode::E001, ErrorCode::E001]);
    }
}
