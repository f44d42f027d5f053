//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse DSL source code into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    let tokens = crate::parser::lexer::lex(input).map_err(|spans| {
        spans
            .into_iter()
            .map(|span| crate::ParseError::invalid_character(input, span))
            .collect::<Vec<_>>()
    })?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Basic token parsers
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let string_literal = select! {
        Token::String(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let number = select! {
        Token::Number(n) => n,
    }
    .map_with(|n, e| Spanned::new(n, span_range(&e.span())));

    let modifier_key = identifier
        .clone()
        .map(|id| Spanned::new(ModifierKey::from_ident(id.node.as_str()), id.span));

    let modifier_value = choice((
        // Numbers (including negative via Minus token, rejected later by the builder)
        just(Token::Minus)
            .or_not()
            .then(number)
            .map_with(|(neg, n), e| {
                let value = if neg.is_some() { -n.node } else { n.node };
                Spanned::new(ModifierValue::Number(value), span_range(&e.span()))
            }),
        string_literal.map(|s| Spanned::new(ModifierValue::String(s.node), s.span)),
        // Bare words: justification names, `unbounded`
        identifier
            .clone()
            .map(|id| Spanned::new(ModifierValue::Keyword(id.node.0), id.span)),
    ));

    let modifier = modifier_key
        .then_ignore(just(Token::Colon))
        .then(modifier_value)
        .map_with(|(key, value), e| Spanned::new(Modifier { key, value }, span_range(&e.span())));

    let modifier_block = modifier
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    // Item declaration: `box a [width: 10]`
    let item_type = choice((
        just(Token::Box).to(ItemType::Box),
        just(Token::Spring).to(ItemType::Spring),
        just(Token::Strut).to(ItemType::Strut),
    ))
    .map_with(|it, e| Spanned::new(it, span_range(&e.span())));

    let item_decl = item_type
        .then(identifier.clone().or_not())
        .then(modifier_block.clone().or_not())
        .map(|((item_type, name), modifiers)| ItemDecl {
            item_type,
            name,
            modifiers: modifiers.unwrap_or_default(),
        });

    let layout_type = choice((
        just(Token::Row).to(LayoutType::Row),
        just(Token::Col).to(LayoutType::Column),
    ))
    .map_with(|lt, e| Spanned::new(lt, span_range(&e.span())));

    // Recursive statement parser
    let statement = recursive(|stmt| {
        let layout_decl = layout_type
            .then(identifier.or_not())
            .then(modifier_block.or_not())
            .then(
                stmt.clone()
                    .repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
            )
            .map(|(((layout_type, name), modifiers), children)| LayoutDecl {
                layout_type,
                name,
                children,
                modifiers: modifiers.unwrap_or_default(),
            });

        choice((
            layout_decl.map(Statement::Layout),
            item_decl.map(Statement::Item),
        ))
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
        .boxed()
    });

    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Document { statements })
}
