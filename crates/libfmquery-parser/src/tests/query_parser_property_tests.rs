//! Property tests for the lexer, the parser and `FindQuery` rendering.

use crate::Condition;
use crate::FindQuery;
use crate::QueryParser;
use crate::QueryParserOptions;
use crate::SortKey;
use crate::hooks::BooleanOperator;
use crate::hooks::Comparator;
use crate::hooks::SortDirection;
use crate::token_source::StrQueryTokenSource;
use proptest::prelude::*;

fn literal() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9_*.]{0,6}",
        "\\PC{0,6}",
        Just("and".to_string()),
        Just("Order".to_string()),
    ]
}

fn comparator() -> impl Strategy<Value = Comparator> {
    prop_oneof![
        Just(Comparator::Eq),
        Just(Comparator::Lt),
        Just(Comparator::Gt),
        Just(Comparator::LtEq),
        Just(Comparator::GtEq),
        Just(Comparator::Like),
    ]
}

fn boolean_operator() -> impl Strategy<Value = BooleanOperator> {
    prop_oneof![
        Just(BooleanOperator::And),
        Just(BooleanOperator::Or),
        Just(BooleanOperator::Omit),
    ]
}

fn condition() -> impl Strategy<Value = Condition> {
    let leaf = (literal(), comparator(), literal()).prop_map(|(field, comparator, value)| {
        Condition::Comparison {
            field,
            comparator,
            value,
        }
    });
    leaf.prop_recursive(4, 24, 2, |inner| {
        (boolean_operator(), inner.clone(), inner).prop_map(|(operator, lhs, rhs)| {
            Condition::Binary {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            }
        })
    })
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    let direction = prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)];
    (literal(), proptest::option::of(direction))
        .prop_map(|(field, direction)| SortKey { field, direction })
}

fn find_query() -> impl Strategy<Value = FindQuery> {
    (
        proptest::collection::vec(literal(), 0..3),
        any::<bool>(),
        proptest::option::of(condition()),
        proptest::collection::vec(sort_key(), 0..3),
        proptest::option::of(0u64..10_000),
        proptest::option::of(0u64..10_000),
    )
        .prop_map(|(fields, omit, condition, sort, limit, offset)| FindQuery {
            fields,
            omit: omit && condition.is_some(),
            condition,
            sort,
            limit,
            offset,
        })
}

/// Rewrites the ASCII letters of `word` to upper or lower case per `mask`.
fn recase(word: &str, mask: &[bool]) -> String {
    word.chars()
        .zip(mask.iter().cycle())
        .map(|(ch, upper)| {
            if *upper {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    /// Verifies that a rendered query parses back to the same query.
    #[test]
    fn rendered_query_reparses(query in find_query()) {
        let rendered = query.to_string();
        let reparsed = FindQuery::parse(&rendered);
        prop_assert!(reparsed.is_ok(), "{rendered:?}: {reparsed:?}");
        prop_assert_eq!(reparsed.ok(), Some(query));
    }

    /// Verifies that keyword case never changes the parse.
    #[test]
    fn keyword_case_is_irrelevant(mask in proptest::collection::vec(any::<bool>(), 1..8)) {
        let template = [
            "SELECT", "a,", "b", "WHERE", "OMIT", "(c=1", "OR", "d", "LIKE", "e*)", "AND",
            "f>2", "ORDER", "BY", "a", "DESC", "LIMIT", "3", "OFFSET", "4",
        ];
        let recased: Vec<String> = template
            .iter()
            .map(|word| {
                if word.chars().all(|c| c.is_ascii_uppercase()) {
                    recase(word, &mask)
                } else {
                    word.to_string()
                }
            })
            .collect();
        prop_assert_eq!(
            FindQuery::parse(&recased.join(" ")).ok(),
            FindQuery::parse(&template.join(" ")).ok(),
        );
    }

    /// Verifies that flat chains of any length parse without nesting, keep
    /// every comparison, and render back to text that needs no nesting.
    #[test]
    fn flat_chains_parse(operators in proptest::collection::vec(boolean_operator(), 0..200)) {
        let mut source = "WHERE f0=0".to_string();
        for (i, operator) in operators.iter().enumerate() {
            source.push_str(&format!(" {operator} f{n}={n}", n = i + 1));
        }
        let options = QueryParserOptions::default().with_max_nesting_depth(0);
        let query = FindQuery::parse_with_options(&source, options);
        prop_assert!(query.is_ok(), "{source}: {query:?}");
        let query = query.ok();

        let rendered = query.as_ref().map(|q| q.to_string()).unwrap_or_default();
        let reparsed = FindQuery::parse_with_options(&rendered, options);
        prop_assert_eq!(reparsed.ok(), query.clone(), "{}", rendered);

        let condition = query.and_then(|q| q.condition);
        prop_assert_eq!(
            condition.map(|c| c.comparisons().len()),
            Some(operators.len() + 1),
        );
    }

    /// Verifies that successful lexing covers the input with contiguous
    /// tokens ending in a single `Null` token.
    #[test]
    fn lexer_tokens_are_contiguous(source in any::<String>()) {
        let results: Vec<_> = StrQueryTokenSource::new(&source).collect();
        let char_count = source.chars().count();
        let mut expected_position = 1;
        for (i, result) in results.iter().enumerate() {
            match result {
                Ok(token) => {
                    prop_assert_eq!(token.position.index(), expected_position);
                    prop_assert!(token.end.index() >= token.position.index());
                    prop_assert_eq!(token.is_null(), i == results.len() - 1);
                    expected_position = token.end.index();
                },
                Err(error) => {
                    prop_assert_eq!(i, results.len() - 1);
                    prop_assert_eq!(error.position().index(), expected_position);
                },
            }
        }
        if let Some(Ok(last)) = results.last() {
            prop_assert_eq!(last.end.index(), char_count + 1);
        }
    }

    /// Verifies that any input either parses or fails inside its bounds.
    #[test]
    fn parse_errors_are_in_bounds(source in any::<String>()) {
        if let Err(error) = QueryParser::new(&source).parse() {
            prop_assert!(error.position().index() >= 1);
            prop_assert!(error.position().index() <= source.chars().count() + 1);
            prop_assert!(error.end() >= error.position());
        }
    }
}
