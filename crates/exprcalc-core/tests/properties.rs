//! Property-based tests for validation and evaluation.
//!
//! These tests drive the synchronous `evaluate` helper and the two
//! collaborators directly, without the concurrent use-case.

use proptest::prelude::*;

use exprcalc_core::validator::SyntaxValidator;
use exprcalc_core::{
    evaluate, ArithmeticCalculator, Calculator, OutcomeStatus, Validator,
    INVALID_EXPRESSION_MESSAGE,
};

/// Well-formed expressions built from the grammar the validator accepts.
fn arb_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..10_000).prop_map(|n| n.to_string()),
        (0u32..1000, 1u32..1000).prop_map(|(a, b)| format!("{a}.{b}")),
    ];
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/', '%']), inner.clone())
                .prop_map(|(l, op, r)| format!("{l}{op}{r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.prop_map(|e| format!("-({e})")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// a + b evaluates to the exact integer sum.
    #[test]
    fn integer_addition(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let outcome = evaluate(&format!("{a}+{b}")).unwrap();
        prop_assert_eq!(outcome.status(), OutcomeStatus::Success);
        prop_assert_eq!(outcome.display(), (a + b).to_string());
    }

    /// a * b evaluates to the exact integer product.
    #[test]
    fn integer_multiplication(a in -10_000i64..10_000, b in 0i64..10_000) {
        let outcome = evaluate(&format!("{a}*{b}")).unwrap();
        prop_assert_eq!(outcome.display(), (a * b).to_string());
    }

    /// Any letter makes the expression invalid, whatever else it contains.
    #[test]
    fn letters_always_fail(prefix in "[0-9+*/() -]{0,8}", letter in "[a-zA-Z]", suffix in "[0-9+*/() -]{0,8}") {
        let outcome = evaluate(&format!("{prefix}{letter}{suffix}")).unwrap();
        prop_assert_eq!(outcome.status(), OutcomeStatus::Failure);
        prop_assert_eq!(outcome.display(), INVALID_EXPRESSION_MESSAGE);
    }

    /// The validator never panics and never errors.
    #[test]
    fn validator_total(input in ".{0,64}") {
        prop_assert!(SyntaxValidator::new().validate_expression(&input).is_ok());
    }

    /// Whatever the validator accepts, the calculator can evaluate.
    #[test]
    fn generated_expressions_agree(expr in arb_expression()) {
        let validation = SyntaxValidator::new().validate_expression(&expr).unwrap();
        prop_assert!(validation.is_valid, "validator rejected {}", expr);

        let evaluation = ArithmeticCalculator::new().evaluate_expression(&expr).unwrap();
        prop_assert_ne!(evaluation.value, INVALID_EXPRESSION_MESSAGE, "calculator rejected {}", expr);
    }
}
