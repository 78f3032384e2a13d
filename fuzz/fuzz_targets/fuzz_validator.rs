#![no_main]

use libfuzzer_sys::fuzz_target;

use exprcalc_core::{
    ArithmeticCalculator, Calculator, OutcomeModel, SyntaxValidator, Validator,
    INVALID_EXPRESSION_MESSAGE,
};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let validation = SyntaxValidator::new()
        .validate_expression(input)
        .expect("validator must not fault");
    let evaluation = ArithmeticCalculator::new()
        .evaluate_expression(input)
        .expect("calculator must not fault");

    if validation.is_valid {
        // Anything the validator lets through must be computable.
        assert_ne!(
            evaluation.value, INVALID_EXPRESSION_MESSAGE,
            "validator accepted {input:?} but the calculator rejected it"
        );
    } else {
        assert_eq!(validation.value, INVALID_EXPRESSION_MESSAGE);
    }

    let outcome = OutcomeModel::merge(validation, evaluation);
    assert!(!outcome.display().is_empty());
});
