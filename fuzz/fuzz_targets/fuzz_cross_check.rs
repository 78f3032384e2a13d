#![no_main]

use libfuzzer_sys::fuzz_target;

use exprcalc_core::OutcomeStatus;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // Bytes become a chain of small integers joined by + and -, capped to
    // stay under the length limit.
    let mut expression = data[0].to_string();
    let mut expected = i64::from(data[0]);
    for pair in data[1..].chunks_exact(2).take(40) {
        let operand = pair[1];
        if pair[0] % 2 == 0 {
            expression.push('+');
            expected += i64::from(operand);
        } else {
            expression.push('-');
            expected -= i64::from(operand);
        }
        expression.push_str(&operand.to_string());
    }

    let outcome = exprcalc_core::evaluate(&expression).expect("evaluation must not fault");
    assert_eq!(outcome.status(), OutcomeStatus::Success, "{expression}");
    assert_eq!(outcome.display(), expected.to_string(), "{expression}");
});
