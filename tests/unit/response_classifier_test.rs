// Classifier safety: unknown codes never raise, ambiguous success never wins

use payport::classifier::code_tables::{AZKI_RESULT_CODES, SADAD_STATUS_CODES, UNKNOWN_MESSAGE};
use payport::classifier::{CodeTable, OutcomeCategory, ResponseClassifier};
use proptest::prelude::*;

const TABLES: [CodeTable; 3] = [
    CodeTable::AzkiResult,
    CodeTable::AzkiTicketStatus,
    CodeTable::SadadStatus,
];

#[test]
fn test_insufficient_balance_is_terminal_rejection() {
    let outcome = ResponseClassifier.classify(CodeTable::AzkiResult, "21", "");
    assert_eq!(outcome.category, OutcomeCategory::Failed);
    assert_eq!(outcome.message, "Insufficient balance");
    assert!(!outcome.retryable);
}

#[test]
fn test_every_registered_code_keeps_its_category() {
    for entry in AZKI_RESULT_CODES {
        let outcome = ResponseClassifier.classify(CodeTable::AzkiResult, entry.code, "");
        assert_eq!(outcome.category, entry.category, "rsCode {}", entry.code);
        assert_eq!(outcome.message, entry.message);
    }

    for entry in SADAD_STATUS_CODES {
        let status = entry.expected_status.unwrap_or("");
        let outcome = ResponseClassifier.classify(CodeTable::SadadStatus, entry.code, status);
        assert_eq!(outcome.category, entry.category, "AppStatusCode {}", entry.code);
    }
}

#[test]
fn test_verified_ticket_status() {
    let outcome = ResponseClassifier.classify(CodeTable::AzkiTicketStatus, "2", "");
    assert!(outcome.is_success());

    let pending = ResponseClassifier.classify(CodeTable::AzkiTicketStatus, "1", "");
    assert_eq!(pending.category, OutcomeCategory::Pending);
    assert!(pending.retryable);
}

proptest! {
    /// Property: a success code with any status other than `commit` is Failed
    #[test]
    fn prop_sadad_success_needs_commit(status in "[a-zA-Z ]{0,12}") {
        prop_assume!(!status.trim().eq_ignore_ascii_case("commit"));

        let outcome = ResponseClassifier.classify(CodeTable::SadadStatus, "0", &status);
        prop_assert_eq!(outcome.category, OutcomeCategory::Failed);
        prop_assert!(!outcome.is_success());
    }

    /// Property: unregistered codes classify as Unknown without raising
    #[test]
    fn prop_unregistered_codes_are_unknown(
        code in 1000u32..1_000_000u32,
        table in prop::sample::select(TABLES.to_vec()),
    ) {
        let outcome = ResponseClassifier.classify(table, &code.to_string(), "");
        prop_assert_eq!(outcome.category, OutcomeCategory::Unknown);
        prop_assert_eq!(outcome.message, UNKNOWN_MESSAGE);
        prop_assert!(!outcome.retryable);
    }

    /// Property: arbitrary text never panics, and success only comes from
    /// the registered success code of the table
    #[test]
    fn prop_arbitrary_text_is_safe(code in "\\PC{0,16}", status in "\\PC{0,16}") {
        for table in TABLES {
            let outcome = ResponseClassifier.classify(table, &code, &status);
            if outcome.is_success() {
                let success_code = match table {
                    CodeTable::AzkiTicketStatus => "2",
                    CodeTable::AzkiResult | CodeTable::SadadStatus => "0",
                };
                prop_assert_eq!(outcome.outcome_code.as_str(), success_code);
            }
        }
    }
}
