use super::code_tables::{
    AZKI_RESULT_CODES, AZKI_TICKET_STATUSES, SADAD_STATUS_CODES, STATUS_MISMATCH_LOCALIZED,
    STATUS_MISMATCH_MESSAGE, UNKNOWN_LOCALIZED, UNKNOWN_MESSAGE,
};
use super::models::{CodeEntry, CodeTable, GatewayResponse, OutcomeCategory};

/// Maps raw vendor codes onto [`OutcomeCategory`]
///
/// Never fails: unregistered codes become `Unknown`, and a success code whose
/// companion status text disagrees becomes `Failed`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseClassifier;

impl ResponseClassifier {
    pub fn classify(&self, table: CodeTable, raw_code: &str, raw_description: &str) -> GatewayResponse {
        let code = normalize_code(raw_code);

        let Some(entry) = lookup(table, &code) else {
            tracing::debug!(?table, code = %code, "Unregistered gateway code");
            return unclassified(code, OutcomeCategory::Unknown, UNKNOWN_MESSAGE, UNKNOWN_LOCALIZED);
        };

        if entry.category == OutcomeCategory::Success {
            if let Some(expected) = entry.expected_status {
                if !raw_description.trim().eq_ignore_ascii_case(expected) {
                    tracing::warn!(
                        ?table,
                        code = %code,
                        status = raw_description,
                        "Success code without matching status"
                    );
                    return unclassified(
                        code,
                        OutcomeCategory::Failed,
                        STATUS_MISMATCH_MESSAGE,
                        STATUS_MISMATCH_LOCALIZED,
                    );
                }
            }
        }

        GatewayResponse {
            outcome_code: code,
            category: entry.category,
            message: entry.message.to_string(),
            localized_message: entry.localized.to_string(),
            retryable: entry.retryable,
            reference_id: None,
            tracking_code: None,
            card_number: None,
            redirect_target: None,
        }
    }
}

fn table_entries(table: CodeTable) -> &'static [CodeEntry] {
    match table {
        CodeTable::AzkiResult => AZKI_RESULT_CODES,
        CodeTable::AzkiTicketStatus => AZKI_TICKET_STATUSES,
        CodeTable::SadadStatus => SADAD_STATUS_CODES,
    }
}

fn lookup(table: CodeTable, code: &str) -> Option<&'static CodeEntry> {
    table_entries(table).iter().find(|entry| entry.code == code)
}

/// Trim, and compare integers by value so `"00"` and `"0"` agree
fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) => value.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

fn unclassified(
    code: String,
    category: OutcomeCategory,
    message: &str,
    localized: &str,
) -> GatewayResponse {
    GatewayResponse {
        outcome_code: code,
        category,
        message: message.to_string(),
        localized_message: localized.to_string(),
        retryable: false,
        reference_id: None,
        tracking_code: None,
        card_number: None,
        redirect_target: None,
    }
}
