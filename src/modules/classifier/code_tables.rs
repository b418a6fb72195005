// Vendor code tables.
//
// Codes not listed here classify as `Unknown`.

use super::models::{CodeEntry, OutcomeCategory};

use OutcomeCategory::{Failed, Pending, Success};

const fn entry(
    code: &'static str,
    category: OutcomeCategory,
    message: &'static str,
    localized: &'static str,
    retryable: bool,
) -> CodeEntry {
    CodeEntry {
        code,
        category,
        message,
        localized,
        retryable,
        expected_status: None,
    }
}

pub const UNKNOWN_MESSAGE: &str = "Unknown error";
pub const UNKNOWN_LOCALIZED: &str = "خطای ناشناخته";

pub const STATUS_MISMATCH_MESSAGE: &str = "Gateway status does not confirm the success code";
pub const STATUS_MISMATCH_LOCALIZED: &str = "وضعیت تراکنش توسط بانک تایید نشد";

/// Azki `rsCode` values returned by every endpoint
pub const AZKI_RESULT_CODES: &[CodeEntry] = &[
    entry("0", Success, "Request finished successfully", "درخواست با موفقیت انجام شد", false),
    entry("1", Failed, "Internal server error", "خطای داخلی سرور", true),
    entry("2", Failed, "Resource not found", "منبع یافت نشد", false),
    entry("4", Failed, "Malformed data", "داده نامعتبر است", false),
    entry("5", Failed, "Data not found", "اطلاعات یافت نشد", false),
    entry("15", Failed, "Access denied", "دسترسی غیرمجاز", false),
    entry("16", Failed, "Transaction already reversed", "تراکنش قبلا برگشت خورده است", false),
    entry("17", Failed, "Ticket expired", "مهلت پرداخت به پایان رسیده است", false),
    entry("18", Failed, "Signature invalid", "امضای درخواست نامعتبر است", false),
    entry("19", Failed, "Ticket unpayable", "امکان پرداخت این درخواست وجود ندارد", false),
    entry("20", Failed, "Ticket customer mismatch", "مشتری با درخواست مطابقت ندارد", false),
    entry("21", Failed, "Insufficient balance", "موجودی کافی نیست", false),
    entry("28", Failed, "Unverifiable ticket due to status", "وضعیت درخواست قابل تایید نیست", false),
    entry("32", Failed, "Invalid invoice data", "اطلاعات فاکتور نامعتبر است", false),
    entry("33", Failed, "Contract is not started", "قرارداد هنوز آغاز نشده است", false),
    entry("34", Failed, "Contract is expired", "قرارداد منقضی شده است", false),
    entry("44", Failed, "Validation exception for request", "خطای اعتبارسنجی درخواست", false),
    entry("51", Failed, "Request data is not valid", "اطلاعات درخواست معتبر نیست", false),
    entry("59", Failed, "Transaction not reversible", "تراکنش قابل برگشت نیست", false),
    entry("60", Failed, "Transaction must be in verified state", "تراکنش باید در وضعیت تایید شده باشد", false),
];

/// Azki ticket lifecycle statuses
pub const AZKI_TICKET_STATUSES: &[CodeEntry] = &[
    entry("1", Pending, "Ticket created, payment not completed", "پرداخت تکمیل نشده است", true),
    entry("2", Success, "Ticket verified", "پرداخت تایید شد", false),
    entry("3", Failed, "Ticket reversed", "تراکنش برگشت خورده است", false),
    entry("4", Failed, "Ticket failed", "پرداخت ناموفق بود", false),
    entry("5", Failed, "Ticket canceled", "پرداخت لغو شد", false),
    entry("6", Failed, "Ticket already settled", "تراکنش قبلا تسویه شده است", false),
    entry("7", Failed, "Ticket expired", "مهلت پرداخت به پایان رسیده است", false),
    entry("8", Failed, "Ticket already done", "تراکنش قبلا نهایی شده است", false),
    entry("9", Failed, "Ticket queued for settlement", "تراکنش در صف تسویه است", false),
];

/// Sadad `AppStatusCode` values
pub const SADAD_STATUS_CODES: &[CodeEntry] = &[
    CodeEntry {
        code: "0",
        category: Success,
        message: "Transaction committed successfully",
        localized: "تراکنش با موفقیت ثبت شد",
        retryable: false,
        expected_status: Some("commit"),
    },
    entry("1", Failed, "Payment was canceled by the payer", "پرداخت توسط کاربر لغو شد", false),
    entry("2", Failed, "Transaction declined by the issuing bank", "تراکنش توسط بانک صادرکننده رد شد", false),
    entry("3", Failed, "Transaction reversed", "تراکنش برگشت خورده است", false),
    entry("4", Pending, "Transaction is still in progress", "تراکنش در حال پردازش است", true),
    entry("101", Failed, "Invalid merchant or terminal", "پذیرنده یا ترمینال نامعتبر است", false),
    entry("102", Failed, "Amount mismatch", "مبلغ تراکنش مطابقت ندارد", false),
    entry("103", Failed, "Request key not found", "کلید درخواست یافت نشد", false),
];
