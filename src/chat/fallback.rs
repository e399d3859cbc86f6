//! User-facing replies for turns that could not be answered.

use crate::llm::LlmError;

pub const TIMEOUT: &str = "Pieprasījuma laiks beidzās. Lūdzu, mēģiniet vēlāk.";
pub const CONNECTION: &str = "Radās kļūda savienojoties ar asistentu. Lūdzu, pārbaudiet interneta savienojumu un mēģiniet vēlāk.";
pub const ASSISTANT_ERROR: &str =
    "Diemžēl radās kļūda sazinoties ar asistentu. Lūdzu, mēģiniet vēlāk.";
pub const EMPTY_REPLY: &str = "Neizdevās saņemt atbildi. Lūdzu, mēģiniet vēlāk.";
pub const UNEXPECTED: &str = "Radās neparedzēta kļūda. Lūdzu, mēģiniet vēlāk.";

/// Reply shown for a failed completion. Status codes and bodies stay in the log.
pub fn for_error(err: &LlmError) -> &'static str {
    match err {
        LlmError::Timeout => TIMEOUT,
        LlmError::Connection(_) => CONNECTION,
        LlmError::Status { .. } | LlmError::Malformed(_) => ASSISTANT_ERROR,
        LlmError::Other(_) => UNEXPECTED,
    }
}
