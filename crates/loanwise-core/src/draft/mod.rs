//! Application draft builder: form field accumulation, document slots, and
//! submittability validation.

pub mod model;
mod validate;

pub use model::{
    DocumentAttachment, DocumentSlot, DraftField, LoanApplicationDraft, LoanSubmission,
    SubmissionDocument,
};
