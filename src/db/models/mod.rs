pub mod record;

pub use record::{NewRecord, Record, StoredSubmission, SubmissionHeader};
