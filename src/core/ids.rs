//! Identity generator for new records.

use uuid::Uuid;

/// New 36-character UUID v4 drawn from the OS CSPRNG.
pub fn generate_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
