// Error Encoder Port - hides sensitive detail from clients

use tracing::error;

/// Turns a plain diagnostic into the text placed in `data.debug`
pub trait ErrorEncoder: Send + Sync {
    fn encode(&self, plain: &str) -> String;
}

/// Debug mode: clients see the plain text
pub struct PlainEncoder;

impl ErrorEncoder for PlainEncoder {
    fn encode(&self, plain: &str) -> String {
        plain.to_string()
    }
}

/// Production mode: the plain text only goes to the log, clients get a
/// reference id to quote when reporting the failure
pub struct ReferenceEncoder;

impl ErrorEncoder for ReferenceEncoder {
    fn encode(&self, plain: &str) -> String {
        let reference = uuid::Uuid::new_v4();
        error!(reference = %reference, detail = %plain, "Redacted error detail");
        format!("ref:{}", reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        assert_eq!(PlainEncoder.encode("db down"), "db down");
    }

    #[test]
    fn test_reference_hides_detail() {
        let a = ReferenceEncoder.encode("password=hunter2");
        let b = ReferenceEncoder.encode("password=hunter2");
        assert!(a.starts_with("ref:"));
        assert!(!a.contains("hunter2"));
        assert_ne!(a, b);
    }
}
