use crate::error::CallableError;

pub struct Guard {}

impl Guard {
    /// Trimmed value of a required text field
    pub fn against_blank(field: &str, val: Option<&str>) -> Result<String, CallableError> {
        match val.map(str::trim) {
            Some(val) if !val.is_empty() => Ok(val.to_string()),
            _ => Err(CallableError::InvalidArgument(format!(
                "The `{}` field is required.",
                field
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_missing_and_blank_values() {
        assert!(Guard::against_blank("title", None).is_err());
        assert!(Guard::against_blank("title", Some("  ")).is_err());
        assert_eq!(
            Guard::against_blank("title", Some(" Hi ")).unwrap(),
            "Hi".to_string()
        );
    }
}
