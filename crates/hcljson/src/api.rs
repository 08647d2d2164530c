//! text in, text out
//!
//! Entry points for hosts that only exchange strings (foreign function interfaces, scripting bindings). Every call
//! returns JSON text, an error or both. A panic inside of a conversion is caught and reported as
//! [Error::Panic] instead of unwinding into the host.
//!
//! A stack overflow is not a panic and can not be caught. The parser recurses once per nesting level, so very deeply
//! nested input can abort the process before [crate::convert::Options::max_depth] is ever checked.
use crate::convert::{ConvertError, Options};
use crate::document::{Diagnostics, HclDocument};
use crate::value::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid HCL: {0}")]
    Syntax(#[from] hcl_edit::parser::Error),
    #[error("unable to convert HCL to JSON: {0}")]
    Conversion(#[from] ConvertError),
    #[error("invalid HCL: {0}")]
    Diagnostics(#[from] Diagnostics),
    #[error("unable to encode JSON: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("panic HCL: {0}")]
    Panic(String),
}

/// Result of [convert_top_level_attributes]
///
/// Both fields can be set at the same time, `json` then holds every attribute that converted.
#[derive(Debug)]
pub struct PartialJson {
    pub json: Option<String>,
    pub error: Option<Error>,
}

/// Parses and converts a whole document into JSON text
pub fn convert_document(text: &str, keep_interpolation: bool) -> Result<String, Error> {
    let options = Options::default().keep_interpolation(keep_interpolation);
    convert_document_with(text, &options)
}

pub fn convert_document_with(text: &str, options: &Options) -> Result<String, Error> {
    guarded(|| {
        let document = HclDocument::parse(text)?;
        let object = document.convert(options)?;
        Ok(serde_json::to_string(&Value::Object(object))?)
    })
}

/// Parses a document and converts its root attributes into JSON text
pub fn convert_top_level_attributes(text: &str) -> PartialJson {
    let result = guarded(|| {
        let document = HclDocument::parse(text)?;
        let (object, diagnostics) = document.convert_top_level_attributes(&Options::default());
        let json = serde_json::to_string(&Value::Object(object))?;
        Ok((json, diagnostics))
    });

    match result {
        Ok((json, diagnostics)) if diagnostics.is_empty() => PartialJson {
            json: Some(json),
            error: None,
        },
        Ok((json, diagnostics)) => PartialJson {
            json: Some(json),
            error: Some(diagnostics.into()),
        },
        Err(error) => PartialJson {
            json: None,
            error: Some(error),
        },
    }
}

/// Checks the syntax of a document
pub fn validate(text: &str) -> Result<(), Error> {
    guarded(|| {
        HclDocument::parse(text)?;
        Ok(())
    })
}

/// Runs `f` and turns a panic into [Error::Panic]
fn guarded<T>(f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let cause = if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown cause".to_string()
        };

        tracing::error!(%cause, "conversion panicked");
        Err(Error::Panic(cause))
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_document() {
        assert_eq!(
            convert_document(r#"variable "test" {}"#, false).unwrap(),
            r#"{"variable":{"test":{}}}"#
        );
    }

    #[test]
    fn syntax_error_message() {
        let error = convert_document(r#"variable "test {}"#, false).unwrap_err();
        assert!(matches!(error, Error::Syntax(_)));
        assert!(error.to_string().starts_with("invalid HCL: "));
    }

    #[test]
    fn conflict_message() {
        let error = convert_document("foo = 1\nfoo \"x\" {}", false).unwrap_err();
        assert_eq!(
            error.to_string(),
            "unable to convert HCL to JSON: unable to convert Block to JSON: foo.x"
        );
    }

    #[test]
    fn partial_attributes() {
        let result = convert_top_level_attributes("a = 1\nb = c\n");
        assert_eq!(result.json.as_deref(), Some(r#"{"a":1}"#));

        let error = result.error.expect("must report `b`").to_string();
        assert!(error.starts_with("invalid HCL: "), "{error}");
        assert!(error.contains("`b`"), "{error}");
    }

    #[test]
    fn attributes_syntax_error() {
        let result = convert_top_level_attributes("<var = ?>");
        assert!(result.json.is_none());
        assert!(matches!(result.error, Some(Error::Syntax(_))));
    }

    #[test]
    fn validate_document() {
        assert!(validate("a = 1").is_ok());
        assert!(validate("a = ").is_err());
    }

    #[test]
    fn panic_is_reported() {
        let error = guarded::<()>(|| panic!("boom")).unwrap_err();
        assert_eq!(error.to_string(), "panic HCL: boom");

        let error = guarded::<()>(|| panic!("{} {}", "formatted", 1)).unwrap_err();
        assert_eq!(error.to_string(), "panic HCL: formatted 1");
    }
}
