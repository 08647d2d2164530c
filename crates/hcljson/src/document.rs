//! a parsed hcl document ([Body] and the source text it was parsed from)
//!
//! [HclDocument] keeps the source around since every expression that is not converted into a literal is written
//! back as (normalized) source text.
//!
//! Two conversions are offered:
//! - [HclDocument::convert]: the whole body, all or nothing
//! - [HclDocument::convert_top_level_attributes]: root attributes only (think `.tfvars`), every attribute that fails
//!   is reported as [Issue] and left out while the others are still converted
use crate::convert::{ConvertError, Converter, Options};
use crate::source::SourceText;
use crate::value::Map;
use hcl::eval::Evaluate;
use hcl_edit::structure::{Body, Structure};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct HclDocument {
    source: String,
    path: Option<PathBuf>,
    body: Body,
}

impl HclDocument {
    /// Parses a document
    pub fn parse(source: impl Into<String>) -> Result<Self, hcl_edit::parser::Error> {
        let source = source.into();
        let body = hcl_edit::parser::parse_body(&source)?;

        Ok(Self {
            source,
            path: None,
            body,
        })
    }

    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading file");

        let file_contents = std::fs::read_to_string(&file_path)?;
        let mut document = Self::parse(file_contents)?;
        document.path = Some(file_path);
        Ok(document)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn converter<'s>(&'s self, options: &'s Options) -> Converter<'s> {
        Converter::new(SourceText::new(&self.source), options)
    }

    /// Converts attributes and blocks of the document into one object
    pub fn convert(&self, options: &Options) -> Result<Map, ConvertError> {
        self.converter(options).body(&self.body, 0)
    }

    /// Converts the root attributes only
    ///
    /// Each attribute is evaluated without any variables or functions first, an attribute that does not evaluate
    /// (references, function calls, ...) is reported and skipped. Blocks are reported and skipped as well.
    pub fn convert_top_level_attributes(&self, options: &Options) -> (Map, Diagnostics) {
        let converter = self.converter(options);
        let context = hcl::eval::Context::new();

        let mut out = Map::new();
        let mut diagnostics = Diagnostics::new();

        for structure in self.body.iter() {
            let attribute = match structure {
                Structure::Attribute(attribute) => attribute,
                Structure::Block(block) => {
                    diagnostics.log(Issue::BlockNotAllowed(block.ident.value().to_string()));
                    continue;
                }
            };

            let key = attribute.key.value().to_string();

            let evaluable: hcl::Expression = attribute.value.clone().into();
            if let Err(error) = evaluable.evaluate(&context) {
                diagnostics.log(Issue::Evaluation {
                    attribute: key,
                    message: error.to_string(),
                });
                continue;
            }

            match converter.expression(&attribute.value, 0) {
                Ok(value) => {
                    out.insert(key, value);
                }
                Err(error) => diagnostics.log(Issue::Conversion {
                    attribute: key,
                    error,
                }),
            }
        }

        (out, diagnostics)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse hcl file")]
    HclParseFailed(#[from] hcl_edit::parser::Error),
}

/// Utility macro to create a [HclDocument]
///
/// ```
/// # use hcljson::hcl_document;
/// let document = hcl_document!("attribute = 42");
/// assert_eq!(document.body().attributes().count(), 1);
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use hcljson::hcl_document;
/// hcl_document!("not = valid = hcl");
/// ```
#[macro_export]
macro_rules! hcl_document {
    { $expr:expr } => {
        $crate::document::HclDocument::parse($expr).expect("document must parse")
    };
}

/// Non-fatal issues collected by [HclDocument::convert_top_level_attributes]
#[derive(derive_new::new, Debug, Default)]
pub struct Diagnostics {
    #[new(default)]
    issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn log(&mut self, issue: Issue) {
        tracing::trace!(?issue, "issue found");
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

impl std::error::Error for Diagnostics {}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Issue {
    #[error("Blocks are not allowed: `{0}`")]
    BlockNotAllowed(String),
    /// Not a static value, variables and function calls are not available
    #[error("Variables not allowed or value not static in `{attribute}`: {message}")]
    Evaluation { attribute: String, message: String },
    #[error("unable to convert `{attribute}`: {error}")]
    Conversion {
        attribute: String,
        error: ConvertError,
    },
}
