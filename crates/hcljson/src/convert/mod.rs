//! hcl syntax tree to [Value] projection
//!
//! [Converter] walks a parsed [hcl_edit::structure::Body] and produces a JSON compatible [Value]. Nothing is
//! evaluated except literals (and unary operations on literals). Every expression that can not be reduced to a
//! literal is kept as its normalized source text, see [crate::source::SourceText].
//!
//! - expressions: [expression]
//! - string templates, `%{if}` and `%{for}` directives: [template]
//! - bodies and the block merge rules: [body]
use crate::source::SourceText;
use crate::value::Value;
use hcl_edit::expr::{Expression, TraversalOperator};
use hcl_edit::Span;

pub mod body;
pub mod expression;
pub mod template;

/// Default for [Options::max_depth]
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Conversion settings
#[derive(Debug, Clone)]
pub struct Options {
    /// Wrap variable references inside of templates (and bare references) in `${...}`
    pub keep_interpolation: bool,

    /// Maximum nesting of expressions and block bodies
    ///
    /// Every level counts: the document body, each block body, each expression down to the leaf literal and each
    /// template part. `a = [[1]]` needs a depth of 4.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keep_interpolation: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    pub fn keep_interpolation(mut self, keep_interpolation: bool) -> Self {
        self.keep_interpolation = keep_interpolation;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Converts expressions and bodies of a single document
///
/// Borrows the source the syntax tree was parsed from, it is needed to re-serialize expressions.
#[derive(derive_new::new, Debug, Clone, Copy)]
pub struct Converter<'s> {
    source: SourceText<'s>,
    options: &'s Options,
}

impl<'s> Converter<'s> {
    /// Normalized source text of an expression
    ///
    /// Expressions that were not emitted by the parser have no span, these are encoded instead.
    pub(crate) fn source_text(&self, expr: &Expression) -> String {
        if let Some(text) = expr.span().and_then(|range| self.source.extract(range)) {
            return text;
        }

        tracing::trace!("no usable span, encoding expression");
        crate::source::normalize(expr.to_string().as_bytes())
    }

    /// Source text of a variable reference, `${...}` wrapped when interpolations are kept
    pub(crate) fn traversal_text(&self, expr: &Expression) -> String {
        let text = self.source_text(expr);
        if self.options.keep_interpolation {
            format!("${{{text}}}")
        } else {
            text
        }
    }

    /// Fallback for expressions that are neither literals nor containers
    pub(crate) fn verbatim(&self, expr: &Expression) -> Value {
        if is_variable_reference(expr) {
            self.traversal_text(expr).into()
        } else {
            self.source_text(expr).into()
        }
    }

    /// Returns the next depth or fails when it exceeds [Options::max_depth]
    pub(crate) fn descend(&self, depth: usize) -> Result<usize, ConvertError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            tracing::debug!(depth, "maximum depth exceeded");
            return Err(ConvertError::DepthExceeded(self.options.max_depth));
        }

        Ok(depth)
    }
}

/// A variable or a static path below one: `var.name`, `local.list[0].name`, `var.map["key"]`
///
/// Traversals of calls or parentheses, computed indexes (`foo[var.i]`) and splats are not references.
pub(crate) fn is_variable_reference(expr: &Expression) -> bool {
    match expr {
        Expression::Variable(_) => true,
        Expression::Traversal(traversal) => {
            matches!(traversal.expr, Expression::Variable(_))
                && traversal
                    .operators
                    .iter()
                    .all(|operator| match operator.value() {
                        TraversalOperator::GetAttr(_) | TraversalOperator::LegacyIndex(_) => true,
                        TraversalOperator::Index(key) => {
                            matches!(key, Expression::Number(_) | Expression::String(_))
                        }
                        TraversalOperator::AttrSplat(_) | TraversalOperator::FullSplat(_) => false,
                    })
        }
        _ => false,
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// A labeled block collides with a value that is not an object
    #[error("unable to convert Block to JSON: {path}")]
    MergeConflict { path: String },
    #[error("unable to evaluate `{expression}`: {error}")]
    Evaluation {
        expression: String,
        error: hcl::eval::Error,
    },
    #[error("maximum nesting depth of {0} exceeded")]
    DepthExceeded(usize),
}
