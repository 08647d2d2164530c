//! expression conversion
//!
//! | expression                              | result                                          |
//! |-----------------------------------------|-------------------------------------------------|
//! | `null`, `true`, `42`, `"text"`          | the literal                                     |
//! | `-5`, `!true` (operand is a literal)    | the evaluated literal                           |
//! | `"${expr}"` (single interpolation)      | `expr`, converted as if it was not quoted       |
//! | `"a${b}"`, heredocs                     | string, see [super::template]                   |
//! | `[...]`                                 | array                                           |
//! | `{...}`                                 | object                                          |
//! | `var.name`, `var.list[0]`               | source text, `${...}` with `keep_interpolation` |
//! | anything else                           | source text                                     |
use super::{ConvertError, Converter};
use crate::value::{Map, Value};
use hcl::eval::Evaluate;
use hcl_edit::expr::{Expression, Object, ObjectKey};
use hcl_edit::template::{Element, Template};

impl<'s> Converter<'s> {
    /// Converts an expression into a [Value]
    pub fn expression(&self, expr: &Expression, depth: usize) -> Result<Value, ConvertError> {
        let depth = self.descend(depth)?;

        match expr {
            Expression::Null(_) => Ok(Value::Null),
            Expression::Bool(value) => Ok((*value.value()).into()),
            Expression::Number(number) => {
                let number = number.value();
                Ok(Value::number(number.as_i64(), number.as_f64()))
            }
            Expression::String(value) => Ok(value.value().as_str().into()),
            Expression::UnaryOp(unary) => self.unary(expr, &unary.expr),
            Expression::StringTemplate(template) => match wrapped_expression(template) {
                Some(wrapped) => self.expression(wrapped, depth),
                None => Ok(self.template(template, depth)?.into()),
            },
            Expression::HeredocTemplate(heredoc) => {
                Ok(self.template(&heredoc.template, depth)?.into())
            }
            Expression::Array(array) => array
                .iter()
                .map(|element| self.expression(element, depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expression::Object(object) => self.object(object, depth).map(Value::Object),
            _ => Ok(self.verbatim(expr)),
        }
    }

    /// Unary operations are evaluated when applied to a literal
    fn unary(&self, expr: &Expression, operand: &Expression) -> Result<Value, ConvertError> {
        if !is_literal(operand) {
            return Ok(self.source_text(expr).into());
        }

        let evaluable: hcl::Expression = expr.clone().into();
        let value = evaluable
            .evaluate(&hcl::eval::Context::new())
            .map_err(|error| ConvertError::Evaluation {
                expression: self.source_text(expr),
                error,
            })?;

        tracing::trace!(?value, "evaluated unary operation");
        Ok(value.into())
    }

    /// Object constructor, later keys overwrite earlier ones
    fn object(&self, object: &Object, depth: usize) -> Result<Map, ConvertError> {
        let mut out = Map::new();
        for (key, value) in object.iter() {
            let key = self.object_key(key, depth)?;
            let value = self.expression(value.expr(), depth)?;
            out.insert(key, value);
        }

        Ok(out)
    }

    /// Object keys are static, a reference used as key is taken literally and never resolved
    pub(crate) fn object_key(&self, key: &ObjectKey, depth: usize) -> Result<String, ConvertError> {
        match key {
            ObjectKey::Ident(ident) => Ok(ident.value().as_str().to_owned()),
            ObjectKey::Expression(expr @ (Expression::Variable(_) | Expression::Traversal(_))) => {
                Ok(self.source_text(expr))
            }
            ObjectKey::Expression(expr) => self.string_part(expr, depth),
        }
    }
}

/// `"${expr}"`: a template that is nothing but a single interpolation
fn wrapped_expression(template: &Template) -> Option<&Expression> {
    let mut elements = template.iter();
    match (elements.next(), elements.next()) {
        (Some(Element::Interpolation(interpolation)), None) => Some(&interpolation.expr),
        _ => None,
    }
}

fn is_literal(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::Null(_) | Expression::Bool(_) | Expression::Number(_) | Expression::String(_)
    )
}
