//! string templates
//!
//! Templates that only consist of literal text become that text. All other templates are rendered part by part,
//! dynamic parts are written back as template syntax instead of being evaluated:
//!
//! ```hcl
//! a = "Hello ${var.name}!"                                 # Hello var.name!  (or Hello ${var.name}!)
//! b = "%{ if var.x }yes%{ else }no%{ endif }"              # %{if var.x}yes%{else}no%{endif}
//! c = "%{ for k, v in var.map }${k}=${v} %{ endfor }"      # %{for k, v in var.map}k=v %{endfor}
//! d = "-${var.x ? "yes" : ""}"                             # -%{if var.x}yes%{endif}
//! ```
use super::{is_variable_reference, ConvertError, Converter};
use hcl_edit::expr::{Conditional, Expression};
use hcl_edit::template::{Directive, Element, ForDirective, IfDirective, Template};

impl<'s> Converter<'s> {
    /// Renders a template (quoted or heredoc) into a single string
    pub fn template(&self, template: &Template, depth: usize) -> Result<String, ConvertError> {
        let mut rendered = String::new();
        for element in template.iter() {
            rendered.push_str(&self.element(element, depth)?);
        }

        Ok(rendered)
    }

    fn element(&self, element: &Element, depth: usize) -> Result<String, ConvertError> {
        match element {
            Element::Literal(literal) => Ok(literal.value().clone()),
            Element::Interpolation(interpolation) => self.string_part(&interpolation.expr, depth),
            Element::Directive(directive) => self.directive(directive, depth),
        }
    }

    /// Converts an expression used inside of a template into text
    pub(crate) fn string_part(&self, expr: &Expression, depth: usize) -> Result<String, ConvertError> {
        let depth = self.descend(depth)?;

        match expr {
            Expression::Bool(value) => Ok(value.value().to_string()),
            Expression::Number(number) => Ok(number.value().to_string()),
            Expression::String(value) => Ok(value.value().clone()),
            Expression::StringTemplate(template) => self.template(template, depth),
            Expression::HeredocTemplate(heredoc) => self.template(&heredoc.template, depth),
            Expression::Conditional(conditional) => self.conditional(conditional, depth),
            _ if is_variable_reference(expr) => Ok(self.traversal_text(expr)),
            _ => Ok(self.source_text(expr)),
        }
    }

    fn directive(&self, directive: &Directive, depth: usize) -> Result<String, ConvertError> {
        let depth = self.descend(depth)?;

        match directive {
            Directive::If(if_directive) => self.if_directive(if_directive, depth),
            Directive::For(for_directive) => self.for_directive(for_directive, depth),
        }
    }

    /// `${cond ? a : b}` is written as `%{if}` directive
    fn conditional(&self, conditional: &Conditional, depth: usize) -> Result<String, ConvertError> {
        let true_part = self.string_part(&conditional.true_expr, depth)?;
        let false_part = self.string_part(&conditional.false_expr, depth)?;

        Ok(render_if(
            &self.source_text(&conditional.cond_expr),
            &true_part,
            &false_part,
        ))
    }

    fn if_directive(&self, directive: &IfDirective, depth: usize) -> Result<String, ConvertError> {
        let true_part = self.template(&directive.if_expr.template, depth)?;
        let false_part = match &directive.else_expr {
            Some(else_expr) => self.template(&else_expr.template, depth)?,
            None => String::new(),
        };

        Ok(render_if(
            &self.source_text(&directive.if_expr.cond_expr),
            &true_part,
            &false_part,
        ))
    }

    fn for_directive(&self, directive: &ForDirective, depth: usize) -> Result<String, ConvertError> {
        let for_expr = &directive.for_expr;

        let mut rendered = String::from("%{for ");
        if let Some(key_var) = &for_expr.key_var {
            rendered.push_str(key_var.value().as_str());
            rendered.push_str(", ");
        }
        rendered.push_str(for_expr.value_var.value().as_str());
        rendered.push_str(" in ");
        rendered.push_str(&self.source_text(&for_expr.collection_expr));
        rendered.push('}');
        rendered.push_str(&self.template(&for_expr.template, depth)?);
        rendered.push_str("%{endfor}");

        Ok(rendered)
    }
}

/// `%{else}` is left out when the false branch is empty
fn render_if(condition: &str, true_part: &str, false_part: &str) -> String {
    let mut rendered = format!("%{{if {condition}}}{true_part}");
    if !false_part.is_empty() {
        rendered.push_str("%{else}");
        rendered.push_str(false_part);
    }
    rendered.push_str("%{endif}");
    rendered
}

#[cfg(test)]
mod test {
    use crate::convert::Options;
    use crate::hcl_document;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn template_with(keep_interpolation: bool, input: &str) -> String {
        let document = hcl_document!(input);
        let options = Options::default().keep_interpolation(keep_interpolation);
        let mut object = document.convert(&options).expect("must convert");
        match object.swap_remove("a") {
            Some(Value::String(text)) => text,
            other => panic!("expected a string, got {other:?}"),
        }
    }

    fn template(input: &str) -> String {
        template_with(false, input)
    }

    #[test]
    fn interpolation() {
        assert_eq!(template_with(false, r#"a = "a${b}c""#), "abc");
        assert_eq!(template_with(true, r#"a = "a${b}c""#), "a${b}c");
        assert_eq!(
            template_with(true, r#"a = "x-${var.env}-${local.names[0]}""#),
            "x-${var.env}-${local.names[0]}"
        );
    }

    #[test]
    fn single_interpolation() {
        assert_eq!(template_with(false, r#"a = "${var.x}""#), "var.x");
        assert_eq!(template_with(true, r#"a = "${var.x}""#), "${var.x}");
    }

    #[test]
    fn literal_parts() {
        assert_eq!(template(r#"a = "n=${1}, b=${true}, s=${"x"}""#), "n=1, b=true, s=x");
    }

    #[test]
    fn embedded_expressions_are_source_text() {
        assert_eq!(template_with(true, r#"a = "v${upper( var.x )}""#), "vupper( var.x )");
        assert_eq!(template(r#"a = "${1 + var.y}""#), "1 + var.y");
    }

    #[test]
    fn computed_references_are_not_wrapped() {
        assert_eq!(template_with(true, r#"a = "-${foo[var.i]}-""#), "-foo[var.i]-");
        assert_eq!(template_with(true, r#"a = "-${foo[*].id}-""#), "-foo[*].id-");
        assert_eq!(template_with(true, r#"a = "-${upper(x).y}-""#), "-upper(x).y-");
        assert_eq!(template_with(true, r#"a = "-${foo[0].id}-""#), "-${foo[0].id}-");
    }

    #[test]
    fn if_directive() {
        assert_eq!(
            template(r#"a = "%{ if var.enabled }on%{ else }off%{ endif }""#),
            "%{if var.enabled}on%{else}off%{endif}"
        );
        assert_eq!(
            template(r#"a = "x%{ if var.enabled }on%{ endif }y""#),
            "x%{if var.enabled}on%{endif}y"
        );
    }

    #[test]
    fn if_directive_with_interpolated_branches() {
        assert_eq!(
            template_with(true, r#"a = "%{ if var.x == "a" }${var.y}%{ else }none%{ endif }""#),
            r#"%{if var.x == "a"}${var.y}%{else}none%{endif}"#
        );
    }

    #[test]
    fn conditional_interpolation() {
        assert_eq!(
            template(r#"a = "-${var.x ? "yes" : "no"}-""#),
            "-%{if var.x}yes%{else}no%{endif}-"
        );
        assert_eq!(
            template(r#"a = "-${var.x ? "yes" : ""}-""#),
            "-%{if var.x}yes%{endif}-"
        );
    }

    #[test]
    fn for_directive() {
        assert_eq!(
            template(r#"a = "%{ for k, v in var.tags }${k}=${v},%{ endfor }""#),
            "%{for k, v in var.tags}k=v,%{endfor}"
        );
        assert_eq!(
            template_with(true, r#"a = "%{ for name in var.names }<${name}>%{ endfor }""#),
            "%{for name in var.names}<${name}>%{endfor}"
        );
    }

    #[test]
    fn heredoc() {
        let input = "a = <<EOT\nhey\nyou\nEOT\n";
        assert_eq!(template(input), "hey\nyou\n");
    }

    #[test]
    fn heredoc_with_interpolation() {
        let input = "a = <<EOT\nhello ${var.name}\nEOT\n";
        assert_eq!(template_with(true, input), "hello ${var.name}\n");
    }
}
