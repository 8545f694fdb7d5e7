use crate::render::{Render, Template};
use crate::schema::Property;
use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// The scalar type documented for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

impl ParameterType {
    /// Best-effort classification of a textual value.
    ///
    /// Integer and decimal literals, optionally signed and with an exponent, are
    /// [`Number`](Self::Number); exactly `true` or `false` is
    /// [`Boolean`](Self::Boolean); anything else, including `NaN` and `inf`, is
    /// [`String`](Self::String).
    pub fn infer(value: &str) -> Self {
        match value {
            "true" | "false" => Self::Boolean,
            v if is_number(v) => Self::Number,
            _ => Self::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_number(value: &str) -> bool {
    let mut chars = value.chars().peekable();

    chars.next_if(|c| matches!(*c, '+' | '-'));
    let int_digits = count_digits(&mut chars);
    let frac_digits = if chars.next_if_eq(&'.').is_some() { count_digits(&mut chars) } else { 0 };
    if int_digits + frac_digits == 0 {
        return false;
    }

    if chars.next_if(|c| matches!(*c, 'e' | 'E')).is_some() {
        chars.next_if(|c| matches!(*c, '+' | '-'));
        if count_digits(&mut chars) == 0 {
            return false;
        }
    }

    chars.next().is_none()
}

fn count_digits(chars: &mut Peekable<Chars<'_>>) -> usize {
    let mut count = 0;
    while chars.next_if(char::is_ascii_digit).is_some() {
        count += 1;
    }
    count
}

/// The textual value a client sent for an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterValue(String);

impl ParameterValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One documented request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    description: String,
    value: ParameterValue,
    parameter_type: ParameterType,
    required: bool,
    default_value: String,
}

impl Attribute {
    /// Builds an attribute from a value and the schema metadata of its field,
    /// inferring the type from the value.
    pub fn new<N: Into<String>, V: Into<ParameterValue>>(name: N, value: V, property: Property) -> Self {
        let value = value.into();
        let parameter_type = ParameterType::infer(value.as_str());
        let (description, required, default_value) = property.into_parts();
        Self { name: name.into(), description, value, parameter_type, required, default_value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }
}

/// `+ name: `value` (type, required) - description`, then an optional
/// `+ Default:` line one level deeper.
impl Render for Attribute {
    fn render_to(&self, template: &Template, out: &mut String) {
        let requirement = if self.required { "required" } else { "optional" };

        out.push_str(&template.indent(2));
        out.push_str("+ ");
        out.push_str(&self.name);
        if !self.value.is_empty() {
            out.push_str(": `");
            out.push_str(&single_line(self.value.as_str()));
            out.push('`');
        }
        out.push_str(" (");
        out.push_str(self.parameter_type.as_str());
        out.push_str(", ");
        out.push_str(requirement);
        out.push(')');
        if !self.description.is_empty() {
            out.push_str(" - ");
            out.push_str(&self.description);
        }
        out.push('\n');

        if !self.default_value.is_empty() {
            out.push_str(&template.indent(3));
            out.push_str("+ Default: `");
            out.push_str(&single_line(&self.default_value));
            out.push_str("`\n");
        }
    }
}

fn single_line(value: &str) -> Cow<'_, str> {
    if value.chars().any(char::is_control) {
        Cow::Owned(value.chars().map(|c| if c.is_control() { c.escape_default().to_string() } else { c.to_string() }).collect())
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_numbers() {
        for value in ["1", "-1", "+42", "3.14", "0.5", ".5", "1.", "1e10", "-2.5E-3"] {
            assert_eq!(ParameterType::infer(value), ParameterType::Number, "{value}");
        }
    }

    #[test]
    fn infer_booleans() {
        assert_eq!(ParameterType::infer("true"), ParameterType::Boolean);
        assert_eq!(ParameterType::infer("false"), ParameterType::Boolean);
        assert_eq!(ParameterType::infer("True"), ParameterType::String);
    }

    #[test]
    fn infer_strings() {
        for value in ["", "z", "-", ".", "1e", "1.2.3", "NaN", "inf", "12abc", " 1", "0x10", "[1,2]"] {
            assert_eq!(ParameterType::infer(value), ParameterType::String, "{value:?}");
        }
    }

    #[test]
    fn attribute_from_property() {
        let attribute = Attribute::new("zip", "12345", Property::new("postal code").required(true).with_default("00000"));

        assert_eq!(attribute.name(), "zip");
        assert_eq!(attribute.value().as_str(), "12345");
        assert_eq!(attribute.parameter_type(), ParameterType::Number);
        assert_eq!(attribute.description(), "postal code");
        assert!(attribute.is_required());
        assert_eq!(attribute.default_value(), "00000");
    }

    #[test]
    fn render_attribute() {
        let template = Template::default();

        let plain = Attribute::new("y", "z", Property::default());
        assert_eq!(plain.render(&template), "        + y: `z` (string, optional)\n");

        let described = Attribute::new("page", "2", Property::new("page number").required(true).with_default("1"));
        assert_eq!(
            described.render(&template),
            "        + page: `2` (number, required) - page number\n            + Default: `1`\n"
        );
    }

    #[test]
    fn render_multiline_value_on_one_line() {
        let attribute = Attribute::new("note", "a\r\nb", Property::default());

        assert_eq!(attribute.render(&Template::default()), "        + note: `a\\r\\nb` (string, optional)\n");
    }
}
