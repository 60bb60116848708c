use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value type tags understood by the Emscripten `cwrap` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Array,
}

impl ValueType {
    pub fn tag(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Return type plus ordered argument types of an exported symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    pub ret: ValueType,
    pub args: Vec<ValueType>,
}

impl Signature {
    pub fn new(ret: ValueType, args: impl Into<Vec<ValueType>>) -> Self {
        Self {
            ret,
            args: args.into(),
        }
    }

    /// `number(number, number)`, the only shape a [`BoundFunction`] can carry.
    ///
    /// [`BoundFunction`]: crate::bound::BoundFunction
    pub fn binary_numeric() -> Self {
        Self::new(ValueType::Number, [ValueType::Number, ValueType::Number])
    }

    pub fn is_binary_numeric(&self) -> bool {
        self.ret == ValueType::Number
            && self.args.len() == 2
            && self.args.iter().all(|t| *t == ValueType::Number)
    }

    pub fn arg_tags(&self) -> Vec<&'static str> {
        self.args.iter().map(|t| t.tag()).collect()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ret)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_the_cwrap_names() {
        let tags: Vec<_> = [
            ValueType::Number,
            ValueType::String,
            ValueType::Boolean,
            ValueType::Array,
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        assert_eq!(tags, vec!["number", "string", "boolean", "array"]);
    }

    #[test]
    fn binary_numeric_shape() {
        let sig = Signature::binary_numeric();
        assert!(sig.is_binary_numeric());
        assert_eq!(sig.arg_tags(), vec!["number", "number"]);
        assert_eq!(sig.to_string(), "number(number, number)");

        let unary = Signature::new(ValueType::Number, [ValueType::Number]);
        assert!(!unary.is_binary_numeric());

        let stringy = Signature::new(ValueType::String, [ValueType::Number, ValueType::Number]);
        assert!(!stringy.is_binary_numeric());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_cwrap_tags() {
        let json = serde_json::to_string(&Signature::binary_numeric()).unwrap();
        assert_eq!(json, r#"{"ret":"number","args":["number","number"]}"#);
    }
}
