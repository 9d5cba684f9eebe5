/*!
# JSON AST

Defines the [`Value`] sum type produced by parsing a JSON sample document
and consumed/produced by the union engine, together with its type-test
predicates and array homogeneity helpers.

Exactly one variant is ever active (the enum makes the parser and union
code exhaustiveness-checkable). Primitive leaves carry their raw literal
text plus a nullability flag; `Null` instead carries a conflict flag set
when the union engine discovers two incompatible concrete types. Containers
carry no nullability flag of their own.

Trees are immutable once built: parsing constructs them bottom-up, and the
union engine only ever allocates fresh result nodes.
*/
use std::collections::BTreeSet;

/// A primitive leaf (`false`, `true`, number, or string): the raw matched
/// text and whether the value was ever observed as null across samples.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Literal {
    /// Exact literal text as it appeared in the input (numbers are never
    /// converted, so round-tripping precision is possible downstream).
    pub text: String,
    /// Whether a merged sample held `null` where this value appeared.
    pub nullable: bool,
}

/// The `null` leaf.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Null {
    /// Set by the union engine when two fundamentally incompatible concrete
    /// types met at this position ("any"). A plain `null` observed in a
    /// sample has `conflict == false`.
    pub conflict: bool,
}

/// One `key: value` pair of an object, in document order.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Member {
    pub key: String,
    pub value: Value,
}

impl Member {
    #[must_use]
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// An object: ordered members plus the set of keys the union engine has
/// observed to be absent in at least one operand of a merge step.
///
/// `omittable` is empty on freshly parsed documents and always a subset of
/// the member key set.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Object {
    pub members: Vec<Member>,
    pub omittable: BTreeSet<String>,
}

impl Object {
    /// Look up a member's value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|m| m.key == key)
            .map(|m| &m.value)
    }

    /// Member keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.key.as_str())
    }
}

/// An array: ordered elements.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Array {
    pub elements: Vec<Value>,
}

/// Primary JSON AST definition: a tagged union with exactly one active
/// variant.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Value {
    /// The literal `false`
    False(Literal),
    /// The literal `null`, or the union engine's conflict sentinel
    Null(Null),
    /// The literal `true`
    True(Literal),
    /// A JSON object
    Object(Object),
    /// A JSON array
    Array(Array),
    /// A number, kept as raw text
    Number(Literal),
    /// A string
    String(Literal),
}

/// Explicit constructors. These are the only way to obtain nullable leaves
/// or a conflict `Null`, for production code and tests alike.
impl Value {
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(Literal {
            text: text.into(),
            nullable: false,
        })
    }

    #[must_use]
    pub fn nullable_string(text: impl Into<String>) -> Self {
        Self::String(Literal {
            text: text.into(),
            nullable: true,
        })
    }

    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::Number(Literal {
            text: text.into(),
            nullable: false,
        })
    }

    #[must_use]
    pub fn nullable_number(text: impl Into<String>) -> Self {
        Self::Number(Literal {
            text: text.into(),
            nullable: true,
        })
    }

    #[must_use]
    pub fn bool_true() -> Self {
        Self::True(Literal {
            text: "true".to_string(),
            nullable: false,
        })
    }

    #[must_use]
    pub fn bool_false() -> Self {
        Self::False(Literal {
            text: "false".to_string(),
            nullable: false,
        })
    }

    #[must_use]
    pub fn nullable_true() -> Self {
        Self::True(Literal {
            text: "true".to_string(),
            nullable: true,
        })
    }

    #[must_use]
    pub fn nullable_false() -> Self {
        Self::False(Literal {
            text: "false".to_string(),
            nullable: true,
        })
    }

    /// An ordinary `null` as observed in a sample.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null(Null { conflict: false })
    }

    /// The union engine's unrepresentable-union sentinel.
    #[must_use]
    pub const fn conflict_null() -> Self {
        Self::Null(Null { conflict: true })
    }

    /// A freshly built object; its omittable set starts empty.
    #[must_use]
    pub fn object(members: Vec<Member>) -> Self {
        Self::Object(Object {
            members,
            omittable: BTreeSet::new(),
        })
    }

    #[must_use]
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::Array(Array { elements })
    }
}

/// Type-test predicates and per-variant accessors.
impl Value {
    #[must_use]
    pub const fn is_false(&self) -> bool {
        matches!(self, Self::False(_))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True(_))
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// True for every leaf variant; false for objects and arrays.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Compares only the active variant tag, ignoring nullability and
    /// content.
    #[must_use]
    pub fn same_type_as(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// The nullability flag of a primitive leaf. `Null` and containers do
    /// not carry one and report false.
    #[must_use]
    pub const fn nullable(&self) -> bool {
        match self {
            Self::False(lit) | Self::True(lit) | Self::Number(lit) | Self::String(lit) => {
                lit.nullable
            }
            Self::Null(_) | Self::Object(_) | Self::Array(_) => false,
        }
    }

    #[must_use]
    pub const fn as_false(&self) -> Option<&Literal> {
        match self {
            Self::False(lit) => Some(lit),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_null(&self) -> Option<&Null> {
        match self {
            Self::Null(null) => Some(null),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_true(&self) -> Option<&Literal> {
        match self {
            Self::True(lit) => Some(lit),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<&Literal> {
        match self {
            Self::Number(lit) => Some(lit),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_string(&self) -> Option<&Literal> {
        match self {
            Self::String(lit) => Some(lit),
            _ => None,
        }
    }
}

/// Homogeneity helpers: `is_<x>_array` holds iff the array is non-empty and
/// every element has variant X — an empty array is never homogeneous of any
/// type. The matching extractor returns the typed element list only when
/// the test holds.
impl Array {
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn is_false_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_false)
    }

    #[must_use]
    pub fn false_array(&self) -> Option<Vec<&Literal>> {
        self.is_false_array()
            .then(|| self.elements.iter().filter_map(Value::as_false).collect())
    }

    #[must_use]
    pub fn is_null_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_null)
    }

    #[must_use]
    pub fn null_array(&self) -> Option<Vec<&Null>> {
        self.is_null_array()
            .then(|| self.elements.iter().filter_map(Value::as_null).collect())
    }

    #[must_use]
    pub fn is_true_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_true)
    }

    #[must_use]
    pub fn true_array(&self) -> Option<Vec<&Literal>> {
        self.is_true_array()
            .then(|| self.elements.iter().filter_map(Value::as_true).collect())
    }

    #[must_use]
    pub fn is_object_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_object)
    }

    #[must_use]
    pub fn object_array(&self) -> Option<Vec<&Object>> {
        self.is_object_array()
            .then(|| self.elements.iter().filter_map(Value::as_object).collect())
    }

    #[must_use]
    pub fn is_array_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_array)
    }

    #[must_use]
    pub fn array_array(&self) -> Option<Vec<&Self>> {
        self.is_array_array()
            .then(|| self.elements.iter().filter_map(Value::as_array).collect())
    }

    #[must_use]
    pub fn is_number_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_number)
    }

    #[must_use]
    pub fn number_array(&self) -> Option<Vec<&Literal>> {
        self.is_number_array()
            .then(|| self.elements.iter().filter_map(Value::as_number).collect())
    }

    #[must_use]
    pub fn is_string_array(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Value::is_string)
    }

    #[must_use]
    pub fn string_array(&self) -> Option<Vec<&Literal>> {
        self.is_string_array()
            .then(|| self.elements.iter().filter_map(Value::as_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_ignores_content_and_flags() {
        assert!(Value::string("a").same_type_as(&Value::nullable_string("b")));
        assert!(Value::null().same_type_as(&Value::conflict_null()));
        assert!(!Value::string("a").same_type_as(&Value::number("1")));
        assert!(!Value::bool_true().same_type_as(&Value::bool_false()));
    }

    #[test]
    fn primitives_and_containers() {
        assert!(Value::null().is_primitive());
        assert!(Value::number("1").is_primitive());
        assert!(!Value::object(vec![]).is_primitive());
        assert!(!Value::array(vec![]).is_primitive());
    }

    #[test]
    fn nullable_lives_on_leaves_only() {
        assert!(Value::nullable_number("1").nullable());
        assert!(!Value::number("1").nullable());
        assert!(!Value::null().nullable());
        assert!(!Value::array(vec![]).nullable());
    }

    #[test]
    fn empty_array_is_never_homogeneous() {
        let empty = Array { elements: vec![] };
        assert!(!empty.is_string_array());
        assert!(!empty.is_null_array());
        assert!(empty.string_array().is_none());
    }

    #[test]
    fn homogeneous_string_array() {
        let array = Array {
            elements: vec![Value::string("a"), Value::string("b")],
        };
        assert!(array.is_string_array());
        let texts: Vec<&str> = array
            .string_array()
            .unwrap()
            .iter()
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(!array.is_number_array());
        assert!(array.number_array().is_none());
    }

    #[test]
    fn mixed_array_is_not_homogeneous() {
        let array = Array {
            elements: vec![Value::string("a"), Value::number("1")],
        };
        assert!(!array.is_string_array());
        assert!(!array.is_number_array());
    }

    #[test]
    fn object_lookup_preserves_order() {
        let object = Object {
            members: vec![
                Member::new("b", Value::number("2")),
                Member::new("a", Value::number("1")),
            ],
            omittable: BTreeSet::new(),
        };
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(object.get("a"), Some(&Value::number("1")));
        assert_eq!(object.get("missing"), None);
    }
}
