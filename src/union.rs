/*!
# Union engine

Merges two [`Value`] trees into one, unifying their types. This is how a
set of sample documents becomes a single inferred shape: fields seen as
`null` in one sample become nullable, object keys missing from one sample
become omittable, arrays collapse to one generalized element type, and
positions where the samples hold fundamentally incompatible types become
the conflict sentinel `Null { conflict: true }`.

The engine is pure and total: it never mutates its inputs, never fails, and
has no error channel — "these samples disagree" is an informative result
for shape inference, not a failure.

## Examples

```rust
use jsonshape::parser::parse;

let a = parse("a.json", br#"{"id": 1, "name": "alice"}"#).unwrap();
let b = parse("b.json", br#"{"id": null, "tags": ["x"]}"#).unwrap();

let merged = a.union(Some(&b));
let object = merged.as_object().unwrap();

// "id" was null in the second sample
assert!(object.get("id").unwrap().nullable());
// "name" and "tags" each appeared in only one sample
assert!(object.omittable.contains("name"));
assert!(object.omittable.contains("tags"));
```
*/
use std::collections::{BTreeSet, HashMap};

use crate::ast::{Array, Literal, Member, Null, Object, Value};

impl Value {
    /// Merge this value with another sample's value at the same position,
    /// producing a fresh result tree.
    ///
    /// `None` models "no second sample yet" (the first document of a fold):
    /// arrays still fold their own elements into one generalized slot, every
    /// other variant comes back unchanged.
    ///
    /// Dispatch is on `self`'s variant; the rules are symmetric in effect,
    /// so `a.union(Some(&b))` and `b.union(Some(&a))` infer the same shape.
    #[must_use]
    pub fn union(&self, other: Option<&Self>) -> Self {
        let Some(other) = other else {
            return match self {
                Self::Array(array) => union_arrays(array, &Array::default()),
                _ => self.clone(),
            };
        };

        match self {
            Self::True(lit) => union_boolean(lit, other, true),
            Self::False(lit) => union_boolean(lit, other, false),
            Self::Null(null) => union_null(*null, other),
            Self::Number(lit) => {
                if other.is_number() || other.is_null() {
                    Self::Number(merge_literal(lit, other))
                } else {
                    Self::conflict_null()
                }
            }
            Self::String(lit) => {
                if other.is_string() || other.is_null() {
                    Self::String(merge_literal(lit, other))
                } else {
                    Self::conflict_null()
                }
            }
            Self::Array(array) => match other {
                Self::Null(_) => Self::Array(array.clone()),
                Self::Array(other) => union_arrays(array, other),
                _ => Self::conflict_null(),
            },
            Self::Object(object) => match other {
                Self::Null(_) => Self::Object(object.clone()),
                Self::Object(other) => union_objects(object, other),
                _ => Self::conflict_null(),
            },
        }
    }
}

/// Fold an ordered sequence of sample trees pairwise, left to right, into
/// one merged shape. Returns `None` for an empty sequence.
#[must_use]
pub fn union_all<I>(values: I) -> Option<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut iter = values.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |merged, next| merged.union(Some(&next))))
}

/// Keep `lit`'s text; the result is nullable if either side already was or
/// the other side is a plain `null`.
fn merge_literal(lit: &Literal, other: &Value) -> Literal {
    Literal {
        text: lit.text.clone(),
        nullable: lit.nullable || other.is_null() || other.nullable(),
    }
}

/// Booleans unify to self's own truth value, not an abstract "boolean".
fn union_boolean(lit: &Literal, other: &Value, truthy: bool) -> Value {
    if other.is_true() || other.is_false() || other.is_null() {
        let merged = merge_literal(lit, other);
        if truthy {
            Value::True(merged)
        } else {
            Value::False(merged)
        }
    } else {
        Value::conflict_null()
    }
}

/// Null absorbs into any concrete type, forcing leaf nullability. Between
/// two nulls the conflict flag propagates and never heals.
fn union_null(null: Null, other: &Value) -> Value {
    match other {
        Value::False(lit) => Value::False(Literal {
            text: lit.text.clone(),
            nullable: true,
        }),
        Value::True(lit) => Value::True(Literal {
            text: lit.text.clone(),
            nullable: true,
        }),
        Value::Number(lit) => Value::Number(Literal {
            text: lit.text.clone(),
            nullable: true,
        }),
        Value::String(lit) => Value::String(Literal {
            text: lit.text.clone(),
            nullable: true,
        }),
        Value::Object(_) | Value::Array(_) => other.clone(),
        Value::Null(o) => Value::Null(Null {
            conflict: null.conflict || o.conflict,
        }),
    }
}

/// All observed elements across both samples fold into one generalized
/// element slot. The fold short-circuits once the running result is the
/// conflict sentinel, which cannot recover.
fn union_arrays(a: &Array, b: &Array) -> Value {
    let mut elements = a.elements.iter().chain(b.elements.iter());
    let Some(first) = elements.next() else {
        return Value::array(vec![]);
    };

    let mut merged = first.clone();
    for element in elements {
        if matches!(&merged, Value::Null(null) if null.conflict) {
            break;
        }
        merged = merged.union(Some(element));
    }

    Value::array(vec![merged])
}

/// Merge members by key, preserving first-seen insertion order: `a`'s keys
/// keep their positions, keys new in `b` append in `b`'s relative order.
/// Keys present in exactly one operand form the result's omittable set,
/// recomputed from these two operands alone.
fn union_objects(a: &Object, b: &Object) -> Value {
    let mut merge = MergeMap::with_capacity(a.members.len() + b.members.len());
    for member in &a.members {
        merge.insert(&member.key, &member.value);
    }
    for member in &b.members {
        merge.insert(&member.key, &member.value);
    }
    Value::Object(merge.into_object())
}

/// Insertion-order-preserving key/value store scoped to a single object
/// merge, with a per-key occurrence counter.
struct MergeMap {
    keys: Vec<String>,
    slots: HashMap<String, Slot>,
}

struct Slot {
    value: Value,
    seen: usize,
}

impl MergeMap {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, key: &str, value: &Value) {
        if let Some(slot) = self.slots.get_mut(key) {
            slot.value = slot.value.union(Some(value));
            slot.seen += 1;
        } else {
            self.keys.push(key.to_string());
            self.slots.insert(
                key.to_string(),
                Slot {
                    value: value.clone(),
                    seen: 1,
                },
            );
        }
    }

    fn into_object(mut self) -> Object {
        let mut members = Vec::with_capacity(self.keys.len());
        let mut omittable = BTreeSet::new();

        for key in self.keys {
            if let Some(slot) = self.slots.remove(&key) {
                if slot.seen == 1 {
                    omittable.insert(key.clone());
                }
                members.push(Member {
                    key,
                    value: slot.value,
                });
            }
        }

        Object { members, omittable }
    }
}
