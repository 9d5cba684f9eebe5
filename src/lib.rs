/*!
# `jsonshape` Library

Infers a unified shape from example JSON documents.

Textual JSON is parsed into a typed, position-tracked AST, and any number
of sample trees can then be merged pairwise through the union engine: a
structural merge that marks sometimes-null fields nullable, sometimes-absent
object keys omittable, collapses arrays to one generalized element type, and
flags positions where no single consistent type exists.

This crate is the inference front-end for tooling that turns example JSON
into statically-typed schema/code; code emission, CLI handling, and file
discovery are external collaborators.

## Quick start

```rust
use jsonshape::parser::parse;

let a = parse("a.json", br#"{"a": "s", "b": 1}"#).unwrap();
let b = parse("b.json", br#"{"a": null, "c": true}"#).unwrap();

let merged = a.union(Some(&b));
let object = merged.as_object().unwrap();

assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
assert!(object.get("a").unwrap().nullable()); // sometimes null
assert!(object.omittable.contains("b")); // sometimes absent
assert!(object.omittable.contains("c"));
```
*/

pub mod ast;
pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod union;

// Re-exports
pub use ast::{Array, Literal, Member, Null, Object, Value};
pub use error::ParseError;
pub use parser::{parse, parse_reader};
pub use union::union_all;
