//! body conversion and block merging
//!
//! Attributes become object entries. Blocks are nested by their identifier and labels:
//!
//! ```hcl
//! resource "aws_instance" "web" { ami = "a" }
//! resource "aws_instance" "web" { ami = "b" }
//! locals { x = 1 }
//! ```
//!
//! ```json
//! {
//!   "resource": { "aws_instance": { "web": [{ "ami": "a" }, { "ami": "b" }] } },
//!   "locals": { "x": 1 }
//! }
//! ```
//!
//! A block path that is seen more than once turns into an array (in order of appearance).
use super::{ConvertError, Converter};
use crate::value::{Map, Value};
use hcl_edit::structure::{Block, Body};
use indexmap::map::Entry;

impl<'s> Converter<'s> {
    /// Converts all attributes and then all blocks of a body into one object
    pub fn body(&self, body: &Body, depth: usize) -> Result<Map, ConvertError> {
        let depth = self.descend(depth)?;

        let mut out = Map::new();
        for attribute in body.attributes() {
            let key = attribute.key.value().as_str();
            tracing::trace!(key, "convert attribute");
            out.insert(key.to_owned(), self.expression(&attribute.value, depth)?);
        }

        for block in body.blocks() {
            self.merge_block(block, &mut out, depth)?;
        }

        Ok(out)
    }

    /// Adds a converted block to `out`
    ///
    /// Each label descends one object deeper. The last label (or the block identifier for unlabeled blocks) is
    /// the key the block body is stored under.
    #[tracing::instrument(level = "trace", skip_all, fields(block = %block.ident.value()))]
    pub fn merge_block(
        &self,
        block: &Block,
        out: &mut Map,
        depth: usize,
    ) -> Result<(), ConvertError> {
        let value = Value::Object(self.body(&block.body, depth)?);

        let mut target = out;
        let mut key = block.ident.value().as_str().to_owned();

        for label in &block.labels {
            let current = target;
            target = match current.entry(key).or_insert_with(Value::empty_object) {
                Value::Object(inner) => inner,
                _ => return Err(conflict(block)),
            };
            key = label.as_str().to_owned();
        }

        match target.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => {
                tracing::trace!(key = %entry.key(), "duplicate block");
                match entry.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = std::mem::replace(existing, Value::Null);
                        *existing = Value::Array(vec![first, value]);
                    }
                }
            }
        }

        Ok(())
    }
}

fn conflict(block: &Block) -> ConvertError {
    let mut path = vec![block.ident.value().as_str()];
    path.extend(block.labels.iter().map(|label| label.as_str()));

    let path = path.join(".");
    tracing::debug!(%path, "block collides with a non-object value");
    ConvertError::MergeConflict { path }
}
