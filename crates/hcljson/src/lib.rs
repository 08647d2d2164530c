//! # hcljson - hcl to json without evaluation
//!
//! Converts an HCL document into a JSON value tree for consumers that only understand JSON. Expressions are not
//! evaluated: literals become JSON values, everything else is kept as (normalized) HCL source text.
//!
//! ## Introduction for developers
//!
//! ### HCL Terms
//!
//! In hcl terms...
//! - a file gets parsed as a `body`
//! - ...which is just a list of `structures`
//! - ...where there are two kinds:
//!   - `attribute`: a "key = value" pair
//!   - or `block`:
//!     - 1 `identifier`
//!     - followed by 0 or more `labels`
//!     - and a `body` enclosed in `{` and `}`
//!
//! ### Parsing
//!
//! Documents are parsed with [hcl_edit] (see [document::HclDocument]). Its syntax tree keeps the byte span of every
//! expression, which is what allows us to write expressions back as they were written.
//!
//! ### Conversion
//!
//! see [convert::Converter]
//!
//! ```hcl
//! region = var.region
//!
//! resource "aws_instance" "web" {
//!   ami  = "ami-123" # pinned
//!   name = "web-${var.env}"
//! }
//! ```
//!
//! becomes
//!
//! ```json
//! {
//!   "region": "var.region",
//!   "resource": { "aws_instance": { "web": { "ami": "ami-123", "name": "web-var.env" } } }
//! }
//! ```
//!
//! With [convert::Options::keep_interpolation] references are written as `${var.region}` and `web-${var.env}`.
//!
//! - attributes become object entries, blocks are nested by identifier and labels ([convert::body])
//! - repeated blocks become arrays
//! - literals (and unary operations on literals) become JSON values ([convert::expression])
//! - templates are rendered back into template syntax ([convert::template])
//! - everything else is written back as source text, without comments and with collapsed whitespace
//!   ([source], [comments])
//!
//! ### Output
//!
//! The result is a [value::Value] which in turn gets serialized via [serde]. The [api] module wraps all of this into
//! string in, string out functions.
//!
pub mod api;
pub mod comments;
pub mod convert;
pub mod document;
pub mod source;
pub mod value;
