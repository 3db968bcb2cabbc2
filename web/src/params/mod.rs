//! Typed parameters for endpoint inputs.
//!
//! Form and query inputs are deserialized into these structs before reaching the
//! controllers. Missing form fields deserialize as empty strings so the domain
//! layer reports them as validation errors.

pub(crate) mod hubspot;
