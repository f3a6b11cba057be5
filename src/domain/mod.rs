// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO CLI or serialisation-format specifics
//   - Only plain Rust structs, enums, and traits
//
// Keeping this layer pure means every concept can be unit
// tested without touching the filesystem, and every pipeline
// stage can be swapped by implementing a trait.

// Raw and annotated documents
pub mod document;

// Token label vocabulary and IOB tag handling
pub mod label;

// Extracted and parsed references
pub mod reference;

// Core abstractions (traits) that other layers implement
pub mod traits;
