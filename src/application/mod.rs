// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// One orchestrator per CLI verb. This layer wires the data,
// labelling, and infrastructure layers together to accomplish a
// goal.
//
// Rules for this layer:
//   - No labelling rules or format parsing here
//   - No printing here (that's Layer 1)
//   - No direct argument parsing (CLI args arrive as configs)
//   - Only workflow coordination
//
// Each use case owns a serialisable config struct and returns a
// summary the CLI layer can print.

// Find reference spans in documents
pub mod split_use_case;

// Label the components of individual references
pub mod parse_use_case;

// Convert annotated JSONL datasets to token/label TSV
pub mod convert_use_case;

// Score predicted tags against gold annotations
pub mod evaluate_use_case;
