// ============================================================
// Layer 5 - Labelling
// ============================================================
// Assigns a label to every token and turns tag sequences back
// into spans.
//
//   heuristic.rs - the shipped TokenLabeller implementations:
//                  ReferenceSplitter scores each line against
//                  reference cues and tags matching lines
//                  b-r i-r ...; ComponentParser labels the
//                  author / title / year blocks of a single
//                  reference.
//
//   decode.rs    - IOB tag sequences to token spans and back.
//                  Tolerant decoding: an i- tag with no open
//                  span starts one, so slightly inconsistent
//                  tag sequences still produce usable spans.
//
//   eval.rs      - token-level precision / recall / F1 per
//                  label, for scoring predicted tags against
//                  gold annotations.
//
// Everything here is deterministic. A learned labeller loaded
// from fetched artefacts would slot in behind the same
// TokenLabeller trait without touching this layer's callers.

/// Rule-based token labellers
pub mod heuristic;

/// Tag sequence encoding and decoding
pub mod decode;

/// Tagging quality metrics
pub mod eval;
