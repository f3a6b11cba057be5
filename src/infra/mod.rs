// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns that do not belong to any one pipeline
// stage:
//
//   artefacts.rs    - model artefact management. Checks which
//                     artefact files exist in the model directory
//                     and downloads missing ones from a remote
//                     base URL. Never re-downloads what is
//                     already on disk.
//
//   model_config.rs - per-model-directory configuration (task,
//                     window size, label set) saved and loaded
//                     as JSON, so the labelling commands and the
//                     data that trained a model agree on the
//                     same settings.
//
//   metrics.rs      - evaluation report CSV writer, one row per
//                     label plus an overall accuracy row.

/// Model artefact download and presence checks
pub mod artefacts;

/// Model directory configuration persistence
pub mod model_config;

/// Evaluation report CSV writer
pub mod metrics;
