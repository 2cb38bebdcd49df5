//! Cross-crate integration tests for the chess-desk workspace live in `tests/`.
