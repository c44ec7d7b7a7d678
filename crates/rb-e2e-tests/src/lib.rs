//! End-to-end tests for refbot live in `tests/`.
