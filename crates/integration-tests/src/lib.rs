//! Intentionally empty. This crate exists to host the end-to-end REST
//! tests under `tests/`.
