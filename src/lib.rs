//! Purpose: Library crate backing the `formcodec` CLI and embedding callers.
//! Exports: `api` (public model, codec, catalog, store), `notice` (stderr notice schema).
//! Role: Round-trips Form Builder section documents between storage and editors.
//! Invariants: Codec functions are pure; no I/O and no shared mutable state.
//! Invariants: Decoding never fails toward the caller; `try_decode` exposes typed errors.
pub mod api;
mod core;
pub mod notice;
