//! Purpose: Define the stable public Rust API boundary for formcodec.
//! Exports: Document model, codec entry points, reporters, catalog, and store types.
//! Role: Public, additive-only surface used by the CLI and embedding callers.
//! Invariants: Decoding through this surface always yields a usable document.
//! Invariants: Encoded output never carries editor ids.

pub mod question_types;
pub mod store;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::decode::{decode, decode_value, decode_with, try_decode};
pub use crate::core::encode::{encode, encode_pretty, encode_value};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::id::Id;
pub use crate::core::model::{Document, Question, QuestionOption, Section};
pub use crate::core::normalize::normalize_quotes;
pub use crate::core::options::{decode_option_value, decode_options, encode_options};
pub use crate::core::report::{CollectingReporter, DecodeFailure, FailureReporter, TracingReporter};
pub use question_types::{DEFAULT_QUESTION_TYPE, QuestionType, QuestionTypes};
pub use store::{FormRecord, FormStore, MemoryStore};
