// Core modules implementing the section document model and its codec.
pub mod decode;
pub mod encode;
pub mod error;
pub mod fields;
pub mod id;
pub mod model;
pub mod normalize;
pub mod options;
pub mod report;
