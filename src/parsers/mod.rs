//! JSONL readers and validators for conversation logs
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Individual line failures**: Malformed JSON lines and lines that fail schema validation
//!   are returned as [`LineError`] values carrying the file path, line number and raw text.
//!   The stream continues with the next line; a bad line never breaks the file.
//!
//! - **Absence**: A missing log file reads as an empty stream, not an error.
//!
//! - **Error propagation**: Only failures to open an existing file surface as `anyhow` errors;
//!   the pipeline driver logs them and moves on to the next file.

pub mod deserializers;
pub mod error;
pub mod reader;
pub mod validator;

pub use error::{LineError, LineErrorKind};
pub use reader::{JsonlLines, LineResult, ParsedLine, read_jsonl};
pub use validator::{NormalizedMessage, history_session_id, validate};
