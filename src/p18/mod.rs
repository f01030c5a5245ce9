//! The P18 protocol spoken by Voltronic/InfiniSolar hybrid inverters.
//!
//! Commands are built from an identifier and string arguments, responses
//! are validated and decoded into typed records. Nothing here keeps state
//! between calls.

pub mod builder;
pub mod messages;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validator;

pub use builder::build;
pub use messages::{decode, decode_frame, Response};
pub use registry::{lookup, Command, QueryCommand, SetCommand};
pub use validator::{validate_query, validate_set_ack, Acknowledgement};
