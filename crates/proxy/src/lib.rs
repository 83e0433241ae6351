//! Cross-file "go to definition" for objects known only by (type, id).
//!
//! The external AL resolver has no "find definition of object N" request;
//! it only resolves a source position inside a real document. This crate
//! manufactures that document: it synthesizes a minimal unit referencing
//! the target object, injects it into a scratch file, points the resolver
//! at the reference, retracts the text, and opens the resolved location.

pub mod protocol;
pub mod synth;

pub use protocol::{
    NavigationOutcome, NavigationProxy, NavigationRequest, NavigationTarget, RETAIN_SCRATCH_FILE,
    SCRATCH_DIR, SCRATCH_FILE,
};
pub use synth::SynthesizedSource;
