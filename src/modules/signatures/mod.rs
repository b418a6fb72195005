pub mod signature_engine;

pub use signature_engine::{RequestSigner, SignatureContext, SignatureEngine};
