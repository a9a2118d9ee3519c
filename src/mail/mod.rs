// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Secure Mail
//!
//! Unwraps nested S/MIME gateway mail on top of an external engine:
//!
//! - **SecureMail**: single-layer decrypt and verify with precise errors
//! - **UnwrapPipeline**: the two-layer decrypt/verify/trim sequence
//! - **HeaderSenderExtractor**: declared sender address from a header
//! - **CaCertificates**: caller-owned trust anchors
//!
//! ## Security Considerations
//!
//! - Public keys are rejected before the engine is called
//! - Each layer is verified against its own declared sender
//! - Logs carry step markers only, never mail content or key material

pub mod certificates;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod sender;
pub mod smime;

pub use certificates::CaCertificates;
pub use engine::{EngineError, SecureMailEngine, VerifyFailure};
pub use error::{SecureMailError, SenderError};
pub use pipeline::{trim_redundant_header, MailLayer, UnwrapPipeline, NESTED_LAYERS};
pub use sender::{HeaderSenderExtractor, SenderExtractor};
pub use smime::SecureMail;
