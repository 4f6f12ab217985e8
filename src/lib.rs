//! Thread Recap — inbound-email thread summarization service.
//!
//! Receives a Postmark-style inbound-email webhook, reduces the thread body
//! to a structured HTML summary through a completion service, and mails the
//! result back to the original sender.

pub mod config;
pub mod email;
pub mod error;
pub mod http;
pub mod llm;
pub mod pipeline;
