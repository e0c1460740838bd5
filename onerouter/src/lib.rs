//! OneRouter - language models over the OneRouter API
//!
//! This crate bundles the model interface from `onerouter-core` with the
//! HTTP-backed chat and completion models from `onerouter-providers`.
//!
//! # Quick Start
//!
//! ```no_run
//! # use onerouter::prelude::*;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), onerouter::Error> {
//! #     #[cfg(feature = "providers")]
//! #     {
//!     // The API key is read from ONEROUTER_API_KEY when a request is made
//!     let router = OneRouter::strict_default()?;
//!     let model = router.language_model("anthropic/claude-3.5-sonnet");
//!
//!     let options = CallOptions::builder()
//!         .message(Message::user("Hello, world!"))
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = model.do_generate(options).await?;
//!     println!("{}", response.text());
//! #     }
//! #     Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use onerouter_core::*;

#[cfg(feature = "providers")]
#[cfg_attr(docsrs, doc(cfg(feature = "providers")))]
pub mod providers {
    //! Chat and completion models
    pub use onerouter_providers::*;
}

/// Prelude module for convenient imports
pub mod prelude {

    pub use onerouter_core::{
        CallOptions, Error, FinishReason, GenerateResponse, LanguageModel, Message, Mode,
        StreamAccumulator, StreamPart, Tool, ToolChoice,
    };

    #[cfg(feature = "providers")]
    pub use onerouter_providers::{
        ChatSettings, Compatibility, CompletionSettings, OneRouter, OneRouterBuilder,
    };
}
