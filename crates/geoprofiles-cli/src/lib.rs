//! geoprofiles-cli
//! ===============
//!
//! Command-line interface for the `geoprofiles-core` region model.
//!
//! This crate primarily provides a binary (`geoprofiles`). The library target
//! exists so that the crate has a rendered documentation page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! geoprofiles --help
//! geoprofiles -i regions.json.gz stats
//! geoprofiles kinds --all
//! geoprofiles resolve tract:42003140100
//! geoprofiles hierarchy blockGroup:420031401001
//! geoprofiles overlap tract:42003140100
//! geoprofiles search "lawrenceville" --kind neighborhood
//! ```
//!
//! Logging goes to stderr. `-v` enables info events, `-vv` debug events;
//! `RUST_LOG` takes precedence when set.
//!
//! For programmatic access use the `geoprofiles-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
