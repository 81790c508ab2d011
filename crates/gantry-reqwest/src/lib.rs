#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;

pub use gantry_core::{Error, ErrorKind, Result};

pub use crate::client::{AuxClient, TRACING_TARGET};
pub use crate::config::AuxClientConfig;
