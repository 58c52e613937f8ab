// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input capture and log persistence for keyrec.
//!
//! This crate provides the canonical event model for captured keyboard and
//! mouse occurrences, the timeline recorder that accumulates them with
//! monotonic relative timestamps, and the tab-delimited text codec used for
//! on-disk event logs.

mod codec;
mod event;
mod recorder;

pub use codec::{decode, encode, read_log, write_log, CodecError, Decoded};
pub use event::{Action, Button, Control, Device, Event, NamedKey};
pub use recorder::Recorder;
