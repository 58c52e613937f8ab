// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! keyrec
//!
//! Records timestamped keyboard and mouse events, persists them as flat
//! text logs, and replays them at a selectable speed with drift-corrected
//! timing, cooperative cancellation, and guaranteed release of stuck input.
//!
//! The OS-level input hook and synthetic-input injection are external
//! collaborators behind the [`inject::Injector`] seam and the
//! [`controller::SessionController::handle_input`] entry point; the shipped
//! binary feeds a session from a stdin console and injects through a
//! dry-run printer.

pub mod cli;
pub mod click_macro;
pub mod commands;
pub mod console;
pub mod controller;
pub mod diag;
pub mod engine;
pub mod inject;
pub mod logs;
pub mod session;
pub mod time;

/// Re-exported capture types from the keyrec-capture crate.
pub mod capture {
    pub use keyrec_capture::{
        decode, encode, read_log, write_log, Action, Button, CodecError, Control, Decoded,
        Device, Event, NamedKey, Recorder,
    };
}
