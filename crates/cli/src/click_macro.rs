// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted macro: hold ctrl and click the left mouse button 30 times.
//!
//! Shares the replay engine's cancellation flag; the shared abort stops a
//! running macro and every concurrent replay alike. The ctrl release goes
//! out unconditionally, whatever happens inside the click loop.

use crate::diag::print_warning;
use crate::inject::{InjectError, Injector};
use crate::session::CancelFlag;
use crate::time::Clock;
use keyrec_capture::{Button, Control, NamedKey};
use std::sync::Arc;
use std::time::Duration;

/// Modifier held for the duration of the macro.
pub const MACRO_MODIFIER: Control = Control::Key(NamedKey::Ctrl);
/// Button clicked by the macro.
pub const MACRO_BUTTON: Control = Control::Button(Button::Left);

const CLICK_COUNT: usize = 30;
const LEAD_DELAY: Duration = Duration::from_millis(200);
const CLICK_DELAY: Duration = Duration::from_millis(130);

/// How a macro run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MacroOutcome {
    /// All clicks performed.
    Completed { clicks: usize },
    /// Halted early by the shared cancellation flag.
    Cancelled { clicks: usize },
}

/// Runs the fixed hold-ctrl + repeated-click script.
pub struct MacroRunner {
    injector: Arc<dyn Injector>,
    clock: Arc<dyn Clock>,
    cancel: CancelFlag,
}

impl MacroRunner {
    pub fn new(injector: Arc<dyn Injector>, clock: Arc<dyn Clock>, cancel: CancelFlag) -> Self {
        Self {
            injector,
            clock,
            cancel,
        }
    }

    /// Hold ctrl, click 30 times with a fixed pause, release ctrl.
    ///
    /// The cancel flag is checked before each click and reset at completion.
    /// The modifier release is injected even on early exit; if that release
    /// itself fails it is warned about, never lost silently.
    pub async fn run(&self) -> Result<MacroOutcome, InjectError> {
        self.injector.press_key(&MACRO_MODIFIER)?;
        self.clock.sleep(LEAD_DELAY).await;

        let mut clicks = 0usize;
        let mut cancelled = false;
        let mut failure: Option<InjectError> = None;

        for _ in 0..CLICK_COUNT {
            if self.cancel.is_set() {
                cancelled = true;
                break;
            }
            if let Err(err) = self.click() {
                failure = Some(err);
                break;
            }
            clicks += 1;
            self.clock.sleep(CLICK_DELAY).await;
        }

        if let Err(err) = self.injector.release_key(&MACRO_MODIFIER) {
            print_warning(format_args!("could not release macro modifier: {}", err));
        }
        self.cancel.reset();

        match failure {
            Some(err) => Err(err),
            None if cancelled => Ok(MacroOutcome::Cancelled { clicks }),
            None => Ok(MacroOutcome::Completed { clicks }),
        }
    }

    fn click(&self) -> Result<(), InjectError> {
        self.injector.press_button(&MACRO_BUTTON)?;
        self.injector.release_button(&MACRO_BUTTON)
    }
}

#[cfg(test)]
#[path = "click_macro_tests.rs"]
mod tests;
