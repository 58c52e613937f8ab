// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive console: the shipped raw-input source.
//!
//! A real deployment feeds the controller from an OS input hook; that hook
//! is an external collaborator, so the console reads occurrences as stdin
//! lines instead. Mapped controls act as hotkeys exactly as they would from
//! a hook, everything else records. A failed or unknown command warns and
//! the loop keeps listening.

use crate::controller::SessionController;
use crate::diag::{print_info, print_warning};
use crate::logs::LOG_PREFIX;
use crate::session::SPEED_STEPS;
use keyrec_capture::{Action, Button, Control, Device, NamedKey};
use tokio::io::{AsyncBufReadExt, BufReader};

/// One parsed console line.
#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleInput {
    /// A raw input occurrence to dispatch.
    Raw {
        device: Device,
        action: Action,
        control: Control,
        position: Option<(f64, f64)>,
    },
    Help,
    Quit,
}

/// Startup banner with the hotkey summary and current session settings.
pub fn banner(speed: f64, log_index: u32) -> String {
    format!(
        "=======================================================\n\
         \x20 keyrec: keyboard & mouse recorder with replay\n\
         =======================================================\n\
         Hotkeys (sent as key presses):\n\
         \x20 delete     start or stop recording\n\
         \x20 end        replay the in-memory buffer\n\
         \x20 page_down  save the buffer to {prefix}<n>.txt (while recording)\n\
         \x20 home       load and replay the latest saved log\n\
         \x20 insert     run the ctrl + 30-click macro (also: middle mouse release)\n\
         \x20 f2         stop any running replay or macro\n\
         \x20 f11        reset the log index to 0\n\
         \x20 =  /  -    raise / lower replay speed ({min}x to {max}x in 0.5 steps)\n\
         Console commands:\n\
         \x20 key <name> press|release\n\
         \x20 mouse <button> press|release [x y]\n\
         \x20 help, quit\n\
         =======================================================\n\
         Replay speed: {speed}x   next log: {prefix}{next}.txt",
        prefix = LOG_PREFIX,
        min = SPEED_STEPS[0],
        max = SPEED_STEPS[SPEED_STEPS.len() - 1],
        speed = speed,
        next = log_index + 1,
    )
}

fn help_text() -> &'static str {
    "commands: key <name> press|release | mouse <button> press|release [x y] | help | quit"
}

/// Parse a console line. `Ok(None)` for blank input.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Ok(None),
        ["quit"] | ["exit"] => Ok(Some(ConsoleInput::Quit)),
        ["help"] | ["?"] => Ok(Some(ConsoleInput::Help)),
        ["key", token, action] => Ok(Some(ConsoleInput::Raw {
            device: Device::Keyboard,
            action: parse_action(action)?,
            control: parse_key(token),
            position: None,
        })),
        ["mouse", token, action] => Ok(Some(ConsoleInput::Raw {
            device: Device::Mouse,
            action: parse_action(action)?,
            control: parse_button(token),
            position: None,
        })),
        ["mouse", token, action, x, y] => {
            let x: f64 = x.parse().map_err(|_| format!("invalid x '{}'", x))?;
            let y: f64 = y.parse().map_err(|_| format!("invalid y '{}'", y))?;
            Ok(Some(ConsoleInput::Raw {
                device: Device::Mouse,
                action: parse_action(action)?,
                control: parse_button(token),
                position: Some((x, y)),
            }))
        }
        _ => Err(format!("unrecognized command '{}'", line.trim())),
    }
}

fn parse_action(token: &str) -> Result<Action, String> {
    match token {
        "press" => Ok(Action::Press),
        "release" => Ok(Action::Release),
        _ => Err(format!("action must be press or release, got '{}'", token)),
    }
}

/// Accept bare key names (`delete`), log tokens (`Key.delete`), and single
/// characters.
fn parse_key(token: &str) -> Control {
    NamedKey::from_name(token)
        .map(Control::Key)
        .unwrap_or_else(|| Control::parse(Device::Keyboard, token))
}

/// Accept bare button names (`middle`) and log tokens (`Button.middle`).
fn parse_button(token: &str) -> Control {
    Button::from_name(token)
        .map(Control::Button)
        .unwrap_or_else(|| Control::parse(Device::Mouse, token))
}

/// Read console lines until quit or EOF, then drain in-flight tasks.
pub async fn run(controller: &SessionController) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleInput::Quit)) => break,
            Ok(Some(ConsoleInput::Help)) => print_info(help_text()),
            Ok(Some(ConsoleInput::Raw {
                device,
                action,
                control,
                position,
            })) => controller.handle_input(device, action, control, position),
            Err(msg) => print_warning(msg),
        }
    }
    controller.drain().await;
    Ok(())
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
