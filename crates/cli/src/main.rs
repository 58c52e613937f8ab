// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! keyrec binary entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use keyrec::cli::{Cli, Command};
use keyrec::commands;
use keyrec::console;
use keyrec::controller::{Notice, SessionController};
use keyrec::diag::{print_error, print_info, print_warning};
use keyrec::inject::TraceInjector;
use keyrec::time::SystemClock;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Command::Console { dir } => run_console(dir).await.map_err(Into::into),
        Command::Replay { file, speed } => commands::replay_file(&file, speed)
            .await
            .map_err(Into::into),
        Command::Latest { dir, speed } => commands::replay_latest(&dir, speed)
            .await
            .map_err(Into::into),
        Command::Inspect { file, json } => commands::inspect(&file, json).map_err(Into::into),
    };

    if let Err(err) = result {
        print_error(err);
        std::process::exit(1);
    }
}

/// Run the interactive console session.
async fn run_console(dir: PathBuf) -> std::io::Result<()> {
    let on_notice = Arc::new(|notice: Notice| {
        if notice.is_warning() {
            print_warning(&notice);
        } else {
            print_info(&notice);
        }
    });

    let controller = SessionController::new(
        dir,
        Arc::new(TraceInjector::new()),
        Arc::new(SystemClock::new()),
        on_notice,
    );

    print_info(console::banner(
        controller.state().speed(),
        controller.state().log_index(),
    ));

    console::run(&controller).await
}
