/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of payload-planner.
 *
 * payload-planner is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * payload-planner is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with payload-planner. If not, see <https://www.gnu.org/licenses/>.
 */


mod cli;
mod commands;
mod error;
mod plot;
mod report;
mod settings;

use std::env;
use std::process::ExitCode;
use clap::Parser;
use tracing::{error, info, Level};

use crate::cli::{Cli, Command};
use crate::settings::GlobalSettings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    let mut settings = match GlobalSettings::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings. {}", e.to_string());
            eprintln!("Failed to load settings. {}", e.to_string());
            return ExitCode::FAILURE;
        }
    };
    if let Some(output_dir) = &cli.output_dir {
        settings.set_output_path(output_dir);
    }

    let result = match &cli.command {
        Command::Load(args) => commands::run_load(args, &settings),
        Command::Score(args) => commands::run_score(args, &settings),
    };
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.to_string());
            eprintln!("Error: {}", e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: Level) {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "payload_planner.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_max_level(level)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}
