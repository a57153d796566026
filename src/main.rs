/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Main executable for sqw-rs
//!
//! Reads `sqw.json` from the working directory when it exists and falls back
//! to the built-in NaCl settings otherwise.

use std::io;
use std::path::Path;

use anyhow::Context;
use log::info;
use sqw_rs::config::CONFIG_FILE_NAME;
use sqw_rs::{SqwConfig, SqwPipeline};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();
    info!("sqw-rs v{}", sqw_rs::VERSION);

    let config = if Path::new(CONFIG_FILE_NAME).exists() {
        SqwConfig::from_json_file(CONFIG_FILE_NAME)
            .with_context(|| format!("failed to load {}", CONFIG_FILE_NAME))?
    } else {
        SqwConfig::default()
    };

    let pipeline = SqwPipeline::new(config).context("invalid configuration")?;
    let stdout = io::stdout();
    pipeline
        .execute(&mut stdout.lock())
        .context("S(Q,ω) calculation failed")?;

    Ok(())
}
