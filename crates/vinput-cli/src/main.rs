#![forbid(unsafe_code)]

//! Interactive control endpoint for the simulated input devices.
//!
//! Reads injection commands from stdin (`kbd <byte>`, `mouse <b0> <b1> <b2>`)
//! and prints the decoded event stream to stdout. Each device runs its own
//! deferred worker; this binary is only the producer-side adapter plus the
//! human-readable sink.

use std::io::{self, BufRead};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use vinput_cli::control::Command;
use vinput_cli::printer::EventPrinter;
use vinput_devices::{
    DeviceController, DeviceWorker, KeyboardDecoder, MouseDecoder, KEYBOARD_BUFFER_SIZE,
    MOUSE_BUFFER_SIZE,
};

#[derive(Debug, Parser)]
#[command(about = "Simulated PS/2-class keyboard and mouse: inject wire bytes, watch decoded events")]
struct Args {
    /// Keyboard ring-buffer capacity in bytes.
    #[arg(long, default_value_t = KEYBOARD_BUFFER_SIZE)]
    kbd_buffer: usize,

    /// Mouse ring-buffer capacity in bytes.
    #[arg(long, default_value_t = MOUSE_BUFFER_SIZE)]
    mouse_buffer: usize,

    /// Disable ANSI colors in event output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    ensure!(
        args.kbd_buffer >= 2 && args.mouse_buffer >= 2,
        "buffer capacity must be at least 2 bytes"
    );
    let color = !args.no_color;

    let keyboard = DeviceWorker::spawn(
        DeviceController::new("keyboard", args.kbd_buffer, KeyboardDecoder::new()),
        EventPrinter::new(io::stdout(), color),
    )
    .context("spawn keyboard worker")?;
    let mouse = DeviceWorker::spawn(
        DeviceController::new("mouse", args.mouse_buffer, MouseDecoder::new()),
        EventPrinter::new(io::stdout(), color),
    )
    .context("spawn mouse worker")?;

    tracing::info!("devices ready; reading commands from stdin");

    for line in io::stdin().lock().lines() {
        let line = line.context("read control line")?;
        match Command::parse(&line) {
            Ok(Command::Keyboard(byte)) => {
                keyboard.inject(&[byte]);
            }
            Ok(Command::Mouse(bytes)) => {
                mouse.inject(&bytes);
            }
            Ok(Command::Quit) => break,
            Ok(Command::Nop) => {}
            // Rejected lines have no side effect on either device.
            Err(err) => eprintln!("error: {err}"),
        }
    }

    // Dropping the workers flushes buffered bytes and joins both consumer
    // threads before the rings go away.
    drop(keyboard);
    drop(mouse);
    Ok(())
}
