//! open-fm-rate CLI: one-shot polling rate configuration for FinalMouse mice.

use anyhow::Result;
use clap::{Parser, Subcommand};
use open_fm_rate_core::error::Error;
use open_fm_rate_core::report;
use open_fm_rate_core::select::SelectionFilter;
use open_fm_rate_core::session::{apply_rate, AttemptOutcome};
use open_fm_rate_core::transport::HidBackend;
use std::ffi::CString;
use std::process::ExitCode;

// Distinct exit codes so scripts can tell "bad input" from "hardware not
// found" from "hardware refused the command". clap reports argument errors
// with its own code (2).
const EXIT_FAILURE: u8 = 1;
const EXIT_UNSUPPORTED_RATE: u8 = 3;
const EXIT_NO_CANDIDATES: u8 = 4;
const EXIT_EXHAUSTED: u8 = 5;

#[derive(Parser)]
#[command(
    name = "open-fm-rate",
    version,
    about = "Configure the polling rate of a FinalMouse mouse"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every HID interface visible to the system.
    ListDevices,
    /// Apply a polling rate (500, 1000, 2000, 4000, or 8000 Hz).
    SetRate {
        /// Polling rate in Hz.
        hz: u32,
        /// USB vendor ID, hex (e.g. 0x361D). Needs --pid to take effect.
        #[arg(long, value_parser = parse_hex16)]
        vid: Option<u16>,
        /// USB product ID, hex (e.g. 0x0100). Needs --vid to take effect.
        #[arg(long, value_parser = parse_hex16)]
        pid: Option<u16>,
        /// Explicit HID device path; overrides --vid/--pid and name matching.
        #[arg(long)]
        path: Option<String>,
    },
}

/// Parse a 16-bit hex value with optional 0x/0X prefix.
fn parse_hex16(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|_| format!("'{s}' is not a 16-bit hex value"))
}

fn list_devices(api: &hidapi::HidApi) {
    let devices = api.enumerate_devices();
    if devices.is_empty() {
        println!("No HID devices found.");
        return;
    }
    for (idx, dev) in devices.iter().enumerate() {
        println!("[{idx}]");
        println!("path: {}", dev.path_display());
        println!(
            "vid: 0x{:04X} pid: 0x{:04X} iface: {}",
            dev.vendor_id, dev.product_id, dev.interface_number
        );
        println!("manufacturer: {}", dev.manufacturer);
        println!("product: {}", dev.product);
        println!("serial: {}", dev.serial);
    }
}

fn set_rate(
    api: &hidapi::HidApi,
    hz: u32,
    vid: Option<u16>,
    pid: Option<u16>,
    path: Option<String>,
) -> Result<()> {
    let rate = report::parse_rate(hz)?;

    let path = path
        .map(CString::new)
        .transpose()
        .map_err(|_| anyhow::anyhow!("device path contains an interior NUL byte"))?;
    let filter = SelectionFilter {
        path,
        vendor_id: vid,
        product_id: pid,
    };

    let session = apply_rate(api, &filter, rate)?;

    for attempt in &session.attempts {
        match &attempt.outcome {
            AttemptOutcome::Accepted { bytes } => println!(
                "Success: {} bytes accepted on iface {} ({})",
                bytes,
                attempt.interface_number,
                attempt.path.to_string_lossy()
            ),
            AttemptOutcome::OpenFailed { reason } => println!(
                "Skipped {} (open failed: {reason})",
                attempt.path.to_string_lossy()
            ),
            AttemptOutcome::WriteFailed { reason } => println!(
                "Skipped {} (write failed: {reason})",
                attempt.path.to_string_lossy()
            ),
        }
    }
    println!("Done. Requested {rate}.");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let api = hidapi::HidApi::new().map_err(|e| anyhow::anyhow!("hidapi init: {e}"))?;

    match cli.command {
        Commands::ListDevices => {
            list_devices(&api);
            Ok(())
        }
        Commands::SetRate { hz, vid, pid, path } => set_rate(&api, hz, vid, pid, path),
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::UnsupportedRate { .. }) => EXIT_UNSUPPORTED_RATE,
        Some(Error::NoCandidates) => EXIT_NO_CANDIDATES,
        Some(Error::AllCandidatesExhausted { .. }) => EXIT_EXHAUSTED,
        _ => EXIT_FAILURE,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}
