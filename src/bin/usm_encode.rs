//! usm-encode: Encode SNMPv3 USM security parameters.
//!
//! Part of the snmp-usm CLI utilities.

use clap::Parser;
use snmp_usm::cli::args::{OutputArgs, UsmArgs};
use snmp_usm::cli::output::{EncodeReport, write_report};
use std::process::ExitCode;

/// Validate a USM configuration and print its BER-encoded security parameters.
#[derive(Debug, Parser)]
#[command(name = "usm-encode", version, about)]
struct Args {
    #[command(flatten)]
    usm: UsmArgs,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    args.output.init_tracing();

    if let Err(e) = args.usm.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(report) => {
            if let Err(e) = write_report(args.output.format, &report) {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> snmp_usm::Result<EncodeReport> {
    let level = args.usm.security_level();
    let flags = args.usm.msg_flags();

    let mut params = args.usm.to_params();
    params.validate(flags)?;
    params.init_salt()?;
    if level.requires_priv() {
        params.next_priv_params()?;
    }

    let encoded = params.encode(flags)?;
    Ok(EncodeReport::new(&params, level, &encoded))
}
