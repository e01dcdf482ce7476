use vehctl::runtime::tracing::vcd::{TimeScaleUnit, VcdTrace};
use vehctl::runtime::tracing::PortTrace;
use vehctl::runtime::{Device, Testbench};
use vehctl::{Config, Controller};
use vehctl_sim::stimulus::{RunReport, Script};
use vehctl_sim::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "vehctl-sim")]
#[command(about = "Drive the vehicle controller models with a stimulus script")]
struct Args {
    /// JSON stimulus script. Runs the built-in bring-up script when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Which controller model(s) to run.
    #[arg(long, value_enum, default_value = "both")]
    fidelity: Fidelity,

    /// Clock edges the internal reset stays asserted after raw reset release.
    #[arg(long, default_value = "4")]
    reset_sync_depth: u8,

    /// Write port values to this VCD file.
    #[arg(long)]
    vcd: Option<PathBuf>,

    /// VCD time units per clock cycle, in nanoseconds.
    #[arg(long, default_value = "10")]
    timescale_ns: u32,

    /// Log every cycle's port values.
    #[arg(long)]
    verbose: bool,
}

fn run<D: Device>(script: &Script, device: D, args: &Args) -> Result<(RunReport, D), Error> {
    let mut tb = Testbench::new(Logged::new(device, args.verbose));

    let report = match &args.vcd {
        Some(path) => {
            clilog::info!("Writing VCD to {:?}", path);
            let mut w = BufWriter::new(File::create(path)?);
            let report = {
                let trace = VcdTrace::new(&mut w, args.timescale_ns, TimeScaleUnit::Ns)?;
                let mut trace = PortTrace::new(trace, "vehctl")?;
                script.run_traced(&mut tb, &mut trace)?
            };
            w.flush()?;
            report
        }
        None => script.run(&mut tb),
    };

    Ok((report, tb.into_device().into_inner()))
}

fn main() -> Result<(), Error> {
    clilog::init_stderr_color_debug();

    let args = <Args as clap::Parser>::parse();
    clilog::info!("vehctl-sim args:\n{:#?}", args);

    let config = Config {
        reset_sync_depth: args.reset_sync_depth,
    };
    config.validate()?;

    let script = match &args.script {
        Some(path) => {
            clilog::info!("Loading stimulus script: {:?}", path);
            Script::load(path)?
        }
        None => Script::bring_up(),
    };
    clilog::info!(
        "Running script {:?}: {} step(s), {} cycle(s), fidelity {:?}",
        script.name.as_deref().unwrap_or("<unnamed>"),
        script.steps.len(),
        script.total_cycles(),
        args.fidelity
    );

    let (report, mismatches) = match args.fidelity {
        Fidelity::Behavioral => (run(&script, Controller::new(config)?, &args)?.0, 0),
        Fidelity::Rtl => (run(&script, rtl_device(&config)?, &args)?.0, 0),
        Fidelity::Both => {
            let (report, lockstep) = run(&script, lockstep_device(&config)?, &args)?;
            (report, lockstep.mismatches().len())
        }
    };

    for step in report.steps.iter() {
        let label = step.label.as_deref().unwrap_or("");
        if step.failures.is_empty() {
            clilog::info!(
                "step {} {:?} passed at cycle {}: {:?}",
                step.index,
                label,
                step.cycle,
                step.outputs
            );
        }
        for failure in step.failures.iter() {
            clilog::error!(
                "step {} {:?} failed at cycle {}: {} expected {:#04x} (mask {:#04x}), got {:#04x}",
                step.index,
                label,
                step.cycle,
                failure.port,
                failure.expected,
                failure.mask,
                failure.actual
            );
        }
    }

    if mismatches > 0 {
        clilog::error!("Behavioral and RTL models disagreed on {} cycle(s)", mismatches);
        return Err(Error::FidelityMismatch { mismatches });
    }
    if !report.passed() {
        return Err(Error::ExpectationsFailed {
            failures: report.failures(),
        });
    }

    clilog::info!("All {} step(s) passed", report.steps.len());

    Ok(())
}
