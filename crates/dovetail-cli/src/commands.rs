// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Subcommand implementations.
//!
//! Each command prints its human-readable result to stdout and returns the
//! process exit code. Failures that stop a command outright are returned as
//! errors; the verifier's findings are not failures and only set the code.

use crate::args::{Command, OrderArg};
use dovetail_engine::{gale_shapley::GaleShapleySolver, monitor::log::LogMonitor};
use dovetail_model::{
    generate::{InstanceGenerator, write_instance},
    loading::{InstanceLoader, MatchingLoader},
};
use dovetail_verify::verifier::check;
use std::{error::Error, fs::File, io::BufWriter, path::Path, process::ExitCode};

/// Runs `command`.
pub fn run(command: Command) -> Result<ExitCode, Box<dyn Error>> {
    match command {
        Command::Match {
            input,
            output,
            order,
            stats,
        } => run_match(&input, &output, order, stats),
        Command::Verify {
            preferences,
            matching,
        } => run_verify(&preferences, &matching),
        Command::Generate { n, output, seed } => run_generate(n, &output, seed),
    }
}

fn run_match(
    input: &Path,
    output: &Path,
    order: OrderArg,
    show_stats: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let instance = InstanceLoader::new()
        .from_path(input)
        .map_err(|e| format!("{}: {}", input.display(), e))?;
    println!("Parsed input: n = {}", instance.n());

    let mut solver = GaleShapleySolver::preallocated(instance.n()).with_order(order.into());
    let outcome = solver.solve_with_monitor(&instance, LogMonitor::default());
    let stats = outcome.statistics().clone();
    let termination = outcome.termination();

    let Some(matching) = outcome.into_matching() else {
        return Err(format!("matcher stopped early: {}", termination).into());
    };

    let file = File::create(output).map_err(|e| format!("{}: {}", output.display(), e))?;
    matching.write_to(BufWriter::new(file))?;
    println!("Output written to {}", output.display());
    println!("Matching complete! Total proposals: {}", stats.proposals);

    if show_stats {
        print!("{}", stats);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_verify(preferences: &Path, matching: &Path) -> Result<ExitCode, Box<dyn Error>> {
    let profiles = match InstanceLoader::new().profiles_from_path(preferences) {
        Ok(profiles) => profiles,
        Err(e) => {
            println!("INVALID: Error parsing preferences - {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let matching = match MatchingLoader::new().from_path(matching) {
        Ok(matching) => matching,
        Err(e) => {
            println!("INVALID: Error parsing matching - {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = check(&profiles.hospitals, &profiles.students, &matching);
    tracing::info!(
        n = profiles.n,
        findings = report.len(),
        valid = report.is_valid(),
        "verification finished"
    );
    println!("{}", report);

    Ok(if report.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_generate(n: usize, output: &Path, seed: u64) -> Result<ExitCode, Box<dyn Error>> {
    let instance = InstanceGenerator::new(seed).generate(n);

    let file = File::create(output).map_err(|e| format!("{}: {}", output.display(), e))?;
    write_instance(&instance, BufWriter::new(file))?;
    tracing::info!(n, seed, "generated instance");
    println!("Instance with n = {} written to {}", n, output.display());

    Ok(ExitCode::SUCCESS)
}
