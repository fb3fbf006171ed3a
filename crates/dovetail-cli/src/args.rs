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

use clap::{Parser, Subcommand};
use dovetail_engine::gale_shapley::ProcessingOrder;
use dovetail_model::generate::DEFAULT_SEED;
use std::path::PathBuf;

/// Dovetail - hospital/student stable matching
#[derive(Parser, Debug)]
#[command(name = "dovetail")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Raise the log level (-v info, -vv debug, -vvv trace); RUST_LOG overrides it
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the hospital-optimal stable matching of a preference file
    Match {
        /// Preference file: n, then n hospital lists, then n student lists
        input: PathBuf,
        /// Where to write the "<hospital> <student>" lines
        output: PathBuf,
        /// Order in which free hospitals propose
        #[arg(long, value_enum, default_value = "stack")]
        order: OrderArg,
        /// Print solver statistics after solving
        #[arg(long, default_value_t = false)]
        stats: bool,
    },
    /// Check that a matching is valid and stable; exits 0 only if it is
    Verify {
        /// Preference file the matching refers to
        preferences: PathBuf,
        /// Matching file with one "<hospital> <student>" pair per line
        matching: PathBuf,
    },
    /// Write a random complete preference file
    Generate {
        /// Number of hospitals (and students)
        n: usize,
        /// Where to write the preference file
        output: PathBuf,
        /// Seed for the random generator
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

/// Command-line argument wrapper for ProcessingOrder
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OrderArg {
    /// Most recently freed hospital first
    #[value(name = "stack")]
    Stack,
    /// Free hospitals in arrival order
    #[value(name = "queue")]
    Queue,
}

impl From<OrderArg> for ProcessingOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Stack => ProcessingOrder::Stack,
            OrderArg::Queue => ProcessingOrder::Queue,
        }
    }
}

impl Args {
    /// Default log directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_match() {
        let args = Args::try_parse_from(["dovetail", "-vv", "match", "in.txt", "out.txt"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.log_level(), "debug");
        match args.command {
            Command::Match {
                input,
                output,
                order,
                stats,
            } => {
                assert_eq!(input, PathBuf::from("in.txt"));
                assert_eq!(output, PathBuf::from("out.txt"));
                assert_eq!(ProcessingOrder::from(order), ProcessingOrder::Stack);
                assert!(!stats);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_default_seed() {
        let args = Args::try_parse_from(["dovetail", "generate", "8", "prefs.txt"]).unwrap();
        assert_eq!(args.log_level(), "warn");
        match args.command {
            Command::Generate { n, seed, .. } => {
                assert_eq!(n, 8);
                assert_eq!(seed, DEFAULT_SEED);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let args = Args::try_parse_from(["dovetail", "verify", "p.txt", "m.txt", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_missing_operand_is_rejected() {
        assert!(Args::try_parse_from(["dovetail", "match", "in.txt"]).is_err());
    }
}
