// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # ltc
//!
//! Command-line interface for lazy tensor shapes and host literals.
//!
//! ## Usage
//! ```bash
//! # Describe a shape and its leaves
//! ltc inspect "(f32[2,3], s64[])"
//!
//! # Print structural hashes
//! ltc hash "f32[2,3]" "f32[3,2]"
//!
//! # Materialize every leaf as a literal under a 64 MB budget
//! ltc alloc "(f32[1024,1024], s32[16])" --budget 64M
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ltc",
    about = "Inspect lazy tensor shapes and materialize host literals",
    version,
    author
)]
struct Cli {
    /// Path to a TOML host memory configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a shape: kind, leaves, element counts, bytes and hashes.
    Inspect {
        /// Shape in text form, e.g. "f32[2,3]" or "(f32[2], s64[])".
        shape: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the structural hash of one or more shapes.
    Hash {
        /// Shapes in text form.
        #[arg(required = true)]
        shapes: Vec<String>,
    },

    /// Materialize one literal per array leaf in a budget-enforced pool.
    Alloc {
        /// Shape in text form.
        shape: String,

        /// Memory budget (e.g., "64M"); overrides the config file.
        #[arg(short = 'b', long)]
        budget: Option<String>,

        /// Disable buffer reuse between rounds.
        #[arg(long)]
        no_reuse: bool,

        /// Number of allocate/release rounds.
        #[arg(long, default_value_t = 1)]
        rounds: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { shape, json } => commands::inspect::execute(&shape, json),
        Commands::Hash { shapes } => commands::hash::execute(&shapes),
        Commands::Alloc {
            shape,
            budget,
            no_reuse,
            rounds,
        } => commands::alloc::execute(cli.config.as_deref(), &shape, budget, no_reuse, rounds),
    }
}
