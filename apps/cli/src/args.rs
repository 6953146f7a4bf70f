// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line parsing.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use furnish_realize::RegenerationMode;

pub const USAGE: &str = "\
Usage:
  furnish realize <input.json> <output.json> [options]
  furnish summary <input.json>

Realize options:
  --scene <path>        Seed the scene from a previous output snapshot
  --mode <mode>         preserve (default) or replace
  --correct             Shift chair seat/back anchors toward declared values
  --assert              Fail when a chair metric misses the strict tolerance
  --resolve-physical    Fill a missing physical map from the reference body
  --arms                Resolve chair dimensions with arm rests

Environment:
  FURNISH_REGEN_MODE, FURNISH_CORRECT, FURNISH_ASSERT,
  FURNISH_LOG_TOLERANCE, FURNISH_ASSERT_TOLERANCE, RUST_LOG";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Realize(RealizeArgs),
    Summary { input: PathBuf },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RealizeArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scene: Option<PathBuf>,
    /// `None` defers to the environment.
    pub mode: Option<RegenerationMode>,
    pub correct: bool,
    pub assert: bool,
    pub resolve_physical: bool,
    pub has_arms: bool,
}

/// Parses arguments, program name excluded.
pub fn parse(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "summary" => {
            let [_, input] = args else {
                bail!("summary takes exactly one input path");
            };
            Ok(Command::Summary {
                input: PathBuf::from(input),
            })
        }
        "realize" => parse_realize(&args[1..]).map(Command::Realize),
        other => bail!("unknown command '{other}'"),
    }
}

fn parse_realize(args: &[String]) -> Result<RealizeArgs> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut parsed = RealizeArgs {
        input: PathBuf::new(),
        output: PathBuf::new(),
        scene: None,
        mode: None,
        correct: false,
        assert: false,
        resolve_physical: false,
        has_arms: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scene" => {
                let value = iter.next().ok_or_else(|| anyhow!("--scene needs a path"))?;
                parsed.scene = Some(PathBuf::from(value));
            }
            "--mode" => {
                let value = iter.next().ok_or_else(|| anyhow!("--mode needs a value"))?;
                parsed.mode = Some(value.parse().map_err(|e: String| anyhow!(e))?);
            }
            "--correct" => parsed.correct = true,
            "--assert" => parsed.assert = true,
            "--resolve-physical" => parsed.resolve_physical = true,
            "--arms" => parsed.has_arms = true,
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            path => positional.push(PathBuf::from(path)),
        }
    }

    let [input, output]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| anyhow!("realize takes an input and an output path"))?;
    parsed.input = input;
    parsed.output = output;
    Ok(parsed)
}
