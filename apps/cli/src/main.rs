// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furnish CLI - realize furniture descriptions into scene snapshots.
//!
//! Runs one realization against an in-memory scene host, optionally seeded
//! from the snapshot a previous run wrote, and writes the resulting scene
//! back out as JSON. The realization report goes to stdout; logs go to
//! stderr.
//!
//! Usage:
//!   furnish realize <input.json> <output.json> [options]
//!   furnish summary <input.json>

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use furnish_model::{resolve_physical, Archetype, AssetDescription, PartSummary, ReferenceBody};
use furnish_realize::Realizer;
use furnish_scene::SceneArena;

mod args;
mod config;

use args::{Command, RealizeArgs};
use config::Config;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,furnish_realize=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    match args::parse(&argv)? {
        Command::Help => println!("{}", args::USAGE),
        Command::Summary { input } => {
            let description = load_description(&input)?;
            println!("{}", PartSummary::from_description(&description).to_ascii());
        }
        Command::Realize(realize_args) => realize(&realize_args, &Config::from_env())?,
    }
    Ok(())
}

fn load_description(path: &Path) -> Result<AssetDescription> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read description '{}'", path.display()))?;
    AssetDescription::from_json(&json)
        .with_context(|| format!("invalid description '{}'", path.display()))
}

fn load_scene(path: Option<&Path>) -> Result<SceneArena> {
    let Some(path) = path else {
        return Ok(SceneArena::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read scene '{}'", path.display()))?;
    let scene = SceneArena::from_json(&json)
        .with_context(|| format!("invalid scene snapshot '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        objects = scene.object_count(),
        "Loaded scene snapshot"
    );
    Ok(scene)
}

fn realize(args: &RealizeArgs, env: &Config) -> Result<()> {
    let mut description = load_description(&args.input)?;

    if args.resolve_physical && description.physical.is_none() {
        let archetype: Archetype = description.archetype.parse()?;
        description.physical = Some(resolve_physical(
            archetype,
            args.has_arms,
            &ReferenceBody::default(),
        ));
        tracing::info!(
            asset = %description.asset_id,
            archetype = %archetype,
            "Resolved physical dimensions from reference body"
        );
    }

    let mut scene = load_scene(args.scene.as_deref())?;
    let realizer = Realizer::new(env.realize_config(args));
    tracing::debug!(config = ?realizer.config(), "Realizing");

    let report = realizer
        .realize(&mut scene, &description)
        .with_context(|| format!("realization of '{}' failed", description.asset_id))?;

    fs::write(&args.output, scene.to_json()?)
        .with_context(|| format!("cannot write scene '{}'", args.output.display()))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
