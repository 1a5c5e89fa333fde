/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

#![allow(unused)]

use std::path::{Path,PathBuf};
use anyhow::{Result,anyhow};
use clap::Parser;
use chrono::{DateTime,Utc};
use tracing_subscriber::EnvFilter;

use odin_adsb::{TrackStore, ingest::{load_track_dir, load_track_log, load_samples_json}};
use odin_incursion::{
    load_config, IncursionConfig, IncursionEngine, IncursionLedger, FeatureSet, RunReport,
    instruction::load_instructions
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "replay recorded ADS-B tracks against ATC instructions and report ground incursions and airborne conflicts")]
pub struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    config: Option<PathBuf>,

    /// GeoJSON file with runway and taxiway features
    #[arg(short,long)]
    features: PathBuf,

    /// JSON file with instruction records
    #[arg(short,long)]
    instructions: PathBuf,

    /// directory of CSV track logs, a single CSV track log or a JSON sample file
    #[arg(short,long)]
    tracks: PathBuf,

    /// print report as JSON
    #[arg(long)]
    json: bool,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .try_init()
        .map_err( |e| anyhow!("failed to init tracing: {e}"))?;

    let args = Args::parse();

    let config = if let Some(path) = &args.config { load_config( path)? } else { IncursionConfig::default() };
    let tracks = load_tracks( &args.tracks, &config)?;
    let features = FeatureSet::load_geojson( &args.features)?;
    let instructions = load_instructions( &args.instructions)?;

    let engine = IncursionEngine::new( config, features, instructions)?;
    let ledger = IncursionLedger::new();
    let report = engine.run( &tracks, &ledger);

    if args.json {
        println!("{}", serde_json::to_string_pretty( &report)?);
    } else {
        print_report( &report);
    }
    Ok(())
}

fn load_tracks (path: &Path, config: &IncursionConfig)->Result<TrackStore> {
    if path.is_dir() {
        Ok( load_track_dir( path, config.track_speed_unit)? )
    } else if path.extension().map( |x| x.eq_ignore_ascii_case("json")).unwrap_or(false) {
        Ok( load_samples_json( path)? )
    } else {
        let mut store = TrackStore::new();
        store.insert_track( load_track_log( path, config.track_speed_unit)?);
        Ok(store)
    }
}

fn utc (t: f64)->String {
    DateTime::<Utc>::from_timestamp( t.floor() as i64, ((t.fract() * 1e9) as u32).min(999_999_999))
        .map( |d| d.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_else( || "?".to_string())
}

fn print_report (report: &RunReport) {
    let line = "-".repeat(112);

    println!("\nNature of incursions (set length: {}):", report.events.len());
    println!("{line}");
    for e in &report.events {
        println!(">> {}", e.message);
        println!("::::::::::::::::: [ timestamp: {} ({}) • lat/long location: ({:.6}, {:.6})", e.timestamp, utc(e.timestamp), e.lat, e.lon);
        println!("::::::::::::::::: [ speed: {:.1} m/s • heading: {:.0} degrees • path forecast: {} seconds", e.speed, e.heading.degrees(), e.lookahead_secs);
        println!("::::::::::::::::: |{}", "-".repeat(86));
        println!("::::::::::::::::: |     RECOMMENDATION : {}", e.advisory);
        println!("::::::::::::::::: |     IF NOT FOLLOWED: {}", e.predicted_outcome);
        println!("::::::::::::::::: |{}", "-".repeat(86));
        println!("------------------^{}", "-".repeat(93));
    }

    if !report.alerts.is_empty() {
        println!("\nAirborne conflicts ({}):", report.alerts.len());
        println!("{line}");
        for a in &report.alerts {
            println!("** ALERT ** {} (at {})", a, utc(a.timestamp));
        }
    }

    let s = &report.stats;
    println!("\n{} segments evaluated, {} violations, {} unresolved references, {} unknown commands, {} samples skipped",
             s.n_segments, s.n_violations, s.n_unresolved, s.n_unknown, s.n_skipped);
}
