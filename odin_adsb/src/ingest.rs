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

//! reading recorded tracks. We support two formats:
//!
//! - "track log" CSV files (one aircraft per file) as exported by flight tracking sites:
//!   `Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction` where `Timestamp` is in epoch seconds
//!   and `Position` is a quoted `"lat,lon"` pair
//! - JSON arrays of `{aircraftId,timestamp,lat,lon,altitudeFt,speed,heading}` sample records
//!
//! Records without a usable position are skipped (and logged), not treated as errors.

use std::{fs, io::Read, path::Path};
use serde::{Serialize,Deserialize};
use uom::si::{velocity::{knot,meter_per_second}, f64::Velocity};
use tracing::{debug,info,warn};

use crate::{PositionSample, Track, TrackStore};
use crate::errors::{OdinAdsbError,Result,parse_error};

/// the unit of the recorded speed column. Samples always store m/s
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum SpeedUnit {
    #[default]
    MetersPerSecond,
    Knots,
}

impl SpeedUnit {
    pub fn to_meters_per_second (&self, v: f64)->f64 {
        match self {
            SpeedUnit::MetersPerSecond => v,
            SpeedUnit::Knots => Velocity::new::<knot>(v).get::<meter_per_second>()
        }
    }
}

/* #region CSV track logs ***********************************************************************************************/

#[derive(Debug,Deserialize)]
struct TrackLogRecord {
    #[serde(rename="Timestamp")] timestamp: String,
    #[serde(rename="UTC", default)] utc: String,
    #[serde(rename="Callsign")] callsign: String,
    #[serde(rename="Position")] position: String,
    #[serde(rename="Altitude", default)] altitude: String,
    #[serde(rename="Speed", default)] speed: String,
    #[serde(rename="Direction", default)] direction: String,
}

fn parse_lat_lon (s: &str)->Option<(f64,f64)> {
    let (lat,lon) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 { Some((lat,lon)) } else { None }
}

fn parse_opt_f64 (s: &str)->Option<f64> {
    let s = s.trim();
    if s.is_empty() { None } else { s.parse::<f64>().ok().filter(|v| v.is_finite()) }
}

/// read a track log of a single aircraft. The aircraft id is the callsign of the first valid record,
/// samples are returned in (stable) time order
pub fn read_track_log<R: Read> (rdr: R, speed_unit: SpeedUnit)->Result<Track> {
    let mut csv_rdr = csv::ReaderBuilder::new().trim( csv::Trim::All).from_reader(rdr);

    let mut id: Option<String> = None;
    let mut samples: Vec<PositionSample> = Vec::new();
    let mut n_skipped = 0;

    for (i,rec) in csv_rdr.deserialize::<TrackLogRecord>().enumerate() {
        let rec = match rec {
            Ok(rec) => rec,
            Err(e) => { warn!("skipping malformed track log record {}: {}", i+1, e); n_skipped += 1; continue }
        };

        let Some(timestamp) = parse_opt_f64( &rec.timestamp) else {
            warn!("skipping track log record {} without timestamp", i+1); n_skipped += 1; continue
        };
        let Some((lat,lon)) = parse_lat_lon( &rec.position) else {
            warn!("skipping track log record {} without position: '{}'", i+1, rec.position); n_skipped += 1; continue
        };

        let ac_id = id.get_or_insert_with( || rec.callsign.clone()).clone();
        let altitude_ft = parse_opt_f64( &rec.altitude);
        let speed = speed_unit.to_meters_per_second( parse_opt_f64( &rec.speed).unwrap_or(0.0));
        let heading = parse_opt_f64( &rec.direction).unwrap_or(0.0);

        samples.push( PositionSample::new( ac_id, timestamp, lat, lon, altitude_ft, speed, heading));
    }

    let id = id.ok_or_else( || parse_error!("track log has no valid records"))?;
    samples.sort_by( |a,b| a.timestamp.total_cmp( &b.timestamp));
    if n_skipped > 0 { debug!("{} records skipped for {}", n_skipped, id); }

    Track::from_samples( id, samples)
}

pub fn load_track_log<P: AsRef<Path>> (path: P, speed_unit: SpeedUnit)->Result<Track> {
    let file = fs::File::open( path.as_ref())?;
    let track = read_track_log( file, speed_unit)?;
    info!("loaded track of '{}' from {:?} with {} samples", track.id(), path.as_ref(), track.len());
    Ok(track)
}

/// load all `*.csv` track logs of a directory (in file name order). Files that cannot be read are logged
/// and skipped, the result is only an error if the directory itself cannot be read
pub fn load_track_dir<P: AsRef<Path>> (dir: P, speed_unit: SpeedUnit)->Result<TrackStore> {
    let mut paths: Vec<_> = fs::read_dir( dir.as_ref())?
        .filter_map( |e| e.ok().map( |e| e.path()))
        .filter( |p| p.extension().map( |x| x.eq_ignore_ascii_case("csv")).unwrap_or(false))
        .collect();
    paths.sort();

    if paths.is_empty() {
        warn!("no CSV files found in {:?}", dir.as_ref());
    }

    let mut store = TrackStore::new();
    for path in &paths {
        match load_track_log( path, speed_unit) {
            Ok(track) => store.insert_track( track),
            Err(e) => warn!("failed to load track log {:?}: {}", path, e)
        }
    }
    Ok(store)
}

/* #endregion CSV track logs */

/* #region JSON samples ***********************************************************************************************/

#[derive(Debug,Deserialize)]
#[serde(rename_all="camelCase")]
struct SampleRecord {
    #[serde(alias="aircraft_id")]
    aircraft_id: String,
    timestamp: f64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default, alias="altitude_ft")]
    altitude_ft: Option<f64>,
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    heading: f64,
}

/// parse a JSON array of sample records. Records without lat/lon are skipped
pub fn read_samples_json (s: &str)->Result<Vec<PositionSample>> {
    let records: Vec<SampleRecord> = serde_json::from_str(s)?;
    let n_records = records.len();

    let samples: Vec<PositionSample> = records.into_iter().filter_map( |r| {
        match (r.lat, r.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some( PositionSample::new( r.aircraft_id, r.timestamp, lat, lon, r.altitude_ft, r.speed, r.heading))
            }
            _ => { warn!("skipping sample of {} at {} without position", r.aircraft_id, r.timestamp); None }
        }
    }).collect();

    debug!("{} of {} sample records accepted", samples.len(), n_records);
    Ok(samples)
}

/// load a JSON sample file into a TrackStore. Samples have to be time sorted per aircraft
pub fn load_samples_json<P: AsRef<Path>> (path: P)->Result<TrackStore> {
    let s = fs::read_to_string( path.as_ref())?;
    let store = TrackStore::from_samples( read_samples_json( &s)?)?;
    info!("loaded {} tracks with {} samples from {:?}", store.len(), store.n_samples(), path.as_ref());
    Ok(store)
}

/* #endregion JSON samples */
