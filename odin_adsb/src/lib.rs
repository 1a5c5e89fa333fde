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

//! recorded ADS-B track data: time ordered per-aircraft position samples and the aircraft state
//! snapshots derived from them

use std::{collections::BTreeMap, fmt};
use serde::{Serialize,Deserialize};
use uom::si::{length::foot, velocity::{knot,meter_per_second,foot_per_minute}, f64::{Length,Velocity}};
use tracing::{debug,warn};

use odin_common::angle::Angle360;

pub mod ingest;
pub mod errors;

use crate::errors::{OdinAdsbError,Result,parse_error};

/* #region PositionSample ***********************************************************************************************/

/// a single position report. Ground speed is in m/s, heading clockwise from true north
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct PositionSample {
    pub aircraft_id: String,
    pub timestamp: f64, // epoch seconds
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: Option<f64>,
    pub speed: f64,
    pub heading: Angle360,
}

impl PositionSample {
    pub fn new (aircraft_id: impl ToString, timestamp: f64, lat: f64, lon: f64, altitude_ft: Option<f64>, speed: f64, heading_deg: f64)->Self {
        PositionSample {
            aircraft_id: aircraft_id.to_string(),
            timestamp, lat, lon, altitude_ft, speed,
            heading: Angle360::from_degrees(heading_deg)
        }
    }

    pub fn has_position (&self)->bool { self.lat.is_finite() && self.lon.is_finite() }
}

impl fmt::Display for PositionSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Sample( id: {}, t: {}, pos: [{:.6},{:.6}]", self.aircraft_id, self.timestamp, self.lat, self.lon)?;
        if let Some(alt) = self.altitude_ft { write!( f, ", alt: {:.0}", alt)?; }
        write!( f, ", spd: {:.1}, hdg: {:.0})", self.speed, self.heading.degrees())
    }
}

/* #endregion PositionSample */

/* #region Track ***********************************************************************************************/

/// the immutable, time sorted sample sequence of one aircraft
#[derive(Debug,Clone)]
pub struct Track {
    id: String,
    samples: Vec<PositionSample>,
}

impl Track {
    pub fn new (id: impl ToString)->Self {
        Track { id: id.to_string(), samples: Vec::new() }
    }

    /// fails if samples are not in ascending time order or belong to another aircraft
    pub fn from_samples (id: impl ToString, samples: Vec<PositionSample>)->Result<Self> {
        let mut track = Track::new(id);
        track.samples.reserve( samples.len());
        for s in samples {
            track.push(s)?;
        }
        Ok(track)
    }

    pub fn push (&mut self, sample: PositionSample)->Result<()> {
        if sample.aircraft_id != self.id {
            return Err( parse_error!("sample of {} does not belong to track {}", sample.aircraft_id, self.id))
        }
        if let Some(last) = self.samples.last() {
            if sample.timestamp < last.timestamp {
                return Err( OdinAdsbError::UnsortedSamples{ id: self.id.clone(), prev: last.timestamp, next: sample.timestamp })
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn id (&self)->&str { self.id.as_str() }
    pub fn samples (&self)->&[PositionSample] { self.samples.as_slice() }
    pub fn len (&self)->usize { self.samples.len() }
    pub fn is_empty (&self)->bool { self.samples.is_empty() }
    pub fn first (&self)->Option<&PositionSample> { self.samples.first() }
    pub fn last (&self)->Option<&PositionSample> { self.samples.last() }

    /// index of the latest sample with timestamp <= t
    fn index_at (&self, t: f64)->Option<usize> {
        let n = self.samples.partition_point( |s| s.timestamp <= t);
        if n > 0 { Some(n-1) } else { None }
    }

    /// the latest sample with timestamp <= t
    pub fn latest_at (&self, t: f64)->Option<&PositionSample> {
        self.index_at(t).map( |i| &self.samples[i])
    }

    /// state snapshot at time t based on the latest sample that is not older than `max_age` seconds.
    /// A missing altitude is taken as 0ft (on ground). Vertical rate is derived from the last two samples
    pub fn state_at (&self, t: f64, max_age: f64)->Option<AircraftState> {
        let i = self.index_at(t)?;
        let s = &self.samples[i];
        if t - s.timestamp > max_age { return None }

        let alt_ft = s.altitude_ft.unwrap_or(0.0);
        let mut vrate_fpm = 0.0;
        if i > 0 {
            let p = &self.samples[i-1];
            let dt = s.timestamp - p.timestamp;
            if dt > 0.0 {
                vrate_fpm = (alt_ft - p.altitude_ft.unwrap_or(0.0)) * 60.0 / dt;
            }
        }

        Some( AircraftState {
            id: self.id.clone(),
            lat: s.lat,
            lon: s.lon,
            altitude: Length::new::<foot>(alt_ft),
            ground_speed: Velocity::new::<meter_per_second>(s.speed),
            track: s.heading,
            vertical_rate: Velocity::new::<foot_per_minute>(vrate_fpm),
        })
    }
}

/* #endregion Track */

/* #region TrackStore ***********************************************************************************************/

/// all tracks of a run, keyed (and iterated) by aircraft id
#[derive(Debug,Clone,Default)]
pub struct TrackStore {
    tracks: BTreeMap<String,Track>,
}

impl TrackStore {
    pub fn new ()->Self { TrackStore { tracks: BTreeMap::new() } }

    /// group samples by aircraft. Each aircraft's samples have to be time sorted
    pub fn from_samples (samples: impl IntoIterator<Item=PositionSample>)->Result<Self> {
        let mut store = TrackStore::new();
        for s in samples {
            store.push_sample(s)?;
        }
        Ok(store)
    }

    pub fn push_sample (&mut self, sample: PositionSample)->Result<()> {
        if let Some(track) = self.tracks.get_mut( sample.aircraft_id.as_str()) {
            track.push( sample)
        } else {
            let mut track = Track::new( &sample.aircraft_id);
            track.push( sample)?;
            self.tracks.insert( track.id.clone(), track);
            Ok(())
        }
    }

    /// add a complete track. An existing track of the same aircraft is replaced
    pub fn insert_track (&mut self, track: Track) {
        if let Some(old) = self.tracks.insert( track.id.clone(), track) {
            warn!("replaced track of {} ({} samples)", old.id, old.len());
        }
    }

    pub fn track (&self, id: &str)->Option<&Track> { self.tracks.get(id) }
    pub fn tracks (&self)->impl Iterator<Item=&Track> { self.tracks.values() }
    pub fn aircraft_ids (&self)->impl Iterator<Item=&str> { self.tracks.keys().map(|k| k.as_str()) }

    pub fn len (&self)->usize { self.tracks.len() }
    pub fn is_empty (&self)->bool { self.tracks.is_empty() }
    pub fn n_samples (&self)->usize { self.tracks.values().map(|t| t.len()).sum() }

    /// (earliest,latest) sample timestamp over all tracks
    pub fn time_span (&self)->Option<(f64,f64)> {
        self.tracks.values().fold( None, |acc, t| {
            match (acc, t.first(), t.last()) {
                (None, Some(f), Some(l)) => Some( (f.timestamp, l.timestamp) ),
                (Some((t0,t1)), Some(f), Some(l)) => Some( (t0.min(f.timestamp), t1.max(l.timestamp)) ),
                (acc, _, _) => acc
            }
        })
    }

    /// sorted, de-duplicated sample timestamps of all tracks
    pub fn timestamps (&self)->Vec<f64> {
        let mut ts: Vec<f64> = self.tracks.values().flat_map( |t| t.samples.iter().map( |s| s.timestamp)).collect();
        ts.sort_by( |a,b| a.total_cmp(b));
        ts.dedup();
        ts
    }

    /// snapshot of all aircraft that have a sample at or before `t` that is not older than `max_age`
    pub fn states_at (&self, t: f64, max_age: f64)->Vec<AircraftState> {
        let states: Vec<AircraftState> = self.tracks.values().filter_map( |track| track.state_at( t, max_age)).collect();
        debug!("{} aircraft states at {}", states.len(), t);
        states
    }
}

/* #endregion TrackStore */

/* #region AircraftState ***********************************************************************************************/

/// the kinematic state of an aircraft at a given instant
#[derive(Debug,Clone,Serialize)]
pub struct AircraftState {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude: Length,
    pub ground_speed: Velocity,
    pub track: Angle360,
    pub vertical_rate: Velocity,
}

impl AircraftState {
    pub fn new (id: impl ToString, lat: f64, lon: f64, altitude_ft: f64, ground_speed_kn: f64, track_deg: f64, vertical_rate_fpm: f64)->Self {
        AircraftState {
            id: id.to_string(),
            lat, lon,
            altitude: Length::new::<foot>(altitude_ft),
            ground_speed: Velocity::new::<knot>(ground_speed_kn),
            track: Angle360::from_degrees(track_deg),
            vertical_rate: Velocity::new::<foot_per_minute>(vertical_rate_fpm)
        }
    }

    pub fn altitude_ft (&self)->f64 { self.altitude.get::<foot>() }
    pub fn ground_speed_kn (&self)->f64 { self.ground_speed.get::<knot>() }
    pub fn vertical_rate_fpm (&self)->f64 { self.vertical_rate.get::<foot_per_minute>() }

    pub fn is_on_ground (&self, ground_altitude_ft: f64)->bool { self.altitude_ft() < ground_altitude_ft }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "AircraftState( id: {}, pos: [{:.6},{:.6}], alt: {:.0}, spd: {:.1}, trk: {:.0}, vr: {:.0})",
            self.id, self.lat, self.lon, self.altitude_ft(), self.ground_speed_kn(), self.track.degrees(), self.vertical_rate_fpm())
    }
}

/* #endregion AircraftState */
