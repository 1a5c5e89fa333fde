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

//! closed form time-to-conflict between pairs of aircraft that keep their current ground track and speed.
//! Positions are approximated on a flat earth around the pair (60nm per degree), velocities are in nm/s

use std::fmt;
use serde::Serialize;
use itertools::Itertools;
use tracing::debug;

use odin_common::{sin, cos, rad, sqrt, pow2};
use odin_common::geo::haversine_distance_nm;
use odin_common::geo_constants::{NM_PER_DEGREE, FEET_PER_NM, SECS_PER_HOUR};
use odin_adsb::AircraftState;

use crate::config::IncursionConfig;

/// relative motion below this (nm²/s²) counts as no relative motion
const MIN_RELATIVE_MOTION: f64 = 1e-9;

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct AirborneAlert {
    pub id_a: String,
    pub id_b: String,
    pub timestamp: f64,
    pub time_to_conflict_secs: f64,
    pub current_distance_nm: f64,
}

impl fmt::Display for AirborneAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "potential collision {} / {} in ~{:.1}s, current distance ~{:.2} nm",
            self.id_a, self.id_b, self.time_to_conflict_secs, self.current_distance_nm)
    }
}

/// (east,north) velocity in nm/s from ground speed and track
fn velocity_nm_s (state: &AircraftState)->(f64,f64) {
    let v = state.ground_speed_kn() / SECS_PER_HOUR;
    let theta = state.track.radians();
    (v * sin(theta), v * cos(theta))
}

/// current 3D separation in nm (great circle horizontal distance combined with altitude difference)
pub fn separation_nm (a: &AircraftState, b: &AircraftState)->f64 {
    if !(a.lat.is_finite() && a.lon.is_finite() && b.lat.is_finite() && b.lon.is_finite()) {
        return f64::INFINITY
    }
    let horizontal = haversine_distance_nm( a.lat, a.lon, b.lat, b.lon);
    let vertical = (a.altitude_ft() - b.altitude_ft()).abs() / FEET_PER_NM;
    sqrt( pow2(horizontal) + pow2(vertical))
}

pub struct AirborneConflictEvaluator {
    collision_radius_nm: f64,
    alert_window_secs: f64,
    ground_altitude_ft: f64,
    ground_vertical_sep_ft: f64,
    airborne_vertical_sep_ft: f64,
}

impl AirborneConflictEvaluator {
    pub fn new (config: &IncursionConfig)->Self {
        AirborneConflictEvaluator {
            collision_radius_nm: config.collision_radius_nm,
            alert_window_secs: config.alert_window_secs,
            ground_altitude_ft: config.ground_altitude_ft,
            ground_vertical_sep_ft: config.ground_vertical_sep_ft,
            airborne_vertical_sep_ft: config.airborne_vertical_sep_ft,
        }
    }

    /// seconds until the horizontal distance of `a` and `b` drops to the collision radius, or None if that
    /// does not happen (or the pair is vertically separated). 0 if they are already within the radius
    pub fn time_to_conflict (&self, a: &AircraftState, b: &AircraftState)->Option<f64> {
        let vertical_gate = if a.is_on_ground( self.ground_altitude_ft) && b.is_on_ground( self.ground_altitude_ft) {
            self.ground_vertical_sep_ft
        } else {
            self.airborne_vertical_sep_ft
        };
        if (a.altitude_ft() - b.altitude_ft()).abs() > vertical_gate { return None }

        if !(a.lat.is_finite() && a.lon.is_finite() && b.lat.is_finite() && b.lon.is_finite()) { return None }

        let mean_lat = (a.lat + b.lat) / 2.0;
        let dx = (b.lon - a.lon) * cos( rad(mean_lat)) * NM_PER_DEGREE;
        let dy = (b.lat - a.lat) * NM_PER_DEGREE;

        let (vxa,vya) = velocity_nm_s(a);
        let (vxb,vyb) = velocity_nm_s(b);
        let dvx = vxb - vxa;
        let dvy = vyb - vya;

        let r = self.collision_radius_nm;
        let qa = pow2(dvx) + pow2(dvy);
        let qb = 2.0 * (dx*dvx + dy*dvy);
        let qc = pow2(dx) + pow2(dy) - pow2(r);

        if qa < MIN_RELATIVE_MOTION {
            return if sqrt( pow2(dx) + pow2(dy)) <= r { Some(0.0) } else { None }
        }

        let disc = qb*qb - 4.0*qa*qc;
        if disc < 0.0 { return None }

        let sd = sqrt(disc);
        let t1 = (-qb + sd) / (2.0*qa);
        let t2 = (-qb - sd) / (2.0*qa);

        [t1,t2].into_iter().filter( |t| *t >= 0.0).reduce( f64::min)
    }

    /// alerts for all unordered pairs of `states` that come within the collision radius inside the alert window
    pub fn evaluate (&self, states: &[AircraftState], timestamp: f64)->Vec<AirborneAlert> {
        let alerts: Vec<AirborneAlert> = states.iter().tuple_combinations().filter_map( |(a,b)| {
            let ttc = self.time_to_conflict( a, b)?;
            if ttc <= self.alert_window_secs {
                Some( AirborneAlert {
                    id_a: a.id.clone(),
                    id_b: b.id.clone(),
                    timestamp,
                    time_to_conflict_secs: ttc,
                    current_distance_nm: separation_nm( a, b),
                })
            } else {
                None
            }
        }).collect();

        if !alerts.is_empty() { debug!("{} airborne alerts at {}", alerts.len(), timestamp); }
        alerts
    }
}
