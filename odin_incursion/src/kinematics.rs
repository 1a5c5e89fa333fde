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

//! great circle dead reckoning on the mean earth sphere

use odin_common::{sin, cos, asin, atan2, rad, deg};
use odin_common::angle::normalize_180;
use odin_common::geo_constants::MEAN_EARTH_RADIUS;
use odin_adsb::PositionSample;

use crate::errors::{OdinIncursionError,Result,invalid_input};

/// position (lat,lon degrees) reached after `dt` seconds at constant `speed` (m/s) and heading (degrees)
pub fn project_position (lat: f64, lon: f64, heading_deg: f64, speed: f64, dt: f64)->Result<(f64,f64)> {
    if dt < 0.0 { return Err( invalid_input!("negative projection time {}", dt)) }
    if !(lat.is_finite() && lon.is_finite() && heading_deg.is_finite() && speed.is_finite() && dt.is_finite()) {
        return Err( invalid_input!("non-finite projection input ({},{}) hdg={} spd={} dt={}", lat, lon, heading_deg, speed, dt))
    }
    if dt == 0.0 || speed == 0.0 { return Ok( (lat,lon) ) }

    let delta = speed * dt / MEAN_EARTH_RADIUS;
    let theta = rad(heading_deg);
    let phi1 = rad(lat);
    let lambda1 = rad(lon);

    let phi2 = asin( sin(phi1)*cos(delta) + cos(phi1)*sin(delta)*cos(theta));
    let lambda2 = lambda1 + atan2( sin(theta)*sin(delta)*cos(phi1), cos(delta) - sin(phi1)*sin(phi2));

    Ok( (deg(phi2), normalize_180( deg(lambda2))) )
}

/// dead reckoning from a sample's reported position, speed and heading
pub fn project_sample (sample: &PositionSample, dt: f64)->Result<(f64,f64)> {
    project_position( sample.lat, sample.lon, sample.heading.degrees(), sample.speed, dt)
}
