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

use odin_common::geo::haversine_distance_m;
use odin_adsb::PositionSample;
use odin_incursion::{errors::OdinIncursionError, kinematics::{project_position, project_sample}};

// run with "cargo test test_projection -- --nocapture"

#[test]
fn test_zero_dt() {
    let (lat,lon) = project_position( 41.7868, -87.7522, 135.0, 12.0, 0.0).unwrap();
    assert_eq!( (lat,lon), (41.7868, -87.7522));
}

#[test]
fn test_projection_distance() {
    for (hdg, spd, dt) in [(0.0, 10.0, 30.0), (90.0, 70.0, 5.0), (225.0, 3.5, 60.0), (310.0, 250.0, 120.0)] {
        let (lat,lon) = project_position( 41.7868, -87.7522, hdg, spd, dt).unwrap();
        let d = haversine_distance_m( 41.7868, -87.7522, lat, lon);
        println!("hdg={hdg} spd={spd} dt={dt} -> ({lat:.6},{lon:.6}), dist={d:.3}m (expected {})", spd*dt);
        assert!( (d - spd*dt).abs() < 1e-6 * spd * dt + 1e-6);
    }
}

#[test]
fn test_projection_direction() {
    let (lat,lon) = project_position( 41.0, -87.0, 0.0, 100.0, 10.0).unwrap();
    assert!( lat > 41.0 && (lon + 87.0).abs() < 1e-9);

    let (lat,lon) = project_position( 41.0, -87.0, 90.0, 100.0, 10.0).unwrap();
    assert!( lon > -87.0);

    let sample = PositionSample::new( "SWA2504", 100.0, 41.0, -87.0, None, 100.0, 180.0);
    let (lat,lon) = project_sample( &sample, 10.0).unwrap();
    assert!( lat < 41.0);
}

#[test]
fn test_invalid_projection() {
    let res = project_position( 41.0, -87.0, 0.0, 10.0, -1.0);
    println!("negative dt -> {res:?}");
    assert!( matches!( res, Err(OdinIncursionError::InvalidInput(_))));

    let res = project_position( f64::NAN, -87.0, 0.0, 10.0, 1.0);
    assert!( matches!( res, Err(OdinIncursionError::InvalidInput(_))));
}
