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

use odin_adsb::AircraftState;
use odin_incursion::{IncursionConfig, AirborneConflictEvaluator, airborne::separation_nm};

const LAT: f64 = 41.0;
const LON: f64 = -87.0;

/// longitude difference that gives `nm` nautical miles east-west at LAT
fn dlon (nm: f64)->f64 { nm / (60.0 * LAT.to_radians().cos()) }

fn evaluator ()->AirborneConflictEvaluator { AirborneConflictEvaluator::new( &IncursionConfig::default()) }

// run with "cargo test test_head_on -- --nocapture"

#[test]
fn test_head_on() {
    let ace = evaluator();

    // 5nm apart, closing at 600kn = 1/6 nm/s
    let a = AircraftState::new( "A", LAT, LON, 3000.0, 300.0, 90.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON + dlon(5.0), 3000.0, 300.0, 270.0, 0.0);

    let ttc = ace.time_to_conflict( &a, &b).unwrap();
    println!("head on ttc = {ttc:.3}s");
    assert!( (ttc - (5.0 - 0.2) * 6.0).abs() < 1e-6);
    assert_eq!( ace.time_to_conflict( &b, &a), Some(ttc));

    let alerts = ace.evaluate( &[a.clone(), b.clone()], 100.0);
    assert_eq!( alerts.len(), 1);
    println!("{}", alerts[0]);
    assert_eq!( (alerts[0].id_a.as_str(), alerts[0].id_b.as_str()), ("A","B"));
    assert!( (alerts[0].current_distance_nm - 5.0).abs() < 0.01);

    // 15nm apart: conflict in 88.8s is outside of the 60s window
    let b = AircraftState::new( "B", LAT, LON + dlon(15.0), 3000.0, 300.0, 270.0, 0.0);
    let ttc = ace.time_to_conflict( &a, &b).unwrap();
    assert!( (ttc - 88.8).abs() < 1e-6);
    assert!( ace.evaluate( &[a,b], 100.0).is_empty());
}

#[test]
fn test_no_conflict() {
    let ace = evaluator();

    // diverging
    let a = AircraftState::new( "A", LAT, LON, 3000.0, 300.0, 270.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON + dlon(5.0), 3000.0, 300.0, 90.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_none());

    // parallel tracks 1nm apart, same velocity
    let a = AircraftState::new( "A", LAT, LON, 3000.0, 300.0, 90.0, 0.0);
    let b = AircraftState::new( "B", LAT + 1.0/60.0, LON, 3000.0, 300.0, 90.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_none());

    // parallel tracks 0.5nm apart, overtaking
    let b = AircraftState::new( "B", LAT + 0.5/60.0, LON - dlon(2.0), 3000.0, 400.0, 90.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_none());
}

#[test]
fn test_vertical_gate() {
    let ace = evaluator();

    let a = AircraftState::new( "A", LAT, LON, 3000.0, 300.0, 90.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON + dlon(5.0), 3900.0, 300.0, 270.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_some());

    let b = AircraftState::new( "B", LAT, LON + dlon(5.0), 4100.0, 300.0, 270.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_none());

    // on the ground the gate is much tighter
    let a = AircraftState::new( "A", LAT, LON, 0.0, 20.0, 90.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON + dlon(0.3), 40.0, 20.0, 270.0, 0.0);
    assert!( a.is_on_ground( 50.0) && b.is_on_ground( 50.0));
    assert!( ace.time_to_conflict( &a, &b).is_some());

    // one aircraft off the ground: airborne gate applies
    let b = AircraftState::new( "B", LAT, LON + dlon(0.3), 120.0, 20.0, 270.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_some());

    let config = IncursionConfig { ground_altitude_ft: 200.0, ..IncursionConfig::default() };
    let ace = AirborneConflictEvaluator::new( &config);
    assert!( ace.time_to_conflict( &a, &b).is_none());
}

#[test]
fn test_stationary() {
    let ace = evaluator();

    let a = AircraftState::new( "A", LAT, LON, 0.0, 0.0, 0.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON + dlon(0.1), 0.0, 0.0, 0.0, 0.0);
    assert_eq!( ace.time_to_conflict( &a, &b), Some(0.0));

    let b = AircraftState::new( "B", LAT, LON + dlon(0.5), 0.0, 0.0, 0.0, 0.0);
    assert!( ace.time_to_conflict( &a, &b).is_none());

    // already inside of the radius and moving apart
    let a = AircraftState::new( "A", LAT, LON, 3000.0, 300.0, 270.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON + dlon(0.1), 3000.0, 300.0, 90.0, 0.0);
    let ttc = ace.time_to_conflict( &a, &b).unwrap();
    println!("exit time {ttc:.3}s");
    assert!( ttc > 0.0);
}

// run with "cargo test test_separation -- --nocapture"

#[test]
fn test_separation() {
    let a = AircraftState::new( "A", LAT, LON, 1000.0, 0.0, 0.0, 0.0);
    let b = AircraftState::new( "B", LAT, LON, 1000.0 + 6076.12, 0.0, 0.0, 0.0);
    let d = separation_nm( &a, &b);
    println!("vertical only: {d} nm");
    assert!( (d - 1.0).abs() < 1e-9);

    let b = AircraftState::new( "B", LAT + 0.05, LON, 1000.0, 0.0, 0.0, 0.0);
    let d = separation_nm( &a, &b);
    println!("3 arcmin north: {d} nm");
    assert!( (d - 3.0).abs() < 0.01);
}

#[test]
fn test_pairs() {
    let ace = evaluator();
    let states = vec![
        AircraftState::new( "A", LAT, LON, 3000.0, 300.0, 90.0, 0.0),
        AircraftState::new( "B", LAT, LON + dlon(5.0), 3000.0, 300.0, 270.0, 0.0),
        AircraftState::new( "C", LAT + 1.0, LON, 3000.0, 300.0, 90.0, 0.0),
        AircraftState::new( "D", LAT, LON + dlon(2.0), 9000.0, 300.0, 270.0, 0.0),
    ];

    let alerts = ace.evaluate( &states, 42.0);
    for a in &alerts { println!("{a}"); }
    assert_eq!( alerts.len(), 1);
    assert_eq!( alerts[0].timestamp, 42.0);
    assert!( alerts[0].time_to_conflict_secs <= 60.0);
}
