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

use odin_adsb::{PositionSample, Track, TrackStore, errors::OdinAdsbError};
use odin_adsb::ingest::{read_track_log, read_samples_json, SpeedUnit};

//--- test data

const TRACK_LOG: &'static str = r#"Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction
1740494860,2025-02-25T14:47:40Z,LXJ560,"41.7840,-87.7550",0,12,90
1740494850,2025-02-25T14:47:30Z,LXJ560,"41.7840,-87.7560",0,10,90
1740494855,2025-02-25T14:47:35Z,LXJ560,,0,11,90
1740494865,2025-02-25T14:47:45Z,LXJ560,"41.7841,-87.7545",25,3,95
"#;

const SAMPLES_JSON: &'static str = r#"[
  {"aircraftId":"SWA2504","timestamp":100.0,"lat":41.78,"lon":-87.75,"altitudeFt":500,"speed":70,"heading":310},
  {"aircraftId":"SWA2504","timestamp":101.0,"lat":null,"lon":-87.75,"altitudeFt":480,"speed":70,"heading":310},
  {"aircraftId":"LXJ560","timestamp":100.5,"lat":41.79,"lon":-87.76,"altitudeFt":null,"speed":5,"heading":-90},
  {"aircraftId":"SWA2504","timestamp":102.0,"lat":41.781,"lon":-87.751,"altitudeFt":440,"speed":68,"heading":310}
]"#;

// run with "cargo test test_track_log -- --nocapture"

#[test]
fn test_track_log() {
    let track = read_track_log( TRACK_LOG.as_bytes(), SpeedUnit::MetersPerSecond).unwrap();
    println!("track {} with {} samples", track.id(), track.len());
    for s in track.samples() { println!("  {s}"); }

    assert_eq!( track.id(), "LXJ560");
    assert_eq!( track.len(), 3); // record without position skipped
    assert!( track.samples().windows(2).all( |w| w[0].timestamp <= w[1].timestamp));
    assert_eq!( track.first().unwrap().timestamp, 1740494850.0);
    assert_eq!( track.last().unwrap().altitude_ft, Some(25.0));
}

#[test]
fn test_track_log_knots() {
    let track = read_track_log( TRACK_LOG.as_bytes(), SpeedUnit::Knots).unwrap();
    let s = track.first().unwrap();
    println!("10kn = {} m/s", s.speed);
    assert!( (s.speed - 5.1444).abs() < 1e-3);
}

#[test]
fn test_empty_track_log() {
    let input = "Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction\n";
    let res = read_track_log( input.as_bytes(), SpeedUnit::MetersPerSecond);
    println!("empty track log -> {res:?}");
    assert!( res.is_err());
}

#[test]
fn test_samples_json() {
    let samples = read_samples_json( SAMPLES_JSON).unwrap();
    assert_eq!( samples.len(), 3); // null lat skipped

    let lxj = samples.iter().find( |s| s.aircraft_id == "LXJ560").unwrap();
    println!("{lxj}");
    assert_eq!( lxj.heading.degrees(), 270.0);
    assert_eq!( lxj.altitude_ft, None);

    let store = TrackStore::from_samples( samples).unwrap();
    assert_eq!( store.len(), 2);
    assert_eq!( store.n_samples(), 3);
    assert_eq!( store.time_span(), Some((100.0, 102.0)));
    assert_eq!( store.aircraft_ids().collect::<Vec<_>>(), vec!["LXJ560", "SWA2504"]);
}

#[test]
fn test_unsorted_samples() {
    let samples = vec![
        PositionSample::new( "A", 10.0, 41.0, -87.0, None, 1.0, 0.0),
        PositionSample::new( "A", 9.0, 41.0, -87.0, None, 1.0, 0.0),
    ];
    let res = TrackStore::from_samples( samples);
    println!("unsorted -> {res:?}");
    assert!( matches!( res, Err(OdinAdsbError::UnsortedSamples{..})));
}

// run with "cargo test test_states_at -- --nocapture"

#[test]
fn test_states_at() {
    let samples = vec![
        PositionSample::new( "A", 10.0, 41.0, -87.0, Some(1000.0), 100.0, 45.0),
        PositionSample::new( "A", 20.0, 41.01, -87.0, Some(1500.0), 100.0, 45.0),
        PositionSample::new( "B", 5.0, 41.2, -87.1, None, 0.0, 180.0),
    ];
    let store = TrackStore::from_samples( samples).unwrap();

    let states = store.states_at( 25.0, 30.0);
    for s in &states { println!("{s}"); }
    assert_eq!( states.len(), 2);

    let a = states.iter().find( |s| s.id == "A").unwrap();
    assert_eq!( a.lat, 41.01);
    assert!( (a.altitude_ft() - 1500.0).abs() < 1e-6);
    assert!( (a.vertical_rate_fpm() - 3000.0).abs() < 1e-6); // 500ft in 10s
    assert!( (a.ground_speed_kn() - 194.384).abs() < 1e-2); // 100m/s

    let b = states.iter().find( |s| s.id == "B").unwrap();
    assert_eq!( b.altitude_ft(), 0.0); // missing altitude
    assert!( b.is_on_ground( 50.0));

    // B is too old, A has no sample yet
    assert_eq!( store.states_at( 40.0, 10.0).len(), 0);
    assert_eq!( store.states_at( 7.0, 10.0).len(), 1);
}
