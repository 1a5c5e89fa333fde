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

use geo::{Coord, Geometry, Line, LineString};
use odin_common::angle::*;
use odin_common::geo::*;

// run with "cargo test test_angles -- --nocapture"

#[test]
fn test_angles() {
    let a = Angle360::from_degrees( -90.0);
    println!("display a = {}, debug a = {:?}", a, a);
    assert_eq!( a.degrees(), 270.0);
    assert_eq!( a.reciprocal().degrees(), 90.0);

    let b = Angle360::from_degrees( 350.0);
    let turn = b.turn_to( &Angle360::from_degrees( 10.0));
    println!("turn from {} to 10deg: {}", b, turn);
    assert_eq!( turn, 20.0);
    assert_eq!( Angle360::from_degrees( 10.0).turn_to( &b), -20.0);

    let c: Angle360 = serde_json::from_str( "725.0").unwrap();
    assert_eq!( c.degrees(), 5.0);
    assert_eq!( serde_json::to_string( &c).unwrap(), "5.0");

    assert_eq!( normalize_180( 190.0), -170.0);
    assert_eq!( normalize_90( 100.0), 80.0);
}

#[test]
fn test_haversine() {
    // one degree of latitude on the mean sphere
    let d = haversine_distance_m( 41.0, -87.0, 42.0, -87.0);
    println!("1deg lat = {d}m");
    assert!( (d - 111194.9).abs() < 1.0);

    let d_nm = haversine_distance_nm( 41.0, -87.0, 42.0, -87.0);
    println!("1deg lat = {d_nm}nm");
    assert!( (d_nm - 60.04).abs() < 0.01);

    assert_eq!( haversine_distance_m( 41.0, -87.0, 41.0, -87.0), 0.0);
}

// run with "cargo test test_local_frame -- --nocapture"

#[test]
fn test_local_frame() {
    let frame = LocalFrame::new( -87.75, 41.78);
    println!("frame: {frame}");

    let p = Coord { x: -87.74, y: 41.79 };
    let local = frame.to_local( p);
    println!("{:?} -> local {:?}", p, local);

    // local distances agree with great circle distances at airport scale
    let d_local = (local.x * local.x + local.y * local.y).sqrt();
    let d_gc = haversine_distance_m( 41.78, -87.75, 41.79, -87.74);
    println!("local: {d_local}m, great circle: {d_gc}m");
    assert!( (d_local - d_gc).abs() < 1.0);

    let back = frame.to_geodetic( local);
    assert!( (back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);

    let line = Line::new( Coord { x: -87.75, y: 41.78 }, p);
    let pl = frame.project_line( &line);
    assert_eq!( pl.start, Coord { x: 0.0, y: 0.0 });

    let geom = Geometry::LineString( LineString::from( vec![ (-87.76, 41.78), (-87.75, 41.78)]));
    if let Geometry::LineString(ls) = frame.project_geometry( &geom) {
        println!("projected linestring: {:?}", ls);
        assert!( ls.0[0].x < 0.0);
        assert_eq!( ls.0[1].x, 0.0);
    } else {
        panic!("wrong geometry type");
    }
}
