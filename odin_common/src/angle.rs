/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

//! degree normalization and a [0,360) direction type for headings and ground tracks

use std::{cmp::Ordering, fmt};
use serde::{Serialize,Deserialize,Serializer,Deserializer};

/// latitude like folding into [-90,90]
#[inline]
pub fn normalize_90 (d: f64)->f64 {
    let x = normalize_180(d);
    if x > 90.0 { 180.0 - x } else if x < -90.0 { -180.0 - x } else { x }
}

/// longitude like wrapping into (-180,180]
#[inline]
pub fn normalize_180 (d: f64)->f64 {
    if d > -180.0 && d <= 180.0 { return d }
    let x = d.rem_euclid(360.0);
    if x > 180.0 { x - 360.0 } else { x }
}

/// wrapping into [0,360)
#[inline]
pub fn normalize_360 (d: f64)->f64 {
    if (0.0..360.0).contains(&d) { return d }
    let x = d.rem_euclid(360.0);
    if x >= 360.0 { 0.0 } else { x } // rem_euclid can round up to 360 for tiny negative d
}

/// clockwise direction from true north in [0,360) degrees
#[derive(Clone,Copy)]
pub struct Angle360 {
    deg: f64,
}

impl Angle360 {
    #[inline]
    pub fn from_degrees (deg: f64)->Self { Angle360 { deg: normalize_360(deg) } }

    #[inline] pub fn degrees (&self)->f64 { self.deg }
    #[inline] pub fn radians (&self)->f64 { self.deg.to_radians() }

    pub fn reciprocal (&self)->Self { Angle360::from_degrees( self.deg + 180.0) }

    /// shortest signed turn in degrees to reach `other` (positive is clockwise)
    pub fn turn_to (&self, other: &Angle360)->f64 { normalize_180( other.deg - self.deg) }
}

impl From<Angle360> for f64 {
    fn from (a: Angle360)->Self { a.deg }
}

impl fmt::Display for Angle360 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", self.deg) }
}

impl fmt::Debug for Angle360 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Angle360({})", self.deg) }
}

impl PartialEq for Angle360 {
    fn eq(&self, other: &Self) -> bool { self.deg == other.deg }
}

impl PartialOrd for Angle360 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { self.deg.partial_cmp( &other.deg) }
}

impl Serialize for Angle360 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64( self.deg)
    }
}

// recorded headings come as [0..360], [-180..180] or accumulated turns. Anything finite is normalized
impl<'de> Deserialize<'de> for Angle360 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let deg = f64::deserialize(deserializer)?;
        if deg.is_finite() {
            Ok( Angle360::from_degrees(deg))
        } else {
            Err( serde::de::Error::custom( format!("not a finite heading: {deg}")))
        }
    }
}
