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

//! this module provides spherical earth support for airport scale geometry.
//! We use the [geo](https://docs.rs/geo/latest/geo/index.html) crate algorithms wherever possible. Since
//! buffering and intersection in `geo` are planar operations we map geodetic (lon,lat) degrees into a local
//! tangent plane (meters) around a reference point first. At airport scale (a few km) the equirectangular
//! approximation error is far below the buffer margins we use.

use std::fmt;
use serde::{Serialize,Deserialize};

use geo::{Coord, Distance, Geometry, HaversineMeasure, Line, MapCoords, Point};

use crate::{cos, rad, deg};
use crate::angle::{normalize_180, normalize_90};
use crate::geo_constants::{MEAN_EARTH_RADIUS, MEAN_EARTH_RADIUS_NM};

pub type GeoCoord = Coord<f64>;

/// great circle distance in meters between two (lat,lon) degree positions on the mean earth sphere
pub fn haversine_distance_m (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    HaversineMeasure::new( MEAN_EARTH_RADIUS).distance( Point::new( lon1, lat1), Point::new( lon2, lat2))
}

/// great circle distance in nautical miles between two (lat,lon) degree positions
pub fn haversine_distance_nm (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    HaversineMeasure::new( MEAN_EARTH_RADIUS_NM).distance( Point::new( lon1, lat1), Point::new( lon2, lat2))
}

/* #region LocalFrame ***********************************************************************************************/

/// an equirectangular tangent plane around an origin. Local coordinates are (east,north) in meters
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LocalFrame {
    origin_lon: f64,
    origin_lat: f64,
    cos_lat: f64,
}

impl LocalFrame {
    pub fn new (origin_lon: f64, origin_lat: f64)->Self {
        let origin_lat = normalize_90(origin_lat);
        LocalFrame { origin_lon: normalize_180(origin_lon), origin_lat, cos_lat: cos(rad(origin_lat)) }
    }

    pub fn from_coord (c: GeoCoord)->Self { LocalFrame::new( c.x, c.y) }

    pub fn origin (&self)->GeoCoord { Coord { x: self.origin_lon, y: self.origin_lat } }

    /// (lon,lat) degrees -> (east,north) meters
    pub fn to_local (&self, c: GeoCoord)->GeoCoord {
        // this is where the antimeridian gets handled
        let dlon = normalize_180( c.x - self.origin_lon);
        Coord {
            x: MEAN_EARTH_RADIUS * rad(dlon) * self.cos_lat,
            y: MEAN_EARTH_RADIUS * rad(c.y - self.origin_lat)
        }
    }

    /// (east,north) meters -> (lon,lat) degrees
    pub fn to_geodetic (&self, c: GeoCoord)->GeoCoord {
        Coord {
            x: normalize_180( self.origin_lon + deg( c.x / (MEAN_EARTH_RADIUS * self.cos_lat))),
            y: self.origin_lat + deg( c.y / MEAN_EARTH_RADIUS)
        }
    }

    pub fn project_line (&self, line: &Line)->Line {
        line.map_coords( |c| self.to_local(c))
    }

    pub fn project_geometry (&self, geom: &Geometry)->Geometry {
        geom.map_coords( |c| self.to_local(c))
    }
}

impl fmt::Display for LocalFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalFrame[{},{}]", self.origin_lon, self.origin_lat)
    }
}

/* #endregion LocalFrame */
