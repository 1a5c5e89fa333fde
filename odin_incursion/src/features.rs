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

//! static airport geometry (runways and taxiways) referenced by ATC instructions. Features are read from
//! GeoJSON exports of OpenStreetMap `aeroway` data

use std::{fmt, fs, path::Path, str::FromStr};
use serde::{Serialize,Deserialize};
use serde_json::Value as JsonValue;
use geo::{Centroid, Coord, Geometry};
use geojson::GeoJson;
use tracing::{debug,info,warn};

use crate::errors::{OdinIncursionError,Result,feature_error};

/// used if there are no features to compute an airport center from (Chicago Midway)
pub const DEFAULT_CENTER: Coord = Coord { x: -87.7522, y: 41.7868 };

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FeatureKind { Runway, Taxiway }

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Runway => write!(f, "runway"),
            FeatureKind::Taxiway => write!(f, "taxiway"),
        }
    }
}

/// a named piece of airport geometry in (lon,lat) degrees.
/// `buffer_margin` overrides the margin of the evaluation context, `width` widens the buffer by half of it
#[derive(Debug,Clone)]
pub struct StaticFeature {
    pub reference: String,
    pub kind: FeatureKind,
    pub geometry: Geometry,
    pub buffer_margin: Option<f64>,
    pub width: Option<f64>,
}

impl StaticFeature {
    pub fn new (reference: impl ToString, kind: FeatureKind, geometry: Geometry)->Self {
        StaticFeature { reference: reference.to_string().trim().to_string(), kind, geometry, buffer_margin: None, width: None }
    }

    pub fn with_buffer_margin (mut self, margin: f64)->Self { self.buffer_margin = Some(margin); self }
    pub fn with_width (mut self, width: f64)->Self { self.width = Some(width); self }

    /// buffer distance in meters if the evaluation context uses `default_margin`
    pub fn effective_margin (&self, default_margin: f64)->f64 {
        self.buffer_margin.unwrap_or( default_margin) + self.width.map( |w| w / 2.0).unwrap_or(0.0)
    }

    /// the runway designators of this feature ("13C/31C" -> ["13C","31C"])
    pub fn designators (&self)->impl Iterator<Item=&str> {
        self.reference.split('/').map( |d| d.trim()).filter( |d| !d.is_empty())
    }
}

/// all features of an airport
#[derive(Debug,Clone)]
pub struct FeatureSet {
    features: Vec<StaticFeature>,
    center: Coord,
}

impl FeatureSet {
    pub fn new (features: Vec<StaticFeature>)->Self {
        let center = mean_centroid( &features, FeatureKind::Runway)
            .or_else( || mean_centroid( &features, FeatureKind::Taxiway))
            .unwrap_or( DEFAULT_CENTER);
        FeatureSet { features, center }
    }

    /// (lon,lat) center of the airport, the mean runway centroid if there are runways
    pub fn center (&self)->Coord { self.center }

    pub fn len (&self)->usize { self.features.len() }
    pub fn is_empty (&self)->bool { self.features.is_empty() }
    pub fn features (&self)->&[StaticFeature] { self.features.as_slice() }
    pub fn runways (&self)->impl Iterator<Item=&StaticFeature> { self.features.iter().filter( |f| f.kind == FeatureKind::Runway) }
    pub fn taxiways (&self)->impl Iterator<Item=&StaticFeature> { self.features.iter().filter( |f| f.kind == FeatureKind::Taxiway) }

    /// index of the feature with the given reference. If there is no exact match we look for a runway that
    /// has a matching designator ("31C" finds "13C/31C")
    pub fn find_index (&self, reference: &str)->Option<usize> {
        let reference = reference.trim();
        if reference.is_empty() { return None }

        self.features.iter().position( |f| f.reference == reference).or_else( || {
            let idx = self.features.iter().position( |f| {
                f.kind == FeatureKind::Runway && f.designators().any( |d| d == reference)
            });
            if let Some(i) = idx { debug!("runway designator {} resolved to {}", reference, self.features[i].reference); }
            idx
        })
    }

    pub fn find (&self, reference: &str)->Option<&StaticFeature> {
        self.find_index( reference).map( |i| &self.features[i])
    }

    pub fn from_geojson (input: &str)->Result<Self> {
        let gj = GeoJson::from_str( input).map_err( |e| feature_error!("invalid GeoJSON: {}", e))?;

        let features = match gj {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => return Err( feature_error!("GeoJSON geometry without feature properties"))
        };

        let n_features = features.len();
        let mut list: Vec<StaticFeature> = Vec::with_capacity( n_features);
        for f in &features {
            match static_feature( f) {
                Ok(Some(sf)) => list.push(sf),
                Ok(None) => {}
                Err(e) => warn!("skipping feature: {}", e)
            }
        }

        let set = FeatureSet::new( list);
        info!("{} of {} GeoJSON features used ({} runways, {} taxiways)", set.len(), n_features, set.runways().count(), set.taxiways().count());
        Ok(set)
    }

    pub fn load_geojson<P: AsRef<Path>> (path: P)->Result<Self> {
        let s = fs::read_to_string( path.as_ref())?;
        FeatureSet::from_geojson( &s)
    }
}

fn mean_centroid (features: &[StaticFeature], kind: FeatureKind)->Option<Coord> {
    let (n, sx, sy) = features.iter()
        .filter( |f| f.kind == kind)
        .filter_map( |f| f.geometry.centroid())
        .fold( (0usize, 0.0, 0.0), |(n,sx,sy), p| (n+1, sx + p.x(), sy + p.y()));

    if n > 0 { Some( Coord { x: sx / n as f64, y: sy / n as f64 }) } else { None }
}

fn str_property<'a> (f: &'a geojson::Feature, key: &str)->Option<&'a str> {
    f.property(key).and_then( |v| v.as_str()).map( |s| s.trim()).filter( |s| !s.is_empty())
}

// OSM tags are strings, derived exports often use numbers
fn f64_property (f: &geojson::Feature, key: &str)->Option<f64> {
    let v: Option<f64> = match f.property(key)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().trim_end_matches('m').trim().parse().ok(),
        _ => None
    };
    v.filter( |v| v.is_finite() && *v >= 0.0)
}

fn feature_kind (f: &geojson::Feature, reference: &str)->FeatureKind {
    for key in ["aeroway", "service"] {
        match str_property( f, key) {
            Some("runway") => return FeatureKind::Runway,
            Some("taxiway") | Some("taxilane") => return FeatureKind::Taxiway,
            _ => {}
        }
    }
    if reference.contains('/') { FeatureKind::Runway } else { FeatureKind::Taxiway }
}

/// Ok(None) for features that cannot be referenced (no `ref` property)
fn static_feature (f: &geojson::Feature)->Result<Option<StaticFeature>> {
    let Some(reference) = str_property( f, "ref") else {
        return Ok(None)
    };

    let geometry = f.geometry.as_ref().ok_or_else( || feature_error!("feature {} has no geometry", reference))?;
    let geometry = Geometry::<f64>::try_from( &geometry.value).map_err( |e| feature_error!("feature {} has invalid geometry: {}", reference, e))?;

    let mut sf = StaticFeature::new( reference, feature_kind( f, reference), geometry);
    sf.buffer_margin = f64_property( f, "buffer_margin");
    sf.width = f64_property( f, "width");
    Ok(Some(sf))
}
