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

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};
use odin_adsb::ingest::SpeedUnit;

use crate::errors::{OdinIncursionError,Result};

/// how the flight path segment of a sample is formed. Exactly one mode is used per run
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum SegmentMode {
    /// current fix -> position projected `lookahead_secs` ahead
    Predictive { lookahead_secs: f64, buffer_margin_m: f64 },
    /// previous fix -> current fix
    Retrospective { buffer_margin_m: f64 },
}

impl SegmentMode {
    pub fn buffer_margin_m (&self)->f64 {
        match self {
            SegmentMode::Predictive{buffer_margin_m,..} => *buffer_margin_m,
            SegmentMode::Retrospective{buffer_margin_m} => *buffer_margin_m,
        }
    }

    pub fn lookahead_secs (&self)->f64 {
        match self {
            SegmentMode::Predictive{lookahead_secs,..} => *lookahead_secs,
            SegmentMode::Retrospective{..} => 0.0,
        }
    }

    pub fn retrospective ()->Self { SegmentMode::Retrospective { buffer_margin_m: 20.0 } }
}

impl Default for SegmentMode {
    fn default()->Self { SegmentMode::Predictive { lookahead_secs: 30.0, buffer_margin_m: 40.0 } }
}

/// thresholds and parameters of a detection run. Speeds are in m/s
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct IncursionConfig {
    pub segment_mode: SegmentMode,

    pub landing_max_speed: f64,
    pub crossing_min_speed: f64,
    pub hold_max_speed: f64,

    /// judge holds by the per-instruction HOLD_SHORT rule instead of the hold-in-effect query
    pub legacy_hold_check: bool,

    pub collision_radius_nm: f64,
    pub alert_window_secs: f64,
    pub ground_altitude_ft: f64,
    pub ground_vertical_sep_ft: f64,
    pub airborne_vertical_sep_ft: f64,

    pub airborne_step_secs: f64,
    pub max_state_age_secs: f64,

    /// unit of the speed column in track logs
    pub track_speed_unit: SpeedUnit,

    /// (flight name, track id) in match order
    pub flight_ids: Vec<(String,String)>,
}

impl Default for IncursionConfig {
    fn default()->Self {
        IncursionConfig {
            segment_mode: SegmentMode::default(),
            landing_max_speed: 25.0,
            crossing_min_speed: 5.0,
            hold_max_speed: 1.0,
            legacy_hold_check: false,
            collision_radius_nm: 0.2,
            alert_window_secs: 60.0,
            ground_altitude_ft: 50.0,
            ground_vertical_sep_ft: 50.0,
            airborne_vertical_sep_ft: 1000.0,
            airborne_step_secs: 5.0,
            max_state_age_secs: 10.0,
            track_speed_unit: SpeedUnit::MetersPerSecond,
            flight_ids: vec![
                ("Southwest 2504".to_string(), "SWA2504".to_string()),
                ("FlexJet 560".to_string(), "LXJ560".to_string()),
            ],
        }
    }
}

impl IncursionConfig {
    pub fn check (&self)->Result<()> {
        let positive = [
            ("collision_radius_nm", self.collision_radius_nm),
            ("airborne_step_secs", self.airborne_step_secs),
        ];
        for (name,v) in positive {
            if !(v.is_finite() && v > 0.0) { return Err( config_error(name, v)) }
        }

        let non_negative = [
            ("landing_max_speed", self.landing_max_speed),
            ("crossing_min_speed", self.crossing_min_speed),
            ("hold_max_speed", self.hold_max_speed),
            ("alert_window_secs", self.alert_window_secs),
            ("ground_vertical_sep_ft", self.ground_vertical_sep_ft),
            ("airborne_vertical_sep_ft", self.airborne_vertical_sep_ft),
            ("max_state_age_secs", self.max_state_age_secs),
            ("lookahead_secs", self.segment_mode.lookahead_secs()),
            ("buffer_margin_m", self.segment_mode.buffer_margin_m()),
        ];
        for (name,v) in non_negative {
            if !(v.is_finite() && v >= 0.0) { return Err( config_error(name, v)) }
        }
        Ok(())
    }
}

fn config_error (name: &str, v: f64)->OdinIncursionError {
    OdinIncursionError::ConfigError( format!("invalid {name}: {v}"))
}

pub fn config_from_ron (input: &[u8])->Result<IncursionConfig> {
    let config: IncursionConfig = ron::de::from_bytes( input).map_err( |e| OdinIncursionError::ConfigError( e.to_string()))?;
    config.check()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>> (path: P)->Result<IncursionConfig> {
    let data = fs::read( path.as_ref())?;
    config_from_ron( data.as_slice())
}
