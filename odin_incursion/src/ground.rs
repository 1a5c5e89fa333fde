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

//! ground compliance: does the flight path segment of an aircraft agree with the ATC instruction that is
//! in effect? Segments and features are tested in a local tangent plane around the airport center, features
//! are buffered once per evaluator (i.e. margins are fixed for an evaluation context)

use std::fmt;
use serde::Serialize;
use geo::{Buffer, Coord, Intersects, Line, MultiPolygon};
use tracing::{debug,info,warn};

use odin_common::{angle::Angle360, geo::LocalFrame};
use odin_adsb::PositionSample;

use crate::advisory::{self, Advisory};
use crate::config::IncursionConfig;
use crate::errors::Result;
use crate::features::FeatureSet;
use crate::instruction::{Command, Instruction};
use crate::kinematics::project_sample;
use crate::timeline::InstructionTimeline;

/* #region FlightSegment ***********************************************************************************************/

/// the path an aircraft is (or was) on at the time of a sample. `start` and `end` are (lon,lat) degrees,
/// position, speed and heading are the reported values of the sample
#[derive(Debug,Clone,PartialEq)]
pub struct FlightSegment {
    pub aircraft_id: String,
    pub timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub heading: Angle360,
    pub start: Coord,
    pub end: Coord,
}

impl FlightSegment {
    /// from the reported position to where dead reckoning puts the aircraft after `lookahead_secs`
    pub fn predictive (sample: &PositionSample, lookahead_secs: f64)->Result<Self> {
        let (lat2,lon2) = project_sample( sample, lookahead_secs)?;
        Ok( FlightSegment::new( sample, Coord { x: sample.lon, y: sample.lat }, Coord { x: lon2, y: lat2 }))
    }

    /// from the previous to the current fix
    pub fn retrospective (prev: &PositionSample, sample: &PositionSample)->Self {
        FlightSegment::new( sample, Coord { x: prev.lon, y: prev.lat }, Coord { x: sample.lon, y: sample.lat })
    }

    fn new (sample: &PositionSample, start: Coord, end: Coord)->Self {
        FlightSegment {
            aircraft_id: sample.aircraft_id.clone(),
            timestamp: sample.timestamp,
            lat: sample.lat,
            lon: sample.lon,
            speed: sample.speed,
            heading: sample.heading,
            start, end
        }
    }

    pub fn line (&self)->Line { Line::new( self.start, self.end) }
}

/* #endregion FlightSegment */

/* #region Violation ***********************************************************************************************/

/// the kinds of non-compliance we detect. Each description contains the keyword of the advisory it
/// is supposed to trigger
#[derive(Debug,Clone,PartialEq,Serialize)]
pub enum Violation {
    /// segment enters a held feature without clearance
    HoldViolated { command: String, reference: String },
    /// per-instruction HOLD_SHORT rule
    HoldShortEntered { command: String, reference: String, speed: f64 },
    LandingTooFast { reference: String, speed: f64, max_speed: f64 },
    LandingOffRunway { reference: String },
    CrossingTooSlow { reference: String, speed: f64, min_speed: f64 },
    CrossingOffPath { reference: String },
}

impl Violation {
    /// the ledger reference of this violation
    pub fn reference (&self)->&str {
        match self {
            Violation::HoldViolated{reference,..} | Violation::HoldShortEntered{reference,..} |
            Violation::LandingTooFast{reference,..} | Violation::LandingOffRunway{reference} |
            Violation::CrossingTooSlow{reference,..} | Violation::CrossingOffPath{reference} => reference.as_str(),
        }
    }

    /// aircraft independent description
    pub fn describe (&self)->String {
        match self {
            Violation::HoldViolated{command,reference} =>
                format!("violated {command}: hold violated at {reference} (no CLEAR_TO_CROSS)"),
            Violation::HoldShortEntered{command,reference,speed} =>
                format!("violated {command}: entered {reference} at {speed:.1} m/s"),
            Violation::LandingTooFast{reference,speed,max_speed} =>
                format!("approaching runway {reference} too fast for landing clearance ({speed:.1} > {max_speed:.1} m/s)"),
            Violation::LandingOffRunway{reference} =>
                format!("not on cleared landing runway {reference}"),
            Violation::CrossingTooSlow{reference,speed,min_speed} =>
                format!("crossing runway {reference} below minimum crossing speed ({speed:.1} < {min_speed:.1} m/s)"),
            Violation::CrossingOffPath{reference} =>
                format!("not on cleared crossing path {reference}"),
        }
    }

    pub fn message (&self, aircraft_id: &str)->String {
        format!("Non-compliant: {} {}", aircraft_id, self.describe())
    }

    pub fn advisory (&self)->Advisory { advisory::recommend( &self.describe()) }
}

/* #endregion Violation */

/* #region ComplianceResult ***********************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub enum Verdict {
    Compliant,
    Violation(Violation),
    /// the instruction refers to a feature we don't know
    UnresolvedReference(String),
    /// the instruction is not one we can check
    UnknownCommand(String),
}

/// outcome of evaluating one segment. `compliant` is false only for violations
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct ComplianceResult {
    pub aircraft_id: String,
    pub compliant: bool,
    pub verdict: Verdict,
    pub message: String,
    pub reference: Option<String>,
    pub timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub heading: Angle360,
}

impl ComplianceResult {
    fn new (segment: &FlightSegment, verdict: Verdict, reference: Option<&str>)->Self {
        let message = match &verdict {
            Verdict::Compliant => "In compliance".to_string(),
            Verdict::Violation(v) => v.message( &segment.aircraft_id),
            Verdict::UnresolvedReference(r) => format!("unresolved reference {} for {}", r, segment.aircraft_id),
            Verdict::UnknownCommand(c) => format!("unknown command {} for {}", c, segment.aircraft_id),
        };
        let compliant = !matches!( verdict, Verdict::Violation(_));
        let reference = match &verdict {
            Verdict::Violation(v) => Some( v.reference().to_string()),
            _ => reference.map( |r| r.to_string())
        };

        ComplianceResult {
            aircraft_id: segment.aircraft_id.clone(),
            compliant, verdict, message, reference,
            timestamp: segment.timestamp,
            lat: segment.lat,
            lon: segment.lon,
            speed: segment.speed,
            heading: segment.heading
        }
    }

    pub fn violation (&self)->Option<&Violation> {
        if let Verdict::Violation(v) = &self.verdict { Some(v) } else { None }
    }

    pub fn is_unresolved (&self)->bool { matches!( self.verdict, Verdict::UnresolvedReference(_)) }
}

impl fmt::Display for ComplianceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} @{}: {}", self.aircraft_id, self.timestamp, self.message)
    }
}

/* #endregion ComplianceResult */

/* #region GroundComplianceEvaluator ***********************************************************************************************/

pub struct GroundComplianceEvaluator {
    features: FeatureSet,
    frame: LocalFrame,
    areas: Vec<MultiPolygon>, // buffered features in local frame, same order as features

    landing_max_speed: f64,
    crossing_min_speed: f64,
    hold_max_speed: f64,
    legacy_hold_check: bool,
}

impl GroundComplianceEvaluator {
    pub fn new (features: FeatureSet, config: &IncursionConfig)->Self {
        let frame = LocalFrame::from_coord( features.center());
        let default_margin = config.segment_mode.buffer_margin_m();

        let areas: Vec<MultiPolygon> = features.features().iter().map( |f| {
            frame.project_geometry( &f.geometry).buffer( f.effective_margin( default_margin))
        }).collect();
        debug!("buffered {} features around {}", areas.len(), frame);

        GroundComplianceEvaluator {
            features, frame, areas,
            landing_max_speed: config.landing_max_speed,
            crossing_min_speed: config.crossing_min_speed,
            hold_max_speed: config.hold_max_speed,
            legacy_hold_check: config.legacy_hold_check,
        }
    }

    pub fn features (&self)->&FeatureSet { &self.features }

    /// None if there is no feature for `reference`
    pub fn intersects (&self, reference: &str, segment: &FlightSegment)->Option<bool> {
        let idx = self.features.find_index( reference)?;
        let line = self.frame.project_line( &segment.line());
        Some( self.areas[idx].intersects( &line))
    }

    pub fn evaluate (&self, timeline: &InstructionTimeline, segment: &FlightSegment)->ComplianceResult {
        let id = segment.aircraft_id.as_str();
        let t = segment.timestamp;

        if !self.legacy_hold_check {
            if let Some(hold) = timeline.hold_in_effect( id, t) {
                return self.check_hold( hold, segment)
            }
        }

        let Some(instr) = timeline.resolve( id, t) else {
            return ComplianceResult::new( segment, Verdict::Compliant, None)
        };

        let verdict = match &instr.command {
            Command::ClearedToLand{reference} => self.check_landing( reference, segment),
            Command::ClearToCross{reference} => self.check_crossing( reference, segment),
            Command::HoldShort{..} | Command::HoldPosition{..} => {
                if self.legacy_hold_check {
                    self.check_legacy_hold( &instr.command, segment)
                } else {
                    Verdict::Compliant // hold was lifted
                }
            }
            Command::Other{name,..} => Verdict::UnknownCommand( name.clone())
        };

        self.result( segment, verdict, instr.reference())
    }

    fn result (&self, segment: &FlightSegment, verdict: Verdict, reference: Option<&str>)->ComplianceResult {
        match &verdict {
            Verdict::Violation(v) => info!("{}: {}", segment.aircraft_id, v.describe()),
            Verdict::UnresolvedReference(r) => warn!("unresolved reference {} for {} at {}", r, segment.aircraft_id, segment.timestamp),
            _ => {}
        }
        ComplianceResult::new( segment, verdict, reference)
    }

    /// a hold without reference has no feature to test against
    fn check_hold (&self, hold: &Instruction, segment: &FlightSegment)->ComplianceResult {
        let verdict = match hold.reference() {
            Some(reference) => match self.intersects( reference, segment) {
                Some(true) => Verdict::Violation( Violation::HoldViolated {
                    command: hold.command.name().to_string(),
                    reference: reference.to_string()
                }),
                Some(false) => Verdict::Compliant,
                None => Verdict::UnresolvedReference( reference.to_string())
            }
            None => Verdict::Compliant
        };
        self.result( segment, verdict, hold.reference())
    }

    fn check_landing (&self, reference: &str, segment: &FlightSegment)->Verdict {
        match self.intersects( reference, segment) {
            None => Verdict::UnresolvedReference( reference.to_string()),
            Some(false) => Verdict::Violation( Violation::LandingOffRunway { reference: reference.to_string() }),
            Some(true) if segment.speed > self.landing_max_speed => {
                Verdict::Violation( Violation::LandingTooFast { reference: reference.to_string(), speed: segment.speed, max_speed: self.landing_max_speed })
            }
            Some(true) => Verdict::Compliant
        }
    }

    fn check_crossing (&self, reference: &str, segment: &FlightSegment)->Verdict {
        match self.intersects( reference, segment) {
            None => Verdict::UnresolvedReference( reference.to_string()),
            Some(false) => Verdict::Violation( Violation::CrossingOffPath { reference: reference.to_string() }),
            Some(true) if segment.speed < self.crossing_min_speed => {
                Verdict::Violation( Violation::CrossingTooSlow { reference: reference.to_string(), speed: segment.speed, min_speed: self.crossing_min_speed })
            }
            Some(true) => Verdict::Compliant
        }
    }

    /// entering the held feature is only allowed at (almost) zero speed
    fn check_legacy_hold (&self, command: &Command, segment: &FlightSegment)->Verdict {
        let Some(reference) = command.reference() else {
            return Verdict::Compliant
        };
        match self.intersects( reference, segment) {
            None => Verdict::UnresolvedReference( reference.to_string()),
            Some(true) if segment.speed > self.hold_max_speed => {
                Verdict::Violation( Violation::HoldShortEntered { command: command.name().to_string(), reference: reference.to_string(), speed: segment.speed })
            }
            Some(_) => Verdict::Compliant
        }
    }
}

/* #endregion GroundComplianceEvaluator */
