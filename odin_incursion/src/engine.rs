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

use std::collections::HashSet;
use serde::Serialize;
use tracing::{debug,info,warn};

use odin_adsb::{Track, TrackStore};

use crate::airborne::{AirborneAlert, AirborneConflictEvaluator};
use crate::config::{IncursionConfig, SegmentMode};
use crate::errors::Result;
use crate::features::FeatureSet;
use crate::ground::{ComplianceResult, FlightSegment, GroundComplianceEvaluator, Verdict};
use crate::instruction::Instruction;
use crate::ledger::{ConflictEvent, IncursionKey, IncursionLedger};
use crate::timeline::{FlightIdMap, InstructionTimeline};

/// counters of a ground evaluation pass
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Serialize)]
pub struct GroundStats {
    pub n_segments: usize,
    pub n_skipped: usize,
    pub n_violations: usize,
    pub n_unresolved: usize,
    pub n_unknown: usize,
    pub n_recorded: usize,
}

/// everything a detection run produced
#[derive(Debug,Clone,Serialize)]
pub struct RunReport {
    pub events: Vec<ConflictEvent>,
    pub alerts: Vec<AirborneAlert>,
    pub stats: GroundStats,
}

/// batch evaluation of fully loaded tracks against instructions and static airport features
pub struct IncursionEngine {
    config: IncursionConfig,
    timeline: InstructionTimeline,
    ground: GroundComplianceEvaluator,
    airborne: AirborneConflictEvaluator,
}

impl IncursionEngine {
    pub fn new (config: IncursionConfig, features: FeatureSet, instructions: Vec<Instruction>)->Result<Self> {
        config.check()?;

        let flight_ids = FlightIdMap::new( config.flight_ids.clone());
        let timeline = InstructionTimeline::new( instructions, &flight_ids);
        let ground = GroundComplianceEvaluator::new( features, &config);
        let airborne = AirborneConflictEvaluator::new( &config);

        Ok( IncursionEngine { config, timeline, ground, airborne } )
    }

    pub fn config (&self)->&IncursionConfig { &self.config }
    pub fn timeline (&self)->&InstructionTimeline { &self.timeline }
    pub fn ground_evaluator (&self)->&GroundComplianceEvaluator { &self.ground }
    pub fn airborne_evaluator (&self)->&AirborneConflictEvaluator { &self.airborne }

    /// the segments of a track according to the configured segment mode
    pub fn segments (&self, track: &Track)->(Vec<FlightSegment>,usize) {
        let samples = track.samples();
        let mut segments = Vec::with_capacity( samples.len());
        let mut n_skipped = 0;

        match self.config.segment_mode {
            SegmentMode::Predictive { lookahead_secs, .. } => {
                for s in samples {
                    match FlightSegment::predictive( s, lookahead_secs) {
                        Ok(seg) => segments.push(seg),
                        Err(e) => { warn!("skipping sample {}: {}", s, e); n_skipped += 1 }
                    }
                }
            }
            SegmentMode::Retrospective { .. } => {
                let mut prev = None;
                for s in samples {
                    if !s.has_position() { warn!("skipping sample {} without position", s); n_skipped += 1; continue }
                    if let Some(p) = prev {
                        segments.push( FlightSegment::retrospective( p, s));
                    }
                    prev = Some(s);
                }
            }
        }

        (segments, n_skipped)
    }

    /// evaluate all tracks and record first violations in `ledger`. A ledger that already holds a key
    /// does not get a new event for it
    pub fn detect_incursions (&self, tracks: &TrackStore, ledger: &IncursionLedger)->GroundStats {
        let mut stats = GroundStats::default();
        let lookahead_secs = self.config.segment_mode.lookahead_secs();

        for track in tracks.tracks() {
            let (segments, n_skipped) = self.segments( track);
            stats.n_skipped += n_skipped;

            for segment in &segments {
                stats.n_segments += 1;
                let result = self.ground.evaluate( &self.timeline, segment);

                match &result.verdict {
                    Verdict::Violation(v) => {
                        stats.n_violations += 1;
                        let advisory = v.advisory();
                        let event = ConflictEvent {
                            key: IncursionKey::new( &result.aircraft_id, v.reference()),
                            timestamp: result.timestamp,
                            lat: result.lat,
                            lon: result.lon,
                            speed: result.speed,
                            heading: result.heading,
                            message: result.message.clone(),
                            advisory: advisory.command.to_string(),
                            predicted_outcome: advisory.predicted_outcome.to_string(),
                            lookahead_secs
                        };
                        if ledger.record_if_new( event) { stats.n_recorded += 1; }
                    }
                    Verdict::UnresolvedReference(_) => stats.n_unresolved += 1,
                    Verdict::UnknownCommand(_) => stats.n_unknown += 1,
                    Verdict::Compliant => {}
                }
            }
        }

        info!("ground: {} segments, {} violations, {} new events, {} unresolved, {} skipped",
              stats.n_segments, stats.n_violations, stats.n_recorded, stats.n_unresolved, stats.n_skipped);
        stats
    }

    /// the instants at which airborne states are evaluated: every `airborne_step_secs` from the first sample,
    /// skipping gaps in which no sample is within `max_state_age_secs` (continuing at the next sample)
    pub fn airborne_instants (&self, tracks: &TrackStore)->Vec<f64> {
        let ts = tracks.timestamps();
        let (Some(&t0), Some(&t1)) = (ts.first(), ts.last()) else { return Vec::new() };
        let step = self.config.airborne_step_secs;
        let max_age = self.config.max_state_age_secs;

        let mut instants = Vec::new();
        let mut t = t0;
        while t <= t1 {
            instants.push(t);

            let next = t + step;
            let i = ts.partition_point( |x| *x < next - max_age); // first sample that is not too old at `next`
            if i == ts.len() { break }
            t = if ts[i] > next { ts[i] } else { next };
        }
        instants
    }

    /// evaluate aircraft state snapshots at the airborne instants of the tracks.
    /// Only the first alert of each aircraft pair is reported
    pub fn detect_airborne_conflicts (&self, tracks: &TrackStore)->Vec<AirborneAlert> {
        let mut alerts = Vec::new();
        let mut seen: HashSet<(String,String)> = HashSet::new();
        let max_age = self.config.max_state_age_secs;

        for t in self.airborne_instants( tracks) {
            let states = tracks.states_at( t, max_age);
            for alert in self.airborne.evaluate( &states, t) {
                if seen.insert( (alert.id_a.clone(), alert.id_b.clone())) {
                    info!("{} at {}", alert, t);
                    alerts.push( alert);
                }
            }
        }

        alerts
    }

    pub fn run (&self, tracks: &TrackStore, ledger: &IncursionLedger)->RunReport {
        let stats = self.detect_incursions( tracks, ledger);
        let alerts = self.detect_airborne_conflicts( tracks);
        RunReport { events: ledger.events(), alerts, stats }
    }
}
