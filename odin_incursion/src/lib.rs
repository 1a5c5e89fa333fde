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

//! predictive detection of ground incursions and airborne conflicts from recorded ADS-B tracks
//! and ATC instructions.
//!
//! Ground: each track sample is turned into a flight path segment which is checked against the
//! instruction in effect for that aircraft and the (buffered) airport feature it refers to. The first
//! violation per (aircraft,reference) becomes a [`ledger::ConflictEvent`] with a pilot advisory.
//!
//! Airborne: aircraft state snapshots are checked pairwise for a closed form time-to-conflict.

pub mod errors;
pub mod config;
pub mod instruction;
pub mod timeline;
pub mod kinematics;
pub mod features;
pub mod advisory;
pub mod ground;
pub mod airborne;
pub mod ledger;
pub mod engine;

pub use config::{IncursionConfig, SegmentMode, load_config};
pub use instruction::{Command, Instruction, InstructionRecord};
pub use timeline::{FlightIdMap, InstructionTimeline};
pub use features::{FeatureKind, FeatureSet, StaticFeature};
pub use ground::{ComplianceResult, FlightSegment, GroundComplianceEvaluator, Verdict, Violation};
pub use airborne::{AirborneAlert, AirborneConflictEvaluator};
pub use ledger::{ConflictEvent, IncursionKey, IncursionLedger};
pub use engine::{GroundStats, IncursionEngine, RunReport};
