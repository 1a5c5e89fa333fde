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

use std::collections::HashMap;
use tracing::debug;

use crate::instruction::{Command, Instruction};

/// static lookup from spoken flight names to track ids. A name maps to the id of the first entry
/// whose key is contained in it, unmapped names pass through unchanged
#[derive(Debug,Clone)]
pub struct FlightIdMap {
    entries: Vec<(String,String)>,
}

impl FlightIdMap {
    pub fn new (entries: Vec<(String,String)>)->Self { FlightIdMap { entries } }

    pub fn map<'a> (&'a self, flight_name: &'a str)->&'a str {
        for (key,id) in &self.entries {
            if flight_name.contains( key.as_str()) {
                return id.as_str()
            }
        }
        flight_name
    }
}

impl Default for FlightIdMap {
    fn default()->Self {
        FlightIdMap::new( vec![
            ("Southwest 2504".to_string(), "SWA2504".to_string()),
            ("FlexJet 560".to_string(), "LXJ560".to_string()),
        ])
    }
}

/// per aircraft (track id), time ordered instruction sequences. Instructions with equal times keep
/// their insertion order
#[derive(Debug,Clone,Default)]
pub struct InstructionTimeline {
    by_aircraft: HashMap<String,Vec<Instruction>>,
}

impl InstructionTimeline {
    pub fn new (instructions: impl IntoIterator<Item=Instruction>, flight_ids: &FlightIdMap)->Self {
        let mut by_aircraft: HashMap<String,Vec<Instruction>> = HashMap::new();
        for instr in instructions {
            let id = flight_ids.map( &instr.aircraft_ref).to_string();
            by_aircraft.entry(id).or_default().push(instr);
        }
        for list in by_aircraft.values_mut() {
            list.sort_by( |a,b| a.time.total_cmp( &b.time)); // stable
        }
        InstructionTimeline { by_aircraft }
    }

    pub fn instructions (&self, aircraft_id: &str)->&[Instruction] {
        self.by_aircraft.get( aircraft_id).map( |v| v.as_slice()).unwrap_or(&[])
    }

    pub fn aircraft_ids (&self)->impl Iterator<Item=&str> { self.by_aircraft.keys().map( |k| k.as_str()) }

    pub fn len (&self)->usize { self.by_aircraft.values().map( |v| v.len()).sum() }
    pub fn is_empty (&self)->bool { self.by_aircraft.is_empty() }

    /// the most recent instruction for `aircraft_id` with time <= t
    pub fn resolve (&self, aircraft_id: &str, t: f64)->Option<&Instruction> {
        let list = self.instructions( aircraft_id);
        let n = list.partition_point( |i| i.time <= t);
        let instr = if n > 0 { Some(&list[n-1]) } else { None };
        debug!("resolved {} at {} -> {:?}", aircraft_id, t, instr.map( |i| i.command.to_string()));
        instr
    }

    /// the resolved instruction if it is a hold that was not lifted by a CLEAR_TO_CROSS for the same
    /// reference within (hold.time, t]
    pub fn hold_in_effect (&self, aircraft_id: &str, t: f64)->Option<&Instruction> {
        let hold = self.resolve( aircraft_id, t).filter( |i| i.command.is_hold())?;
        let hold_ref = hold.reference();

        let cleared = self.instructions( aircraft_id).iter().any( |i| {
            matches!( i.command, Command::ClearToCross{..})
                && i.time > hold.time && i.time <= t
                && i.reference() == hold_ref
        });

        if cleared {
            None
        } else {
            debug!("{} in effect for {} at {}", hold.command, aircraft_id, t);
            Some(hold)
        }
    }
}
