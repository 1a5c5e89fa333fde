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

use std::{fmt, fs, path::Path};
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use crate::errors::{OdinIncursionError,Result,invalid_instruction};

pub const CLEARED_TO_LAND: &str = "CLEARED_TO_LAND";
pub const CLEAR_TO_CROSS: &str = "CLEAR_TO_CROSS";
pub const HOLD_SHORT: &str = "HOLD_SHORT";
pub const HOLD_POSITION: &str = "HOLD_POSITION";

/// the ATC commands we evaluate. Everything else is kept as `Other` so that it still supersedes
/// earlier instructions in the timeline
#[derive(Debug,Clone,PartialEq,Serialize)]
#[serde(tag="command")]
pub enum Command {
    ClearedToLand { reference: String },
    ClearToCross { reference: String },
    HoldShort { reference: String },
    HoldPosition { reference: Option<String> },
    Other { name: String, reference: Option<String> },
}

impl Command {
    /// reference-requiring commands fail without a (non-blank) reference
    pub fn parse (instr: &str, reference: Option<&str>)->Result<Command> {
        let name = instr.trim().to_uppercase();
        let reference = reference.map(|r| r.trim()).filter(|r| !r.is_empty()).map(|r| r.to_string());

        let required = |reference: Option<String>| {
            reference.ok_or_else( || invalid_instruction!("{} without reference", name))
        };

        match name.as_str() {
            CLEARED_TO_LAND => Ok( Command::ClearedToLand { reference: required(reference)? }),
            CLEAR_TO_CROSS => Ok( Command::ClearToCross { reference: required(reference)? }),
            HOLD_SHORT => Ok( Command::HoldShort { reference: required(reference)? }),
            HOLD_POSITION => Ok( Command::HoldPosition { reference }),
            "" => Err( invalid_instruction!("empty command")),
            _ => Ok( Command::Other { name, reference })
        }
    }

    pub fn name (&self)->&str {
        match self {
            Command::ClearedToLand{..} => CLEARED_TO_LAND,
            Command::ClearToCross{..} => CLEAR_TO_CROSS,
            Command::HoldShort{..} => HOLD_SHORT,
            Command::HoldPosition{..} => HOLD_POSITION,
            Command::Other{name,..} => name.as_str(),
        }
    }

    pub fn reference (&self)->Option<&str> {
        match self {
            Command::ClearedToLand{reference} | Command::ClearToCross{reference} | Command::HoldShort{reference} => Some(reference.as_str()),
            Command::HoldPosition{reference} | Command::Other{reference,..} => reference.as_deref(),
        }
    }

    pub fn is_hold (&self)->bool {
        matches!( self, Command::HoldShort{..} | Command::HoldPosition{..})
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reference() {
            Some(r) => write!( f, "{}({})", self.name(), r),
            None => write!( f, "{}", self.name())
        }
    }
}

/// a validated ATC instruction. `aircraft_ref` is the flight name as spoken (e.g. "Southwest 2504")
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Instruction {
    pub aircraft_ref: String,
    pub command: Command,
    pub time: f64,
}

impl Instruction {
    pub fn new (aircraft_ref: impl ToString, command: Command, time: f64)->Result<Self> {
        let aircraft_ref = aircraft_ref.to_string().trim().to_string();
        if aircraft_ref.is_empty() {
            return Err( invalid_instruction!("{} without aircraft", command))
        }
        if !time.is_finite() {
            return Err( invalid_instruction!("{} for {} has invalid time {}", command, aircraft_ref, time))
        }
        Ok( Instruction { aircraft_ref, command, time })
    }

    pub fn reference (&self)->Option<&str> { self.command.reference() }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} -> {} @{}", self.aircraft_ref, self.command, self.time)
    }
}

/// the external instruction record format: `{plane, instr, reference, time}`
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct InstructionRecord {
    pub plane: String,
    pub instr: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub time: f64,
}

impl TryFrom<InstructionRecord> for Instruction {
    type Error = OdinIncursionError;

    fn try_from (rec: InstructionRecord)->Result<Self> {
        let command = Command::parse( &rec.instr, rec.reference.as_deref())?;
        Instruction::new( rec.plane, command, rec.time)
    }
}

/// parse a JSON array of instruction records. Invalid records are logged and skipped
pub fn read_instructions_json (s: &str)->Result<Vec<Instruction>> {
    let records: Vec<InstructionRecord> = serde_json::from_str(s)?;
    let n_records = records.len();

    let instructions: Vec<Instruction> = records.into_iter().filter_map( |rec| {
        let desc = format!("{}/{}@{}", rec.plane, rec.instr, rec.time);
        match Instruction::try_from( rec) {
            Ok(instr) => Some(instr),
            Err(e) => { warn!("skipping instruction record {}: {}", desc, e); None }
        }
    }).collect();

    debug!("{} of {} instruction records accepted", instructions.len(), n_records);
    Ok(instructions)
}

pub fn load_instructions<P: AsRef<Path>> (path: P)->Result<Vec<Instruction>> {
    let s = fs::read_to_string( path.as_ref())?;
    read_instructions_json( &s)
}
