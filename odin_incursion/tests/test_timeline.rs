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

use odin_incursion::{Command, Instruction, InstructionRecord, FlightIdMap, InstructionTimeline};
use odin_incursion::errors::OdinIncursionError;
use odin_incursion::instruction::read_instructions_json;

const RECORDS: &'static str = r#"[
    {"plane": "Southwest 2504", "instr": "CLEARED_TO_LAND", "reference": "31C", "time": 1740494856.48},
    {"plane": "FlexJet 560", "instr": "TURN_LEFT", "reference": "04L/22R", "time": 1740494867.06},
    {"plane": "FlexJet 560", "instr": "CLEAR_TO_CROSS", "reference": "13C/31C", "time": 1740494867.06},
    {"plane": "FlexJet 560", "instr": "HOLD_SHORT", "reference": "13C/31C", "time": 1740494867.06},
    {"plane": "FlexJet 560", "instr": "HOLD_POSITION", "reference": "", "time": 1740494913.54},
    {"plane": "FlexJet 560", "instr": "HOLD_SHORT", "reference": "H", "time": 1740494919.82},
    {"plane": "Southwest 2504", "instr": "TURN_LEFT_HEADING", "reference": "220", "time": 1740494932.7},
    {"plane": "FlexJet 560", "instr": "HOLD_SHORT", "reference": " ", "time": 1740494940.0},
    {"plane": "", "instr": "HOLD_POSITION", "time": 1740494941.3}
]"#;

fn instr (plane: &str, cmd: &str, reference: &str, time: f64)->Instruction {
    Instruction::new( plane, Command::parse( cmd, Some(reference)).unwrap(), time).unwrap()
}

// run with "cargo test test_read_instructions -- --nocapture"

#[test]
fn test_read_instructions() {
    let list = read_instructions_json( RECORDS).unwrap();
    for i in &list { println!("{i}"); }

    assert_eq!( list.len(), 7); // blank HOLD_SHORT reference and missing plane rejected
    assert_eq!( list[1].command, Command::Other { name: "TURN_LEFT".to_string(), reference: Some("04L/22R".to_string()) });
    assert_eq!( list[4].command, Command::HoldPosition { reference: None });
    assert!( list[4].command.is_hold());
    assert_eq!( list[0].reference(), Some("31C"));
}

#[test]
fn test_instruction_validation() {
    let res = Command::parse( "HOLD_SHORT", None);
    println!("HOLD_SHORT without reference -> {res:?}");
    assert!( matches!( res, Err(OdinIncursionError::InvalidInstruction(_))));
    assert!( Command::parse( "cleared_to_land", Some("")).is_err());
    assert_eq!( Command::parse( " clear_to_cross ", Some(" 31C ")).unwrap(), Command::ClearToCross { reference: "31C".to_string() });

    let rec = InstructionRecord { plane: "FlexJet 560".to_string(), instr: "HOLD_SHORT".to_string(), reference: Some("H".to_string()), time: f64::NAN };
    assert!( Instruction::try_from( rec).is_err());
}

#[test]
fn test_flight_ids() {
    let ids = FlightIdMap::default();
    assert_eq!( ids.map( "Southwest 2504"), "SWA2504");
    assert_eq!( ids.map( "Southwest 2504 heavy"), "SWA2504");
    assert_eq!( ids.map( "FlexJet 560"), "LXJ560");
    assert_eq!( ids.map( "N123AB"), "N123AB");
}

// run with "cargo test test_resolve -- --nocapture"

#[test]
fn test_resolve() {
    let list = read_instructions_json( RECORDS).unwrap();
    let timeline = InstructionTimeline::new( list, &FlightIdMap::default());

    assert!( timeline.resolve( "LXJ560", 1740494800.0).is_none());
    assert!( timeline.resolve( "UNKNOWN", 1740494900.0).is_none());

    // three instructions at the same time: the last one in input order wins
    let i = timeline.resolve( "LXJ560", 1740494867.06).unwrap();
    println!("LXJ560 at issue time: {i}");
    assert_eq!( i.command, Command::HoldShort { reference: "13C/31C".to_string() });

    let i = timeline.resolve( "LXJ560", 1740494915.0).unwrap();
    assert_eq!( i.command, Command::HoldPosition { reference: None });

    let i = timeline.resolve( "SWA2504", 1740494900.0).unwrap();
    assert_eq!( i.command.name(), "CLEARED_TO_LAND");
}

#[test]
fn test_unsorted_input() {
    let list = vec![
        instr( "FlexJet 560", "CLEAR_TO_CROSS", "13C/31C", 20.0),
        instr( "FlexJet 560", "HOLD_SHORT", "13C/31C", 10.0),
    ];
    let timeline = InstructionTimeline::new( list, &FlightIdMap::default());
    assert_eq!( timeline.resolve( "LXJ560", 15.0).unwrap().command.name(), "HOLD_SHORT");
    assert_eq!( timeline.resolve( "LXJ560", 25.0).unwrap().command.name(), "CLEAR_TO_CROSS");
}

// run with "cargo test test_hold_in_effect -- --nocapture"

#[test]
fn test_hold_in_effect() {
    let list = vec![
        instr( "FlexJet 560", "HOLD_SHORT", "13C/31C", 100.0),
        instr( "FlexJet 560", "CLEAR_TO_CROSS", "13C/31C", 105.0),
        instr( "FlexJet 560", "HOLD_SHORT", "H", 120.0),
        instr( "FlexJet 560", "HOLD_POSITION", "", 130.0),
    ];
    let timeline = InstructionTimeline::new( list, &FlightIdMap::default());

    assert!( timeline.hold_in_effect( "LXJ560", 99.0).is_none());

    let hold = timeline.hold_in_effect( "LXJ560", 103.0).unwrap();
    println!("hold at 103: {hold}");
    assert_eq!( hold.reference(), Some("13C/31C"));

    assert!( timeline.hold_in_effect( "LXJ560", 105.0).is_none()); // cleared at 105
    assert!( timeline.hold_in_effect( "LXJ560", 110.0).is_none());

    assert_eq!( timeline.hold_in_effect( "LXJ560", 125.0).unwrap().reference(), Some("H"));
    assert_eq!( timeline.hold_in_effect( "LXJ560", 135.0).unwrap().command, Command::HoldPosition { reference: None });
}
