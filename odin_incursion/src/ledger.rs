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

use std::{fmt, sync::atomic::{AtomicU64,Ordering}};
use serde::Serialize;
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::info;

use odin_common::angle::Angle360;

#[derive(Debug,Clone,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize)]
pub struct IncursionKey {
    pub aircraft_id: String,
    pub reference: String,
}

impl IncursionKey {
    pub fn new (aircraft_id: impl ToString, reference: impl ToString)->Self {
        IncursionKey { aircraft_id: aircraft_id.to_string(), reference: reference.to_string() }
    }
}

impl fmt::Display for IncursionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "({},{})", self.aircraft_id, self.reference)
    }
}

/// the first detected violation of an (aircraft,reference) pair
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct ConflictEvent {
    pub key: IncursionKey,
    pub timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub heading: Angle360,
    pub message: String,
    pub advisory: String,
    pub predicted_outcome: String,
    pub lookahead_secs: f64,
}

/// append-only store of conflict events with at most one event per key.
/// `record_if_new` is the only mutator and can be called concurrently, the entry API of the
/// underlying map serializes writers of the same key
#[derive(Debug,Default)]
pub struct IncursionLedger {
    events: DashMap<IncursionKey,(u64,ConflictEvent)>,
    seq: AtomicU64,
}

impl IncursionLedger {
    pub fn new ()->Self {
        IncursionLedger { events: DashMap::new(), seq: AtomicU64::new(0) }
    }

    /// store the event if there is none yet for its key. Returns true if it was stored
    pub fn record_if_new (&self, event: ConflictEvent)->bool {
        match self.events.entry( event.key.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(e) => {
                let seq = self.seq.fetch_add( 1, Ordering::Relaxed);
                info!("recorded incursion {}: {}", event.key, event.message);
                e.insert( (seq, event));
                true
            }
        }
    }

    pub fn contains (&self, key: &IncursionKey)->bool { self.events.contains_key( key) }

    pub fn get (&self, key: &IncursionKey)->Option<ConflictEvent> {
        self.events.get( key).map( |r| r.value().1.clone())
    }

    pub fn len (&self)->usize { self.events.len() }
    pub fn is_empty (&self)->bool { self.events.is_empty() }

    /// all events in recording order
    pub fn events (&self)->Vec<ConflictEvent> {
        let mut list: Vec<(u64,ConflictEvent)> = self.events.iter().map( |r| r.value().clone()).collect();
        list.sort_by_key( |(seq,_)| *seq);
        list.into_iter().map( |(_,e)| e).collect()
    }
}
