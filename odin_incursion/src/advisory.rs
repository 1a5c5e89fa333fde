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

use serde::Serialize;

/// what the pilot should do now and what is expected to happen if not
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub struct Advisory {
    pub command: &'static str,
    pub predicted_outcome: &'static str,
}

struct AdvisoryRule {
    keywords: &'static [&'static str],
    advisory: Advisory,
}

// first match wins
const ADVISORY_RULES: [AdvisoryRule; 3] = [
    AdvisoryRule {
        keywords: &["HOLD"],
        advisory: Advisory { command: "STOP NOW", predicted_outcome: "Likely collision or incursion on restricted path." }
    },
    AdvisoryRule {
        keywords: &["crossing runway", "incursion"],
        advisory: Advisory { command: "EXIT RUNWAY", predicted_outcome: "Severe risk of collision with landing aircraft." }
    },
    AdvisoryRule {
        keywords: &["too fast"],
        advisory: Advisory { command: "REDUCE SPEED", predicted_outcome: "Runway overrun or ground collision." }
    },
];

pub const DEFAULT_ADVISORY: Advisory = Advisory { command: "MAINTAIN POSITION", predicted_outcome: "Potential unknown hazard." };

/// map a violation message to an advisory (case sensitive keyword match)
pub fn recommend (violation_msg: &str)->Advisory {
    ADVISORY_RULES.iter()
        .find( |rule| rule.keywords.iter().any( |kw| violation_msg.contains(kw)))
        .map( |rule| rule.advisory)
        .unwrap_or( DEFAULT_ADVISORY)
}
