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

use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinIncursionError>;

#[derive(Error,Debug)]
pub enum OdinIncursionError {

    #[error("invalid input {0}")]
    InvalidInput(String),

    #[error("invalid instruction {0}")]
    InvalidInstruction(String),

    #[error("feature error {0}")]
    FeatureError(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("track data error {0}")]
    AdsbError( #[from] odin_adsb::errors::OdinAdsbError),
}

macro_rules! invalid_input {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinIncursionError::InvalidInput( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_input;

macro_rules! invalid_instruction {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinIncursionError::InvalidInstruction( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_instruction;

macro_rules! feature_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinIncursionError::FeatureError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use feature_error;
