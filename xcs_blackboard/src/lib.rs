/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
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

//! merges aircraft state from devices, simulator and replay into one authoritative snapshot and keeps
//! the derived flight state current. `actor::BlackboardActor` runs a `DeviceBlackboard` on its own thread

pub mod errors;
pub mod validity;
pub mod pressure;
pub mod flarm;
pub mod flarm_calculations;
pub mod nmea_info;
pub mod config;
pub mod derived;
pub mod basic_computer;
pub mod simulator;
pub mod triggers;
pub mod blackboard;
pub mod actor;

pub use errors::{XcsBlackboardError,Result};
pub use validity::Validity;
pub use nmea_info::NmeaInfo;
pub use derived::DerivedInfo;
pub use config::{BlackboardConfig,ComputerSettings,load_config};
pub use blackboard::{DeviceBlackboard,DataSource};
pub use actor::{BlackboardActor,BlackboardHandle,BlackboardMsg,BlackboardSnapshot};
