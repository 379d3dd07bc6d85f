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

use std::{collections::HashMap, fs, path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use tracing::info;
use uom::si::f64::{Length,Velocity};
use xcs_common::{
    geo::GeoPoint, clock::{millis,secs},
    units::{meters, meters_per_second, kilometers_per_hour, to_meters_per_second,
        ser_length_as_meters, de_length_from_meters, ser_velocity_as_meters_per_second, de_velocity_from_meters_per_second}
};

use crate::{errors::{Result,config_error}, flarm::FlarmId, pressure::AtmosphericPressure};

/// sink polar of the glider as vertical speed `w(v) = a*v² + b*v + c` [m/s] for airspeed `v` [m/s].
/// Values in the normal speed range are negative
#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
pub struct PolarCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PolarCoefficients {
    pub fn vertical_speed (&self, v: Velocity)->Velocity {
        let v = to_meters_per_second(v);
        meters_per_second( self.a * v * v + self.b * v + self.c)
    }
}

impl Default for PolarCoefficients {
    // roughly a 15m class glider at minimum wing loading
    fn default()->Self { PolarCoefficients { a: -0.0016, b: 0.064, c: -1.24 } }
}

#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
pub struct ComputerSettings {
    /// use baro altitude for navigation if available
    pub nav_baro_altitude_enabled: bool,

    /// QNH set by the pilot, used to derive baro altitude from pressure
    pub qnh: Option<AtmosphericPressure>,

    #[serde(serialize_with = "ser_velocity_as_meters_per_second", deserialize_with = "de_velocity_from_meters_per_second")]
    pub mac_cready: Velocity,

    pub polar: PolarCoefficients,

    /// turn rate above which we consider the aircraft to be circling [deg/s]
    pub circling_turn_rate: f64,

    #[serde(serialize_with = "ser_velocity_as_meters_per_second", deserialize_with = "de_velocity_from_meters_per_second")]
    pub takeoff_speed: Velocity,
}

impl Default for ComputerSettings {
    fn default()->Self {
        ComputerSettings {
            nav_baro_altitude_enabled: true,
            qnh: None,
            mac_cready: meters_per_second(0.0),
            polar: PolarCoefficients::default(),
            circling_turn_rate: 4.0,
            takeoff_speed: kilometers_per_hour(40.0),
        }
    }
}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct BlackboardConfig {
    /// number of physical device slots
    pub num_devices: usize,

    pub tick_interval: Duration, // interval in which the actor runs tick() if there are no messages
    pub expire_interval: Duration, // interval for wall clock expiration of device data
    pub channel_capacity: usize,

    /// max number of FLARM objects we keep climb averages for
    pub flarm_max_tracked: usize,
    pub flarm_max_age: Duration, // drop climb averages of objects not seen for this long

    pub flarm_names: HashMap<FlarmId,String>,

    pub startup_location: Option<GeoPoint>,
    #[serde(serialize_with = "ser_length_as_meters", deserialize_with = "de_length_from_meters")]
    pub startup_altitude: Length,

    pub computer: ComputerSettings,
}

impl Default for BlackboardConfig {
    fn default()->Self {
        BlackboardConfig {
            num_devices: 4,
            tick_interval: millis(500),
            expire_interval: secs(1),
            channel_capacity: 64,
            flarm_max_tracked: 200,
            flarm_max_age: secs(60),
            flarm_names: HashMap::new(),
            startup_location: None,
            startup_altitude: meters(0.0),
            computer: ComputerSettings::default(),
        }
    }
}

impl BlackboardConfig {
    pub fn check (&self)->Result<()> {
        if self.num_devices == 0 { return Err( config_error!("num_devices has to be > 0")) }
        if self.channel_capacity == 0 { return Err( config_error!("channel_capacity has to be > 0")) }
        if self.tick_interval.is_zero() { return Err( config_error!("tick_interval has to be > 0")) }
        if let Some(qnh) = &self.computer.qnh {
            if !qnh.is_plausible() { return Err( config_error!("implausible QNH {}", qnh)) }
        }
        Ok(())
    }
}

pub fn parse_config (s: &str)->Result<BlackboardConfig> {
    let config: BlackboardConfig = ron::from_str(s)?;
    config.check()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>> (path: P)->Result<BlackboardConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    let config = parse_config( &s)?;
    info!("loaded blackboard config from {:?} ({} devices)", path, config.num_devices);
    Ok(config)
}
