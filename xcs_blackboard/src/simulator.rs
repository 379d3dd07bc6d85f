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

use uom::si::f64::Length;
use xcs_common::{geo::GeoPoint, units::{meters, to_meters_per_second}};

use crate::nmea_info::{NmeaInfo,FixQuality};

/// simulation step [sec]
pub const SIMULATION_STEP: f64 = 1.0;

/// drives a simulated aircraft in a snapshot. Speed, altitude and track are set from outside
pub struct Simulator;

impl Simulator {
    pub fn init (info: &mut NmeaInfo, location: GeoPoint, altitude: Length) {
        info.reset();
        info.gps.simulator = true;
        info.location = location;
        info.gps_altitude = altitude;
        info.time = 0.0;
    }

    /// mark all simulated values as current
    pub fn touch (info: &mut NmeaInfo, now: f64) {
        info.update_clock( now);
        info.alive.update( now);
        info.gps.simulator = true;
        info.gps.fix_quality = FixQuality::Simulation;
        info.gps.fix_quality_available.update( now);
        info.gps.satellites_used = Some(6);
        info.gps.satellites_used_available.update( now);

        info.location_available.update( now);
        info.track_available.update( now);
        info.ground_speed_available.update( now);
        info.gps_altitude_available.update( now);
        info.time_available.update( now);
    }

    /// advance one step along the current track
    pub fn process (info: &mut NmeaInfo, now: f64) {
        Self::touch( info, now);
        info.time += SIMULATION_STEP;

        let d = to_meters_per_second( info.ground_speed) * SIMULATION_STEP;
        if d > 0.0 {
            info.location = info.location.destination( info.track, meters(d));
        }
    }
}
