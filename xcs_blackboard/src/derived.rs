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

use serde::{Serialize,Deserialize};
use tracing::{debug,info};
use uom::si::f64::{Length,Velocity};
use xcs_common::{angle::Angle, units::{meters, meters_per_second, to_meters, to_meters_per_second}};

use crate::{config::ComputerSettings, nmea_info::{NmeaInfo,SpeedVector}};

/// time the aircraft has to stay below takeoff speed before we consider it landed [sec]
pub const LANDING_DELAY: f64 = 30.0;

/// begin of the current climb
#[derive(Clone,Copy,Debug,PartialEq,Serialize,Deserialize)]
pub struct ClimbStart {
    pub time: f64,
    pub altitude: f64, // [m]
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum PhaseChange {
    Takeoff,
    Landing,
    CirclingStart,
    CirclingEnd,
}

/// state that is derived from the history of merged snapshots (as opposed to a single snapshot)
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct DerivedInfo {
    pub flying: bool,
    pub takeoff_time: Option<f64>,
    low_speed_since: Option<f64>,

    pub circling: bool,
    pub climb_start: Option<ClimbStart>,

    pub turn_rate: f64,         // of track [deg/s]
    pub heading: Angle,
    pub turn_rate_heading: f64, // [deg/s]

    pub wind: Option<SpeedVector>,

    /// polar vertical speed at the current airspeed, negative if sinking
    pub sink_rate: Velocity,
}

impl DerivedInfo {
    pub fn new ()->Self {
        DerivedInfo {
            flying: false,
            takeoff_time: None,
            low_speed_since: None,
            circling: false,
            climb_start: None,
            turn_rate: 0.0,
            heading: Angle::zero(),
            turn_rate_heading: 0.0,
            wind: None,
            sink_rate: meters_per_second(0.0),
        }
    }

    pub fn reset (&mut self) { *self = DerivedInfo::new() }

    /// seconds since takeoff
    pub fn flight_time (&self, time: f64)->Option<f64> {
        self.takeoff_time.map( |t| (time - t).max(0.0))
    }

    pub fn wind_available (&self)->bool { self.wind.is_some_and( |w| w.is_non_zero()) }

    /// update from the current and the previous merged snapshot. Returns the flight phase changes
    pub fn update (&mut self, basic: &NmeaInfo, last: &NmeaInfo, settings: &ComputerSettings)->Vec<PhaseChange> {
        let mut changes = Vec::new();
        let dt = if basic.has_time_advanced_since( last) { basic.time - last.time } else { 0.0 };

        self.update_flying( basic, settings, &mut changes);

        self.wind = if basic.external_wind_available.is_valid() { Some(basic.external_wind) } else { None };

        let last_heading = self.heading;
        self.heading = self.compute_heading( basic);

        if dt > 0.0 {
            if basic.track_available.is_valid() && last.track_available.is_valid() {
                self.turn_rate = (basic.track - last.track).as_delta().degrees() / dt;
            }
            self.turn_rate_heading = (self.heading - last_heading).as_delta().degrees() / dt;
        }

        self.update_circling( basic, settings, &mut changes);

        self.sink_rate = if self.flying && basic.airspeed_available.is_valid() {
            settings.polar.vertical_speed( basic.indicated_airspeed)
        } else {
            meters_per_second(0.0)
        };

        changes
    }

    fn update_flying (&mut self, basic: &NmeaInfo, settings: &ComputerSettings, changes: &mut Vec<PhaseChange>) {
        let speed = if basic.airspeed_available.is_valid() && basic.airspeed_real {
            basic.indicated_airspeed
        } else if basic.ground_speed_available.is_valid() {
            basic.ground_speed
        } else {
            return
        };

        if speed > settings.takeoff_speed {
            self.low_speed_since = None;
            if !self.flying {
                self.flying = true;
                self.takeoff_time = Some(basic.time);
                info!("takeoff at {:.0}s", basic.time);
                changes.push( PhaseChange::Takeoff);
            }

        } else if self.flying {
            let since = *self.low_speed_since.get_or_insert( basic.time);
            if basic.time - since >= LANDING_DELAY {
                self.flying = false;
                self.low_speed_since = None;
                info!("landing at {:.0}s", basic.time);
                changes.push( PhaseChange::Landing);
            }
        }
    }

    /// heading is the direction of the air vector (ground vector minus wind). Without wind it is the track
    fn compute_heading (&self, basic: &NmeaInfo)->Angle {
        if !basic.track_available.is_valid() { return self.heading }

        match self.wind {
            Some(w) if w.is_non_zero() && basic.ground_speed_available.is_valid() => {
                let gs = to_meters_per_second( basic.ground_speed);
                let ws = to_meters_per_second( w.norm);
                let x = gs * basic.track.sin() + ws * w.bearing.sin();
                let y = gs * basic.track.cos() + ws * w.bearing.cos();
                if x == 0.0 && y == 0.0 { basic.track } else { Angle::from_radians( x.atan2(y)).as_bearing() }
            }
            _ => basic.track
        }
    }

    fn update_circling (&mut self, basic: &NmeaInfo, settings: &ComputerSettings, changes: &mut Vec<PhaseChange>) {
        let circling = self.flying && self.turn_rate.abs() > settings.circling_turn_rate;

        if circling && !self.circling {
            let altitude = basic.nav_altitude.map( to_meters).unwrap_or(0.0);
            self.climb_start = Some( ClimbStart { time: basic.time, altitude });
            debug!("circling start at {:.0}s, {:.0}m", basic.time, altitude);
            changes.push( PhaseChange::CirclingStart);

        } else if !circling && self.circling {
            debug!("circling end at {:.0}s", basic.time);
            changes.push( PhaseChange::CirclingEnd);
        }

        self.circling = circling;
    }
}

impl Default for DerivedInfo {
    fn default()->Self { DerivedInfo::new() }
}
