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

use std::{collections::HashMap, fmt, str::FromStr};
use serde::{Serialize,Deserialize,Serializer,Deserializer,de::Error as DeError};
use uom::si::f64::{Length,Velocity};
use xcs_common::{angle::Angle, geo::GeoPoint, units::{meters,meters_per_second}};

use crate::validity::Validity;

/// max number of traffic objects we keep per FLARM state
pub const MAX_TRAFFIC: usize = 50;

/// traffic that has not been reported for this many seconds is dropped
pub const TRAFFIC_MAX_AGE: f64 = 2.0;

/// a FLARM device that has not sent anything for this many seconds is considered gone
pub const FLARM_MAX_AGE: f64 = 10.0;

/* #region FlarmId ********************************************************************************/

/// 24 bit FLARM radio id, shown as 6 hex digits
#[derive(Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Default)]
pub struct FlarmId(u32);

impl FlarmId {
    pub fn new (id: u32)->Self { FlarmId( id & 0xff_ffff) }

    #[inline] pub fn value (&self)->u32 { self.0 }

    pub fn is_defined (&self)->bool { self.0 != 0 }
}

impl FromStr for FlarmId {
    type Err = std::num::ParseIntError;
    fn from_str (s: &str)->Result<Self,Self::Err> {
        u32::from_str_radix( s.trim(), 16).map( FlarmId::new)
    }
}

impl fmt::Display for FlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:06X}", self.0) }
}

impl fmt::Debug for FlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "FlarmId({:06X})", self.0) }
}

impl Serialize for FlarmId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str( &self.to_string())
    }
}

impl<'de> Deserialize<'de> for FlarmId {
    fn deserialize<D>(deserializer: D) -> Result<FlarmId, D::Error> where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        FlarmId::from_str(&s).map_err( |e| D::Error::custom( format!("invalid FLARM id {s}: {e}")))
    }
}

/* #endregion FlarmId */

/* #region FlarmTraffic ***************************************************************************/

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct FlarmTraffic {
    pub id: FlarmId,
    pub name: Option<String>,

    /// last time this object was reported
    pub valid: Validity,
    pub alarm_level: u8,

    pub relative_north: Length,
    pub relative_east: Length,
    pub relative_altitude: Length,

    // the following are derived from our own position
    pub distance: Length,
    pub location: GeoPoint,
    pub location_available: bool,
    pub altitude: Length,
    pub altitude_available: bool,

    // reported by the device or estimated from the previous report
    pub track: Angle,
    pub track_received: bool,
    pub turn_rate: f64, // [deg/s]
    pub turn_rate_received: bool,
    pub speed: Velocity,
    pub speed_received: bool,
    pub climb_rate: Velocity,
    pub climb_rate_received: bool,

    pub climb_rate_avg30s: Velocity,
    pub climb_rate_avg30s_available: bool,
}

impl FlarmTraffic {
    pub fn new (id: FlarmId)->Self {
        FlarmTraffic {
            id,
            name: None,
            valid: Validity::invalid(),
            alarm_level: 0,
            relative_north: meters(0.0),
            relative_east: meters(0.0),
            relative_altitude: meters(0.0),
            distance: meters(0.0),
            location: GeoPoint::default(),
            location_available: false,
            altitude: meters(0.0),
            altitude_available: false,
            track: Angle::zero(),
            track_received: false,
            turn_rate: 0.0,
            turn_rate_received: false,
            speed: meters_per_second(0.0),
            speed_received: false,
            climb_rate: meters_per_second(0.0),
            climb_rate_received: false,
            climb_rate_avg30s: meters_per_second(0.0),
            climb_rate_avg30s_available: false,
        }
    }

    /// a report relative to our own position
    pub fn with_relative_position (id: FlarmId, north: Length, east: Length, altitude: Length, now: f64)->Self {
        let mut t = FlarmTraffic::new(id);
        t.relative_north = north;
        t.relative_east = east;
        t.relative_altitude = altitude;
        t.valid.update(now);
        t
    }

    #[inline] pub fn has_name (&self)->bool { self.name.as_ref().is_some_and( |n| !n.is_empty()) }

    /// true if we have to estimate any of the motion values from the previous report
    pub fn is_motion_incomplete (&self)->bool {
        !(self.track_received && self.turn_rate_received && self.speed_received && self.climb_rate_received)
    }
}

/* #endregion FlarmTraffic */

/* #region FlarmState *****************************************************************************/

#[derive(Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct FlarmState {
    /// a FLARM device is connected
    pub available: Validity,
    pub traffic: Vec<FlarmTraffic>,
}

impl FlarmState {
    pub fn clear (&mut self) {
        self.available.clear();
        self.traffic.clear();
    }

    #[inline] pub fn is_detected (&self)->bool { self.available.is_valid() }

    pub fn has_traffic (&self)->bool { !self.traffic.is_empty() }

    pub fn find_traffic (&self, id: FlarmId)->Option<&FlarmTraffic> {
        self.traffic.iter().find( |t| t.id == id)
    }

    pub fn find_traffic_mut (&mut self, id: FlarmId)->Option<&mut FlarmTraffic> {
        self.traffic.iter_mut().find( |t| t.id == id)
    }

    /// add or replace a report. Returns false if the traffic list is full
    pub fn add_traffic (&mut self, traffic: FlarmTraffic)->bool {
        if let Some(t) = self.find_traffic_mut( traffic.id) {
            *t = traffic;
            true
        } else if self.traffic.len() < MAX_TRAFFIC {
            self.traffic.push( traffic);
            true
        } else {
            false
        }
    }

    /// drop traffic that was not reported within `TRAFFIC_MAX_AGE` (or reported in the future after a
    /// clock reset), and everything if the device itself went silent
    pub fn refresh (&mut self, now: f64) {
        self.available.expire( now, FLARM_MAX_AGE);
        if !self.available.is_valid() {
            self.traffic.clear();
        } else {
            self.traffic.retain_mut( |t| {
                t.valid.expire( now, TRAFFIC_MAX_AGE);
                t.valid.is_valid()
            });
        }
    }

    pub fn complement (&mut self, other: &FlarmState) {
        if !self.available.is_valid() && other.available.is_valid() {
            *self = other.clone();
        }
    }
}

/* #endregion FlarmState */

/* #region name lookup ****************************************************************************/

/// source of human readable names (callsigns) for FLARM ids
pub trait FlarmNameResolver: Send + Sync {
    fn lookup (&self, id: FlarmId)->Option<&str>;
}

/// in-memory name table, e.g. from the configured flarm names
#[derive(Clone,Debug,Default)]
pub struct FlarmNameMap {
    names: HashMap<FlarmId,String>,
}

impl FlarmNameMap {
    pub fn new (names: HashMap<FlarmId,String>)->Self { FlarmNameMap { names } }

    pub fn insert (&mut self, id: FlarmId, name: impl Into<String>) {
        self.names.insert( id, name.into());
    }

    pub fn len (&self)->usize { self.names.len() }
}

impl FlarmNameResolver for FlarmNameMap {
    fn lookup (&self, id: FlarmId)->Option<&str> {
        self.names.get(&id).map( |s| s.as_str())
    }
}

/* #endregion name lookup */
