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

//! shortcuts for the uom quantities used throughout, plus serde helpers for config files that
//! carry plain SI numbers

use uom::si::{
    f64::{Length,Velocity,Time},
    length::meter, velocity::{meter_per_second,kilometer_per_hour,knot}, time::second
};
use serde::{Deserialize,ser::Serializer,de::Deserializer};

#[inline] pub fn meters (v: f64)->Length { Length::new::<meter>(v) }
#[inline] pub fn meters_per_second (v: f64)->Velocity { Velocity::new::<meter_per_second>(v) }
#[inline] pub fn kilometers_per_hour (v: f64)->Velocity { Velocity::new::<kilometer_per_hour>(v) }
#[inline] pub fn knots (v: f64)->Velocity { Velocity::new::<knot>(v) }
#[inline] pub fn seconds (v: f64)->Time { Time::new::<second>(v) }

#[inline] pub fn to_meters (len: Length)->f64 { len.get::<meter>() }
#[inline] pub fn to_meters_per_second (v: Velocity)->f64 { v.get::<meter_per_second>() }

//--- serialization support

pub fn ser_length_as_meters<S: Serializer> (length: &Length, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_f64( length.get::<meter>())
}

pub fn de_length_from_meters <'a,D>(deserializer: D) -> Result<Length,D::Error> where D: Deserializer<'a> {
    let v: f64 = f64::deserialize(deserializer)?;
    Ok( meters(v))
}

pub fn ser_velocity_as_meters_per_second<S: Serializer> (v: &Velocity, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_f64( v.get::<meter_per_second>())
}

pub fn de_velocity_from_meters_per_second <'a,D>(deserializer: D) -> Result<Velocity,D::Error> where D: Deserializer<'a> {
    let v: f64 = f64::deserialize(deserializer)?;
    Ok( meters_per_second(v))
}
