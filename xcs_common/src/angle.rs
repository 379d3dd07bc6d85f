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

//! wraparound-safe angles and circular angle intervals.
//! `Angle` keeps a radian value that is not normalized - normalization is explicit through
//! `as_bearing()` [0,2π) and `as_delta()` (-π,π]

use std::{fmt, ops, cmp};
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use crate::{PI, TWO_PI, HALF_PI};

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d.rem_euclid(360.0);
    if x > 180.0 { x - 360.0 } else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d.rem_euclid(360.0);
    if x >= 360.0 { 0.0 } else { x }
}

/* #region Angle ******************************************************************************************/

#[derive(Copy,Clone,Default,PartialEq)]
pub struct Angle(f64);

impl Angle {
    #[inline] pub const fn zero()->Self { Angle(0.0) }
    #[inline] pub const fn half_circle()->Self { Angle(PI) }
    #[inline] pub const fn full_circle()->Self { Angle(TWO_PI) }
    #[inline] pub const fn quarter_circle()->Self { Angle(HALF_PI) }

    #[inline] pub fn from_radians (rad: f64)->Self { Angle(rad) }
    #[inline] pub fn from_degrees (deg: f64)->Self { Angle(deg.to_radians()) }

    #[inline] pub fn radians(&self)->f64 { self.0 }
    #[inline] pub fn degrees(&self)->f64 { self.0.to_degrees() }

    #[inline] pub fn sin(&self)->f64 { self.0.sin() }
    #[inline] pub fn cos(&self)->f64 { self.0.cos() }
    #[inline] pub fn tan(&self)->f64 { self.0.tan() }

    #[inline] pub fn abs(&self)->Self { Angle(self.0.abs()) }
    #[inline] pub fn half(&self)->Self { Angle(self.0 * 0.5) }

    /// normalized to [0,2π)
    pub fn as_bearing (&self)->Self {
        let v = self.0.rem_euclid(TWO_PI);
        // rem_euclid can round up to TWO_PI for tiny negative values
        if v >= TWO_PI { Angle(0.0) } else { Angle(v) }
    }

    /// normalized to (-π,π]
    pub fn as_delta (&self)->Self {
        let v = self.as_bearing().0;
        if v > PI { Angle(v - TWO_PI) } else { Angle(v) }
    }

    /// the opposite direction as bearing
    #[inline] pub fn reciprocal (&self)->Self { (*self + Angle::half_circle()).as_bearing() }

    #[inline] pub fn flipped (&self)->Self { Angle(-self.0) }

    /// is this angle within the circular interval that goes clockwise from `start` to `end`
    pub fn between (&self, start: Angle, end: Angle)->bool {
        let width = (end - start).as_bearing();
        let delta = (*self - start).as_bearing();
        delta <= width
    }

    /// linear interpolation towards `end` along the shorter arc
    pub fn fraction (&self, end: Angle, t: f64)->Self {
        if self.0 == end.0 {
            end
        } else {
            let diff = (end - *self).as_delta();
            *self + diff * t
        }
    }

    /// the bisector of the shorter arc between self and `end`, or the reciprocal bearing if both are the same
    pub fn half_angle (&self, end: Angle)->Self {
        if self.0 == end.0 {
            self.reciprocal()
        } else {
            let diff = (end - *self).as_delta();
            (*self + diff.half()).as_bearing()
        }
    }

    /// true if the shorter arc between both angles does not exceed `max_diff`
    #[inline] pub fn compare_roughly (&self, other: Angle, max_diff: Angle)->bool {
        (*self - other).as_delta().abs().0 <= max_diff.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:.1}deg", self.degrees()) }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Angle({}deg)", self.degrees()) }
}

impl cmp::PartialOrd for Angle {
    fn partial_cmp(&self, other:&Self) -> Option<cmp::Ordering> { self.0.partial_cmp(&other.0) }
}

//--- num ops

impl ops::Add<Angle> for Angle {
    type Output = Self;
    fn add (self, rhs: Angle)->Self::Output { Angle( self.0 + rhs.0) }
}
impl ops::Sub<Angle> for Angle {
    type Output = Self;
    fn sub (self, rhs: Angle)->Self::Output { Angle( self.0 - rhs.0) }
}
impl ops::Neg for Angle {
    type Output = Self;
    fn neg (self)->Self::Output { Angle( -self.0) }
}
impl ops::AddAssign<Angle> for Angle {
    fn add_assign (&mut self, rhs: Angle) { self.0 += rhs.0 }
}
impl ops::SubAssign<Angle> for Angle {
    fn sub_assign (&mut self, rhs: Angle) { self.0 -= rhs.0 }
}

// scaling is only allowed with floats
impl ops::Mul<f64> for Angle {
    type Output = Self;
    fn mul (self, rhs: f64)->Self::Output { Angle( self.0 * rhs) }
}
impl ops::Div<f64> for Angle {
    type Output = Self;
    fn div (self, rhs: f64)->Self::Output { Angle( self.0 / rhs) }
}

//--- serde support (as degrees)

impl Serialize for Angle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64( self.degrees())
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D>(deserializer: D) -> Result<Angle, D::Error> where D: Deserializer<'de> {
        let deg = f64::deserialize(deserializer)?;
        Ok( Angle::from_degrees(deg))
    }
}

/* #endregion Angle */

/* #region AngleRange *************************************************************************************/

/// a clockwise circular interval from `start` to `end`, which can wrap around north (e.g. 350deg..20deg)
#[derive(Copy,Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct AngleRange {
    pub start: Angle,
    pub end: Angle,
}

impl AngleRange {
    pub fn new (start: Angle, end: Angle)->Self {
        AngleRange { start, end }
    }

    pub fn from_degrees (start: f64, end: f64)->Self {
        AngleRange::new( Angle::from_degrees(start), Angle::from_degrees(end))
    }

    #[inline] pub fn get_length (&self)->Angle { (self.end - self.start).as_bearing() }

    #[inline] pub fn get_middle (&self)->Angle { (self.start + self.get_length().half()).as_bearing() }

    #[inline] pub fn is_inside (&self, a: Angle)->bool { a.between( self.start, self.end) }

    #[inline] pub fn is_empty (&self)->bool { self.get_length().radians() == 0.0 }

    pub fn reverse (&mut self) {
        std::mem::swap( &mut self.start, &mut self.end);
    }

    /// extend the endpoint that is closer to `value`. Returns false if `value` already is inside
    pub fn extend (&mut self, value: Angle)->bool {
        if self.is_inside(value) {
            false
        } else {
            if (value - self.end).as_bearing() < (self.start - value).as_bearing() {
                self.end = value;
            } else {
                self.start = value;
            }
            true
        }
    }

    /// clip to the overlap with `other`. If the ranges do not overlap this returns false and does not change self
    pub fn intersect_with (&mut self, other: &AngleRange)->bool {
        if self.is_inside( other.start) {
            self.start = other.start;
            if !other.is_inside( self.end) {
                self.end = other.end;
            }
            true

        } else if other.is_inside( self.start) {
            if !other.is_inside( self.end) {
                self.end = other.end;
            }
            true

        } else {
            false
        }
    }
}

impl fmt::Display for AngleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}..{:.1}]deg", self.start.as_bearing().degrees(), self.end.as_bearing().degrees())
    }
}

/* #endregion AngleRange */
