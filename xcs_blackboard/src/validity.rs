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

/// time stamp of the last update of a value that can go stale. Times are monotonic clock seconds.
/// A value without time stamp is not available
#[derive(Clone,Copy,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct Validity {
    last: Option<f64>,
}

impl Validity {
    pub const fn invalid ()->Self { Validity { last: None } }

    pub fn valid_at (now: f64)->Self { Validity { last: Some(now) } }

    #[inline] pub fn clear (&mut self) { self.last = None }

    #[inline] pub fn update (&mut self, now: f64) { self.last = Some(now) }

    #[inline] pub fn is_valid (&self)->bool { self.last.is_some() }

    #[inline] pub fn last (&self)->Option<f64> { self.last }

    /// clear if older than `max_age` or if the clock went backwards. Returns true if this invalidated the value
    pub fn expire (&mut self, now: f64, max_age: f64)->bool {
        match self.last {
            Some(t) if now < t || now > t + max_age => {
                self.last = None;
                true
            }
            _ => false
        }
    }

    /// is this more recent than `other`
    pub fn modified (&self, other: &Validity)->bool {
        match (self.last, other.last) {
            (Some(t), Some(t_other)) => t > t_other,
            (Some(_), None) => true,
            _ => false
        }
    }

    /// take over `other` if we are not valid but it is. Returns true if it was taken over
    pub fn complement (&mut self, other: &Validity)->bool {
        if self.last.is_none() && other.last.is_some() {
            self.last = other.last;
            true
        } else {
            false
        }
    }

    /// seconds between both updates, if both are valid
    pub fn time_difference (&self, other: &Validity)->Option<f64> {
        match (self.last, other.last) {
            (Some(t), Some(t_other)) => Some(t - t_other),
            _ => None
        }
    }
}
