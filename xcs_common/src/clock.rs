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

use std::{sync::atomic::{AtomicU64,Ordering}, time::{Duration,Instant}};

/// source of monotonic seconds. All staleness checks (field validity, traffic expiry, connection state)
/// are relative to this so that simulations and tests can run on their own time base
pub trait Clock: Send + Sync {
    fn now (&self)->f64;
}

/// wall clock based, counting from creation of the clock
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new ()->Self { MonotonicClock { origin: Instant::now() } }
}

impl Default for MonotonicClock {
    fn default()->Self { MonotonicClock::new() }
}

impl Clock for MonotonicClock {
    fn now (&self)->f64 { self.origin.elapsed().as_secs_f64() }
}

/// explicitly driven clock for replays and tests
pub struct ManualClock {
    secs: AtomicU64, // f64 bits
}

impl ManualClock {
    pub fn new (start: f64)->Self {
        ManualClock { secs: AtomicU64::new( start.to_bits()) }
    }

    pub fn set (&self, secs: f64) {
        self.secs.store( secs.to_bits(), Ordering::Relaxed);
    }

    pub fn advance (&self, dt: f64)->f64 {
        let t = self.now() + dt;
        self.set(t);
        t
    }
}

impl Clock for ManualClock {
    fn now (&self)->f64 { f64::from_bits( self.secs.load(Ordering::Relaxed)) }
}

// Duration ctor shortcuts (stable replacements for the experimental Duration::from_mins etc.)
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn secs_f64 (n: f64)->Duration { Duration::from_secs_f64(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
