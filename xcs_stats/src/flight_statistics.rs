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

use std::sync::{Mutex,MutexGuard};
use serde::{Serialize,Deserialize};
use tracing::debug;

use crate::{least_squares::LeastSquares, convex_filter::ConvexFilter, histogram::Histogram};

/// vario histogram range [m/s]
pub const VARIO_RANGE: f64 = 10.0;

pub const DEFAULT_VARIO_SCALE: f64 = 5.0;
pub const MIN_VARIO_SCALE: f64 = 0.5;

#[inline] fn hours (tflight: f64)->f64 { tflight.max(0.0) / 3600.0 }

/// the curves we accumulate over a flight. Time (x) values are flight hours
#[derive(Clone,Debug)]
pub struct FlightStatisticsData {
    pub altitude: LeastSquares,
    pub altitude_base: ConvexFilter,
    pub altitude_ceiling: ConvexFilter,
    pub altitude_terrain: LeastSquares,
    pub thermal_average: LeastSquares,
    pub task_speed: LeastSquares,
    pub vario_circling: Histogram,
    pub vario_cruise: Histogram,
    pub leg_start_times: Vec<Option<f64>>,
}

impl FlightStatisticsData {
    fn new ()->Self {
        FlightStatisticsData {
            altitude: LeastSquares::new(),
            altitude_base: ConvexFilter::new(),
            altitude_ceiling: ConvexFilter::new(),
            altitude_terrain: LeastSquares::new(),
            thermal_average: LeastSquares::new(),
            task_speed: LeastSquares::new(),
            vario_circling: Histogram::new( -VARIO_RANGE, VARIO_RANGE),
            vario_cruise: Histogram::new( -VARIO_RANGE, VARIO_RANGE),
            leg_start_times: Vec::new(),
        }
    }

    pub fn min_working_height (&self)->Option<f64> {
        if self.altitude_base.is_empty() { return None }

        let h = self.altitude_base.average_y() - self.altitude_base.std_dev_y();
        if self.altitude.is_empty() { Some(h) } else { Some( h.max( self.altitude.min_y())) }
    }

    pub fn max_working_height (&self)->Option<f64> {
        if self.altitude_ceiling.is_empty() { return None }

        let h = self.altitude_ceiling.average_y() + self.altitude_ceiling.std_dev_y();
        if self.altitude.is_empty() { Some(h) } else { Some( h.min( self.altitude.max_y())) }
    }

    fn vario_histograms (&self)->impl Iterator<Item=&Histogram> {
        [&self.vario_circling, &self.vario_cruise].into_iter().filter( |h| !h.is_empty())
    }
}

/// working band and ceiling trend of the barograph
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct BarographSummary {
    pub working_band_base: f64,
    pub working_band_ceiling: f64,
    pub ceiling_trend: Option<f64>, // [m/hr]
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct ClimbSummary {
    pub average_climb: f64, // [m/s]
    pub climb_trend: Option<f64>, // [m/s per hr]
}

/// per-flight statistics, guarded by its own lock. None of the methods call out while holding the lock
#[derive(Debug)]
pub struct FlightStatistics {
    data: Mutex<FlightStatisticsData>,
}

impl FlightStatistics {
    pub fn new ()->Self {
        FlightStatistics { data: Mutex::new( FlightStatisticsData::new()) }
    }

    fn lock (&self)->MutexGuard<'_,FlightStatisticsData> {
        // the data stays consistent even if a reader panicked
        self.data.lock().unwrap_or_else( |e| e.into_inner())
    }

    /// execute closure with a consistent view of all curves
    pub fn with_data<F,R> (&self, f: F)->R where F: FnOnce(&FlightStatisticsData)->R {
        let d = self.lock();
        f(&d)
    }

    /// start of a new flight
    pub fn reset (&self) {
        debug!("reset flight statistics");
        *self.lock() = FlightStatisticsData::new();
    }

    /// start of a task. Altitude curves persist
    pub fn start_task (&self, start_time: f64) {
        let mut d = self.lock();
        d.leg_start_times.clear();
        d.leg_start_times.push( Some(start_time));
        d.thermal_average.reset();
        d.task_speed.reset();
        d.vario_circling.clear();
        d.vario_cruise.clear();
    }

    pub fn add_altitude (&self, tflight: f64, alt: f64, final_glide: bool) {
        let t = hours(tflight);
        let mut d = self.lock();
        d.altitude.update( t, alt);

        if d.altitude_ceiling.has_result() && alt > d.altitude_ceiling.get_y_at(t) {
            d.altitude_ceiling.update_convex_positive( t, alt);
        }

        // a final glide descent is no thermal base
        if !final_glide && d.altitude_base.has_result() && alt < d.altitude_base.get_y_at(t) {
            d.altitude_base.update_convex_negative( t, alt);
        }
    }

    pub fn add_altitude_terrain (&self, tflight: f64, terrain_alt: f64) {
        self.lock().altitude_terrain.update( hours(tflight), terrain_alt);
    }

    /// top of a climb
    pub fn add_climb_ceiling (&self, tflight: f64, alt: f64) {
        self.lock().altitude_ceiling.update_convex_positive( hours(tflight), alt);
    }

    /// bottom of a climb. Ignored until there is a ceiling so that the takeoff altitude is not taken as base
    pub fn add_climb_base (&self, tflight: f64, alt: f64) {
        let mut d = self.lock();
        if d.altitude_ceiling.has_result() {
            d.altitude_base.update_convex_negative( hours(tflight), alt);
        }
    }

    /// average climb rate of a completed thermal, weighted by its duration
    pub fn add_thermal_average (&self, start: f64, end: f64, v: f64) {
        let duration = end - start;
        if duration > 0.0 {
            self.lock().thermal_average.update_weighted( hours( (start + end) * 0.5), v, duration);
        }
    }

    pub fn add_climb_rate (&self, tflight: f64, vario: f64, circling: bool) {
        let mut d = self.lock();
        if circling {
            d.vario_circling.update_histogram( vario);
        } else {
            d.vario_cruise.update_histogram( vario);
        }
    }

    /// task speeds are recorded in sequence
    pub fn save_task_speed (&self, v: f64) {
        let mut d = self.lock();
        let x = d.task_speed.count() as f64;
        d.task_speed.update( x, v);
    }

    /// record the start time of leg `index` unless it was already set
    pub fn set_leg_start (&self, index: usize, time: f64) {
        let mut d = self.lock();
        if d.leg_start_times.len() <= index {
            d.leg_start_times.resize( index+1, None);
        }
        if d.leg_start_times[index].is_none() {
            d.leg_start_times[index] = Some(time);
        }
    }

    pub fn leg_start_time (&self, index: usize)->Option<f64> {
        self.lock().leg_start_times.get(index).copied().flatten()
    }

    pub fn min_working_height (&self)->Option<f64> { self.lock().min_working_height() }

    pub fn max_working_height (&self)->Option<f64> { self.lock().max_working_height() }

    /// historical thermal average, with the current MacCready folded in while circling
    pub fn average_thermal_adjusted (&self, mc_current: f64, circling: bool)->f64 {
        let d = self.lock();
        let y_ave = d.thermal_average.average_y();

        if y_ave > 0.0 {
            if mc_current > 0.0 && circling {
                let n = d.thermal_average.count() as f64;
                (n * y_ave + mc_current) / (n + 1.0)
            } else {
                y_ave
            }
        } else {
            mc_current
        }
    }

    /// 90th percentile of recorded vario values (at least `MIN_VARIO_SCALE`)
    pub fn vario_scale_positive (&self)->f64 {
        let d = self.lock();
        d.vario_histograms()
            .map( |h| h.get_percentile(0.9))
            .reduce( f64::max)
            .map( |v| v.max( MIN_VARIO_SCALE))
            .unwrap_or( DEFAULT_VARIO_SCALE)
    }

    /// 10th percentile of recorded vario values (at most `-MIN_VARIO_SCALE`)
    pub fn vario_scale_negative (&self)->f64 {
        let d = self.lock();
        d.vario_histograms()
            .map( |h| h.get_percentile(0.1))
            .reduce( f64::min)
            .map( |v| v.min( -MIN_VARIO_SCALE))
            .unwrap_or( -DEFAULT_VARIO_SCALE)
    }

    pub fn barograph_summary (&self)->Option<BarographSummary> {
        let d = self.lock();
        let n = d.altitude_ceiling.count();
        if n < 2 { return None }

        Some( BarographSummary {
            working_band_base: d.altitude_base.average_y(),
            working_band_ceiling: d.altitude_ceiling.average_y(),
            ceiling_trend: if n >= 4 { Some( d.altitude_ceiling.gradient()) } else { None },
        })
    }

    pub fn climb_summary (&self)->Option<ClimbSummary> {
        let d = self.lock();
        let n = d.thermal_average.count();
        if n == 0 { return None }

        Some( ClimbSummary {
            average_climb: d.thermal_average.average_y(),
            climb_trend: if n >= 2 { Some( d.thermal_average.gradient()) } else { None },
        })
    }
}

impl Default for FlightStatistics {
    fn default()->Self { FlightStatistics::new() }
}
