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

//! fills in values that can be derived from a single merged snapshot (`fill`), and rates of change
//! that need the previous one (`compute`)

use uom::si::f64::{Length,Velocity};
use xcs_common::{GRAVITY, angle::Angle, units::{meters, meters_per_second, to_meters, to_meters_per_second}};

use crate::{
    config::ComputerSettings, derived::DerivedInfo, nmea_info::NmeaInfo,
    pressure::{AtmosphericPressure, air_density_ratio}
};

/// min distance between two fixes to derive a track from them [m]
const MIN_TRACK_DISTANCE: f64 = 1.0;

pub struct BasicComputer;

impl BasicComputer {

    /* #region fill *****************************************************************************/

    pub fn fill (basic: &mut NmeaInfo, settings: &ComputerSettings) {
        Self::fill_vario( basic);
        Self::compute_pressure( basic, settings);
        Self::compute_nav_altitude( basic, settings);
    }

    fn fill_vario (basic: &mut NmeaInfo) {
        if basic.total_energy_vario_available.is_valid() {
            basic.brutto_vario = basic.total_energy_vario;
            basic.brutto_vario_available = basic.total_energy_vario_available;

            if !basic.netto_vario_available.is_valid() {
                basic.netto_vario = basic.total_energy_vario;
                basic.netto_vario_available = basic.total_energy_vario_available;
            }
        }
    }

    /// QNH reported by a device takes precedence over the configured one
    fn qnh (basic: &NmeaInfo, settings: &ComputerSettings)->Option<AtmosphericPressure> {
        if basic.settings.qnh_available.is_valid() { Some(basic.settings.qnh) } else { settings.qnh }
    }

    fn compute_pressure (basic: &mut NmeaInfo, settings: &ComputerSettings) {
        let qnh = Self::qnh( basic, settings);

        if !basic.static_pressure_available.is_valid() {
            if basic.pressure_altitude_available.is_valid() {
                basic.static_pressure = AtmosphericPressure::pressure_altitude_to_static_pressure( basic.pressure_altitude);
                basic.static_pressure_available = basic.pressure_altitude_available;
            } else if let (true, Some(qnh)) = (basic.baro_altitude_available.is_valid(), qnh) {
                basic.static_pressure = qnh.qnh_altitude_to_static_pressure( basic.baro_altitude);
                basic.static_pressure_available = basic.baro_altitude_available;
            }
        }

        if !basic.pressure_altitude_available.is_valid() {
            if basic.static_pressure_available.is_valid() {
                basic.pressure_altitude = AtmosphericPressure::static_pressure_to_pressure_altitude( basic.static_pressure);
                basic.pressure_altitude_available = basic.static_pressure_available;
            } else if let (true, Some(qnh)) = (basic.baro_altitude_available.is_valid(), qnh) {
                basic.pressure_altitude = qnh.qnh_altitude_to_pressure_altitude( basic.baro_altitude);
                basic.pressure_altitude_available = basic.baro_altitude_available;
            }
        }

        if let Some(qnh) = qnh {
            if basic.static_pressure_available.is_valid() {
                basic.baro_altitude = qnh.static_pressure_to_qnh_altitude( basic.static_pressure);
                basic.baro_altitude_available = basic.static_pressure_available;
            } else if basic.pressure_altitude_available.is_valid() {
                basic.baro_altitude = qnh.pressure_altitude_to_qnh_altitude( basic.pressure_altitude);
                basic.baro_altitude_available = basic.pressure_altitude_available;
            }
        } else if !basic.baro_altitude_available.is_valid() && basic.pressure_altitude_available.is_valid() {
            // best guess without QNH, not flagged as available
            basic.baro_altitude = basic.pressure_altitude;
        }
    }

    fn compute_nav_altitude (basic: &mut NmeaInfo, settings: &ComputerSettings) {
        basic.nav_altitude = if settings.nav_baro_altitude_enabled && basic.baro_altitude_available.is_valid() {
            Some(basic.baro_altitude)
        } else if basic.gps_altitude_available.is_valid() {
            Some(basic.gps_altitude)
        } else {
            None
        };
    }

    /* #endregion fill */

    /* #region compute **************************************************************************/

    /// derive values that need the previous snapshot `last`. Does nothing unless time advanced
    pub fn compute (basic: &mut NmeaInfo, last: &NmeaInfo, calculated: &DerivedInfo, settings: &ComputerSettings) {
        if !basic.has_time_advanced_since( last) { return }

        Self::compute_track( basic, last);
        Self::compute_ground_speed( basic, last);
        Self::compute_airspeed( basic, calculated);
        Self::compute_energy_height( basic);
        Self::compute_gps_vario( basic, last);
        Self::compute_brutto_vario( basic);
        Self::compute_netto_vario( basic, calculated);
        Self::compute_dynamics( basic, calculated);
    }

    fn compute_track (basic: &mut NmeaInfo, last: &NmeaInfo) {
        if basic.track_available.is_valid() || !basic.location_available.is_valid() || !last.location_available.is_valid() {
            return
        }

        if to_meters( last.location.distance( &basic.location)) >= MIN_TRACK_DISTANCE {
            basic.track = last.location.bearing( &basic.location);
            basic.track_available = basic.location_available;
        }
    }

    fn compute_ground_speed (basic: &mut NmeaInfo, last: &NmeaInfo) {
        if basic.ground_speed_available.is_valid() { return }

        basic.ground_speed = meters_per_second(0.0);
        if !basic.location_available.is_valid() || !last.location_available.is_valid() { return }

        let dt = basic.time - last.time;
        let d = to_meters( last.location.distance( &basic.location));
        basic.ground_speed = meters_per_second( d / dt);
        basic.ground_speed_available = basic.location_available;
    }

    /// estimate true airspeed from ground vector and wind if we have no measured airspeed
    fn compute_airspeed (basic: &mut NmeaInfo, calculated: &DerivedInfo) {
        if basic.airspeed_available.is_valid() && basic.airspeed_real { return }

        let wind = match calculated.wind {
            Some(w) if w.is_non_zero() && calculated.flying && basic.ground_speed_available.is_valid() => w,
            _ => {
                basic.airspeed_available.clear();
                return
            }
        };

        let gs = to_meters_per_second( basic.ground_speed);
        let ws = to_meters_per_second( wind.norm);
        let x = gs * basic.track.sin() + ws * wind.bearing.sin();
        let y = gs * basic.track.cos() + ws * wind.bearing.cos();

        let tas = meters_per_second( x.hypot(y));
        basic.true_airspeed = tas;
        basic.indicated_airspeed = tas / air_density_ratio( basic.baro_altitude_preferred());
        basic.airspeed_available.update( basic.clock);
        basic.airspeed_real = false;
    }

    fn compute_energy_height (basic: &mut NmeaInfo) {
        basic.energy_height = if basic.airspeed_available.is_valid() {
            let tas = to_meters_per_second( basic.true_airspeed);
            meters( tas * tas / (2.0 * GRAVITY))
        } else {
            meters(0.0)
        };

        basic.te_altitude = basic.nav_altitude.unwrap_or( meters(0.0)) + basic.energy_height;
    }

    fn compute_gps_vario (basic: &mut NmeaInfo, last: &NmeaInfo) {
        if let (Some(alt), Some(last_alt)) = (basic.nav_altitude, last.nav_altitude) {
            let dt = basic.time - last.time;
            basic.gps_vario = meters_per_second( to_meters( alt - last_alt) / dt);
            basic.gps_vario_te = meters_per_second( to_meters( basic.te_altitude - last.te_altitude) / dt);
        } else {
            basic.gps_vario = meters_per_second(0.0);
            basic.gps_vario_te = meters_per_second(0.0);
        }
    }

    fn compute_brutto_vario (basic: &mut NmeaInfo) {
        if basic.total_energy_vario_available.is_valid() {
            basic.brutto_vario = basic.total_energy_vario;
            basic.brutto_vario_available = basic.total_energy_vario_available;
        } else {
            basic.brutto_vario = basic.gps_vario;
            if basic.nav_altitude.is_some() {
                basic.brutto_vario_available.update( basic.clock);
            } else {
                basic.brutto_vario_available.clear();
            }
        }
    }

    fn compute_netto_vario (basic: &mut NmeaInfo, calculated: &DerivedInfo) {
        if basic.netto_vario_available.is_valid() || !basic.brutto_vario_available.is_valid() { return }
        basic.netto_vario = basic.brutto_vario - calculated.sink_rate;
        basic.netto_vario_available = basic.brutto_vario_available;
    }

    /// bank and pitch estimates, and the g-load unless a device measures it
    fn compute_dynamics (basic: &mut NmeaInfo, calculated: &DerivedInfo) {
        let moving = to_meters_per_second( basic.ground_speed) > 0.0 || calculated.wind_available();

        if calculated.flying && moving {
            let tas = to_meters_per_second( basic.true_airspeed);

            if basic.airspeed_available.is_valid() {
                let bank = (calculated.turn_rate_heading.to_radians() * tas / GRAVITY).atan();
                basic.acceleration.bank_angle = Angle::from_radians( bank);
                if !basic.acceleration.available.is_valid() {
                    basic.acceleration.g_load = 1.0 / bank.cos().abs().max(0.001);
                }
            } else {
                basic.acceleration.bank_angle = Angle::zero();
                if !basic.acceleration.available.is_valid() {
                    basic.acceleration.g_load = 1.0;
                }
            }

            basic.acceleration.pitch_angle = if basic.airspeed_available.is_valid() && basic.total_energy_vario_available.is_valid() {
                let dh = to_meters_per_second( basic.gps_vario - basic.total_energy_vario);
                Angle::from_radians( dh.atan2( tas))
            } else {
                Angle::zero()
            };

        } else {
            basic.acceleration.bank_angle = Angle::zero();
            basic.acceleration.pitch_angle = Angle::zero();
            if !basic.acceleration.available.is_valid() {
                basic.acceleration.g_load = 1.0;
            }
        }
    }

    /* #endregion compute */
}
