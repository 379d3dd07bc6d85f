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

use chrono::{DateTime,Utc,Timelike};
use serde::{Serialize,Deserialize};
use uom::si::{
    f64::{Length,Velocity,ThermodynamicTemperature},
    length::meter, velocity::meter_per_second, thermodynamic_temperature::degree_celsius
};
use xcs_common::{angle::Angle, geo::GeoPoint, units::{meters,meters_per_second}};

use crate::{validity::Validity, flarm::FlarmState, pressure::{AtmosphericPressure,air_density_ratio}};

// max ages [sec] after which fields are considered stale
pub const ALIVE_MAX_AGE: f64 = 10.0;
pub const LOCATION_MAX_AGE: f64 = 10.0;
pub const TIME_MAX_AGE: f64 = 10.0;
pub const AIRSPEED_MAX_AGE: f64 = 30.0;
pub const ALTITUDE_MAX_AGE: f64 = 30.0;
pub const VARIO_MAX_AGE: f64 = 5.0;
pub const GPS_STATE_MAX_AGE: f64 = 5.0;
pub const ACCELERATION_MAX_AGE: f64 = 5.0;
pub const WIND_MAX_AGE: f64 = 600.0;
pub const ENVIRONMENT_MAX_AGE: f64 = 300.0;
pub const SETTINGS_MAX_AGE: f64 = 600.0;

/* #region sub states *****************************************************************************/

#[derive(Clone,Copy,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub enum FixQuality {
    #[default]
    NoFix,
    Gps,
    Dgps,
    Estimated,
    Simulation,
}

#[derive(Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct GpsState {
    pub fix_quality: FixQuality,
    pub fix_quality_available: Validity,
    pub satellites_used: Option<u32>,
    pub satellites_used_available: Validity,
    pub hdop: Option<f64>,

    /// data comes from a real device
    pub real: bool,
    pub simulator: bool,
    pub replay: bool,
}

impl GpsState {
    fn expire (&mut self, now: f64) {
        if self.fix_quality_available.expire( now, GPS_STATE_MAX_AGE) {
            self.fix_quality = FixQuality::NoFix;
        }
        if self.satellites_used_available.expire( now, GPS_STATE_MAX_AGE) {
            self.satellites_used = None;
        }
    }

    fn complement (&mut self, other: &GpsState) {
        if self.fix_quality_available.complement( &other.fix_quality_available) {
            self.fix_quality = other.fix_quality;
            self.hdop = other.hdop;
        }
        if self.satellites_used_available.complement( &other.satellites_used_available) {
            self.satellites_used = other.satellites_used;
        }
        self.real |= other.real;
    }
}

/// direction (where the wind comes from) and speed
#[derive(Clone,Copy,Debug,PartialEq,Serialize,Deserialize)]
pub struct SpeedVector {
    pub bearing: Angle,
    pub norm: Velocity,
}

impl SpeedVector {
    pub fn new (bearing: Angle, norm: Velocity)->Self { SpeedVector { bearing, norm } }

    pub fn zero ()->Self { SpeedVector { bearing: Angle::zero(), norm: meters_per_second(0.0) } }

    pub fn is_non_zero (&self)->bool { self.norm.get::<meter_per_second>() != 0.0 }
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct AccelerationState {
    /// g-load reported by a device
    pub available: Validity,
    pub real: bool,
    pub g_load: f64,

    // estimated
    pub bank_angle: Angle,
    pub pitch_angle: Angle,
}

impl AccelerationState {
    pub fn new ()->Self {
        AccelerationState {
            available: Validity::invalid(),
            real: false,
            g_load: 1.0,
            bank_angle: Angle::zero(),
            pitch_angle: Angle::zero()
        }
    }

    fn complement (&mut self, other: &AccelerationState) {
        if self.available.complement( &other.available) {
            self.g_load = other.g_load;
            self.real = other.real;
        }
    }
}

/// glide computer settings that are reported by (or sent to) external devices
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct ExternalSettings {
    pub mac_cready: Velocity,
    pub mac_cready_available: Validity,
    pub ballast_fraction: f64,
    pub ballast_fraction_available: Validity,
    pub bugs: f64,
    pub bugs_available: Validity,
    pub qnh: AtmosphericPressure,
    pub qnh_available: Validity,
}

impl ExternalSettings {
    pub fn new ()->Self {
        ExternalSettings {
            mac_cready: meters_per_second(0.0),
            mac_cready_available: Validity::invalid(),
            ballast_fraction: 0.0,
            ballast_fraction_available: Validity::invalid(),
            bugs: 1.0,
            bugs_available: Validity::invalid(),
            qnh: AtmosphericPressure::standard(),
            qnh_available: Validity::invalid(),
        }
    }

    pub fn provide_mac_cready (&mut self, mc: Velocity, now: f64) {
        self.mac_cready = mc;
        self.mac_cready_available.update(now);
    }

    pub fn provide_qnh (&mut self, qnh: AtmosphericPressure, now: f64) {
        self.qnh = qnh;
        self.qnh_available.update(now);
    }

    fn expire (&mut self, now: f64) {
        self.mac_cready_available.expire( now, SETTINGS_MAX_AGE);
        self.ballast_fraction_available.expire( now, SETTINGS_MAX_AGE);
        self.bugs_available.expire( now, SETTINGS_MAX_AGE);
        self.qnh_available.expire( now, SETTINGS_MAX_AGE);
    }

    fn complement (&mut self, other: &ExternalSettings) {
        if self.mac_cready_available.complement( &other.mac_cready_available) { self.mac_cready = other.mac_cready }
        if self.ballast_fraction_available.complement( &other.ballast_fraction_available) { self.ballast_fraction = other.ballast_fraction }
        if self.bugs_available.complement( &other.bugs_available) { self.bugs = other.bugs }
        if self.qnh_available.complement( &other.qnh_available) { self.qnh = other.qnh }
    }
}

/* #endregion sub states */

/* #region NmeaInfo *******************************************************************************/

/// field-wise first-valid-wins merge: copy the listed fields if `avail` was taken over from `other`
macro_rules! complement_fields {
    ($self:ident, $other:ident, $( $avail:ident => [ $( $field:ident ),+ ] ),* $(,)? ) => {
        $(
            if $self.$avail.complement( &$other.$avail) {
                $( $self.$field = $other.$field.clone(); )+
            }
        )*
    };
}

/// snapshot of everything we know about our own aircraft, as reported by one source (device, simulator
/// or replay) or merged from several of them. Every value that can go stale has its own `Validity`
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct NmeaInfo {
    /// monotonic time of the last update, used as reference for all validities
    pub clock: f64,
    /// the source is connected and sends data
    pub alive: Validity,

    pub gps: GpsState,
    pub acceleration: AccelerationState,

    /// GPS time [seconds of day UTC]
    pub time: f64,
    pub time_available: Validity,
    pub date_time_utc: Option<DateTime<Utc>>,

    pub location: GeoPoint,
    pub location_available: Validity,

    pub track: Angle,
    pub track_available: Validity,

    pub ground_speed: Velocity,
    pub ground_speed_available: Validity,

    pub indicated_airspeed: Velocity,
    pub true_airspeed: Velocity,
    pub airspeed_available: Validity,
    /// airspeed was measured (not estimated from wind)
    pub airspeed_real: bool,

    pub gps_altitude: Length,
    pub gps_altitude_available: Validity,

    pub static_pressure: AtmosphericPressure,
    pub static_pressure_available: Validity,

    pub pressure_altitude: Length,
    pub pressure_altitude_available: Validity,

    pub baro_altitude: Length,
    pub baro_altitude_available: Validity,

    pub total_energy_vario: Velocity,
    pub total_energy_vario_available: Validity,

    pub netto_vario: Velocity,
    pub netto_vario_available: Validity,

    pub external_wind: SpeedVector,
    pub external_wind_available: Validity,

    pub temperature: ThermodynamicTemperature,
    pub temperature_available: Validity,

    pub humidity: f64, // [%]
    pub humidity_available: Validity,

    pub voltage: f64, // [V]
    pub voltage_available: Validity,

    pub settings: ExternalSettings,
    pub flarm: FlarmState,

    // derived values, recomputed by BasicComputer
    pub nav_altitude: Option<Length>,
    pub energy_height: Length,
    pub te_altitude: Length,
    pub gps_vario: Velocity,
    pub gps_vario_te: Velocity,
    pub brutto_vario: Velocity,
    pub brutto_vario_available: Validity,
}

impl NmeaInfo {
    pub fn new ()->Self {
        NmeaInfo {
            clock: 0.0,
            alive: Validity::invalid(),
            gps: GpsState::default(),
            acceleration: AccelerationState::new(),
            time: 0.0,
            time_available: Validity::invalid(),
            date_time_utc: None,
            location: GeoPoint::default(),
            location_available: Validity::invalid(),
            track: Angle::zero(),
            track_available: Validity::invalid(),
            ground_speed: meters_per_second(0.0),
            ground_speed_available: Validity::invalid(),
            indicated_airspeed: meters_per_second(0.0),
            true_airspeed: meters_per_second(0.0),
            airspeed_available: Validity::invalid(),
            airspeed_real: false,
            gps_altitude: meters(0.0),
            gps_altitude_available: Validity::invalid(),
            static_pressure: AtmosphericPressure::standard(),
            static_pressure_available: Validity::invalid(),
            pressure_altitude: meters(0.0),
            pressure_altitude_available: Validity::invalid(),
            baro_altitude: meters(0.0),
            baro_altitude_available: Validity::invalid(),
            total_energy_vario: meters_per_second(0.0),
            total_energy_vario_available: Validity::invalid(),
            netto_vario: meters_per_second(0.0),
            netto_vario_available: Validity::invalid(),
            external_wind: SpeedVector::zero(),
            external_wind_available: Validity::invalid(),
            temperature: ThermodynamicTemperature::new::<degree_celsius>(15.0),
            temperature_available: Validity::invalid(),
            humidity: 0.0,
            humidity_available: Validity::invalid(),
            voltage: 0.0,
            voltage_available: Validity::invalid(),
            settings: ExternalSettings::new(),
            flarm: FlarmState::default(),
            nav_altitude: None,
            energy_height: meters(0.0),
            te_altitude: meters(0.0),
            gps_vario: meters_per_second(0.0),
            gps_vario_te: meters_per_second(0.0),
            brutto_vario: meters_per_second(0.0),
            brutto_vario_available: Validity::invalid(),
        }
    }

    /// invalidate everything but keep the clock
    pub fn reset (&mut self) {
        let clock = self.clock;
        *self = NmeaInfo::new();
        self.clock = clock;
    }

    #[inline] pub fn update_clock (&mut self, now: f64) { self.clock = now }

    #[inline] pub fn connected (&self)->bool { self.alive.is_valid() }

    /// invalidate all fields that are older than their max age with respect to `self.clock`
    pub fn expire (&mut self) {
        let now = self.clock;

        self.alive.expire( now, ALIVE_MAX_AGE);
        self.gps.expire( now);
        self.acceleration.available.expire( now, ACCELERATION_MAX_AGE);

        self.time_available.expire( now, TIME_MAX_AGE);
        self.location_available.expire( now, LOCATION_MAX_AGE);
        self.track_available.expire( now, LOCATION_MAX_AGE);
        self.ground_speed_available.expire( now, LOCATION_MAX_AGE);
        self.airspeed_available.expire( now, AIRSPEED_MAX_AGE);

        self.gps_altitude_available.expire( now, ALTITUDE_MAX_AGE);
        self.static_pressure_available.expire( now, ALTITUDE_MAX_AGE);
        self.pressure_altitude_available.expire( now, ALTITUDE_MAX_AGE);
        self.baro_altitude_available.expire( now, ALTITUDE_MAX_AGE);

        self.total_energy_vario_available.expire( now, VARIO_MAX_AGE);
        self.netto_vario_available.expire( now, VARIO_MAX_AGE);
        self.brutto_vario_available.expire( now, VARIO_MAX_AGE);

        self.external_wind_available.expire( now, WIND_MAX_AGE);
        self.temperature_available.expire( now, ENVIRONMENT_MAX_AGE);
        self.humidity_available.expire( now, ENVIRONMENT_MAX_AGE);
        self.voltage_available.expire( now, ENVIRONMENT_MAX_AGE);

        self.settings.expire( now);
        self.flarm.refresh( now);
    }

    /// expire against the wall clock `now`. A source that stopped talking is reset completely
    pub fn expire_wall_clock (&mut self, now: f64) {
        if !self.alive.is_valid() { return }

        self.update_clock( now);
        self.expire();
        if !self.alive.is_valid() {
            self.reset();
        }
    }

    /// fill in all values we don't have yet from `other`, if it is alive
    pub fn complement (&mut self, other: &NmeaInfo) {
        if !other.alive.is_valid() { return }

        self.alive.complement( &other.alive);
        if other.clock > self.clock { self.clock = other.clock }

        self.gps.complement( &other.gps);
        self.acceleration.complement( &other.acceleration);

        complement_fields!{ self, other,
            time_available => [time, date_time_utc],
            location_available => [location],
            track_available => [track],
            ground_speed_available => [ground_speed],
            airspeed_available => [indicated_airspeed, true_airspeed, airspeed_real],
            gps_altitude_available => [gps_altitude],
            static_pressure_available => [static_pressure],
            pressure_altitude_available => [pressure_altitude],
            baro_altitude_available => [baro_altitude],
            total_energy_vario_available => [total_energy_vario],
            netto_vario_available => [netto_vario],
            external_wind_available => [external_wind],
            temperature_available => [temperature],
            humidity_available => [humidity],
            voltage_available => [voltage],
        }

        self.settings.complement( &other.settings);
        self.flarm.complement( &other.flarm);
    }

    pub fn has_time_advanced_since (&self, last: &NmeaInfo)->bool {
        self.time_available.is_valid() && last.time_available.is_valid() && self.time > last.time
    }

    #[inline] pub fn nav_altitude_available (&self)->bool { self.nav_altitude.is_some() }

    /// baro altitude if we have it, GPS altitude otherwise
    pub fn baro_altitude_preferred (&self)->Length {
        if self.baro_altitude_available.is_valid() { self.baro_altitude } else { self.gps_altitude }
    }

    pub fn any_altitude (&self)->Option<Length> {
        if self.baro_altitude_available.is_valid() { Some(self.baro_altitude) }
        else if self.gps_altitude_available.is_valid() { Some(self.gps_altitude) }
        else { None }
    }

    //--- provide_.. setters update the respective validity with the current `clock`

    pub fn provide_time (&mut self, time: f64) {
        self.time = time;
        self.time_available.update( self.clock);
    }

    pub fn provide_date_time (&mut self, dt: DateTime<Utc>) {
        self.time = dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 * 1e-9;
        self.date_time_utc = Some(dt);
        self.time_available.update( self.clock);
    }

    pub fn provide_location (&mut self, location: GeoPoint) {
        self.location = location;
        self.location_available.update( self.clock);
    }

    pub fn provide_track (&mut self, track: Angle) {
        self.track = track.as_bearing();
        self.track_available.update( self.clock);
    }

    pub fn provide_ground_speed (&mut self, speed: Velocity) {
        self.ground_speed = speed;
        self.ground_speed_available.update( self.clock);
    }

    pub fn provide_both_airspeeds (&mut self, ias: Velocity, tas: Velocity) {
        self.indicated_airspeed = ias;
        self.true_airspeed = tas;
        self.airspeed_available.update( self.clock);
        self.airspeed_real = true;
    }

    pub fn provide_true_airspeed (&mut self, tas: Velocity) {
        let ratio = air_density_ratio( self.baro_altitude_preferred());
        self.provide_both_airspeeds( tas / ratio, tas);
    }

    pub fn provide_indicated_airspeed (&mut self, ias: Velocity) {
        let ratio = air_density_ratio( self.baro_altitude_preferred());
        self.provide_both_airspeeds( ias, ias * ratio);
    }

    pub fn provide_gps_altitude (&mut self, alt: Length) {
        self.gps_altitude = alt;
        self.gps_altitude_available.update( self.clock);
    }

    pub fn provide_static_pressure (&mut self, p: AtmosphericPressure) {
        self.static_pressure = p;
        self.static_pressure_available.update( self.clock);
    }

    pub fn provide_pressure_altitude (&mut self, alt: Length) {
        self.pressure_altitude = alt;
        self.pressure_altitude_available.update( self.clock);
    }

    /// baro altitude that already is QNH corrected
    pub fn provide_baro_altitude_true (&mut self, alt: Length) {
        self.baro_altitude = alt;
        self.baro_altitude_available.update( self.clock);
    }

    pub fn provide_total_energy_vario (&mut self, v: Velocity) {
        self.total_energy_vario = v;
        self.total_energy_vario_available.update( self.clock);
    }

    pub fn provide_netto_vario (&mut self, v: Velocity) {
        self.netto_vario = v;
        self.netto_vario_available.update( self.clock);
    }

    pub fn provide_external_wind (&mut self, wind: SpeedVector) {
        self.external_wind = wind;
        self.external_wind_available.update( self.clock);
    }

    pub fn provide_temperature (&mut self, celsius: f64) {
        self.temperature = ThermodynamicTemperature::new::<degree_celsius>(celsius);
        self.temperature_available.update( self.clock);
    }

    pub fn provide_humidity (&mut self, percent: f64) {
        self.humidity = percent;
        self.humidity_available.update( self.clock);
    }

    pub fn provide_voltage (&mut self, volts: f64) {
        self.voltage = volts;
        self.voltage_available.update( self.clock);
    }

    pub fn provide_g_load (&mut self, g_load: f64) {
        self.acceleration.g_load = g_load;
        self.acceleration.available.update( self.clock);
        self.acceleration.real = true;
    }

    /// set a position without claiming it is valid (e.g. home location before we got a fix)
    pub fn set_fake_location (&mut self, location: GeoPoint, alt: Length) {
        self.location = location;
        self.location_available.clear();
        self.gps_altitude = alt;
        self.gps_altitude_available.clear();
    }
}

impl Default for NmeaInfo {
    fn default()->Self { NmeaInfo::new() }
}

/* #endregion NmeaInfo */
