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

use std::{sync::Arc, fmt};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};
use uom::si::f64::{Length,Velocity};
use xcs_common::{angle::Angle, clock::Clock, geo::GeoPoint, units::{meters, meters_per_second, to_meters, to_meters_per_second}};
use xcs_stats::FlightStatistics;

use crate::{
    errors::{Result,XcsBlackboardError},
    config::{BlackboardConfig,ComputerSettings},
    validity::Validity, nmea_info::NmeaInfo, derived::{DerivedInfo,PhaseChange}, basic_computer::BasicComputer, simulator::Simulator,
    flarm::{FlarmNameResolver,FlarmNameMap}, flarm_calculations::FlarmCalculations,
    pressure::AtmosphericPressure, triggers::{BlackboardTriggers,NoTriggers,PendingEvents},
};

/// perturbation used to get the local meters-per-degree scale for FLARM positions
const FLARM_SCALE_DELTA: f64 = 0.01; // [deg]

/// perturbation distances below this are degenerate (poles) and give a zero scale
const FLARM_MIN_SCALE_DISTANCE: f64 = 1.0; // [m]

/// which snapshot is used as the merged state
#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum DataSource {
    Real,
    Simulator,
    Replay,
}

/// merges the snapshots of all devices, the simulator and replay into one authoritative state (`basic`)
/// and keeps the state derived from it (`calculated`) current.
///
/// The blackboard itself is not synchronized. It is meant to be owned by a single thread (see
/// `actor::BlackboardActor`) that serializes all mutations
pub struct DeviceBlackboard {
    clock: Arc<dyn Clock>,
    triggers: Arc<dyn BlackboardTriggers>,
    name_resolver: Arc<dyn FlarmNameResolver>,
    flight_statistics: Arc<FlightStatistics>,
    flarm_calculations: FlarmCalculations,
    flarm_max_age: f64,

    per_device_data: Vec<NmeaInfo>,
    real_data: NmeaInfo,
    simulator_data: NmeaInfo,
    replay_data: NmeaInfo,

    gps_info: NmeaInfo,
    state_last: NmeaInfo,
    calculated: DerivedInfo,
    settings: ComputerSettings,

    source: DataSource,
    startup: Option<(GeoPoint,Length)>,

    // for edge detection
    last_location_available: Validity,
    last_vario_available: Validity,
    pending: PendingEvents,
}

impl DeviceBlackboard {

    pub fn new (config: &BlackboardConfig, clock: Arc<dyn Clock>)->Self {
        let name_resolver = Arc::new( FlarmNameMap::new( config.flarm_names.clone()));
        let startup = config.startup_location.map( |loc| (loc, config.startup_altitude));

        let mut bb = DeviceBlackboard {
            clock,
            triggers: Arc::new(NoTriggers),
            name_resolver,
            flight_statistics: Arc::new( FlightStatistics::new()),
            flarm_calculations: FlarmCalculations::new( config.flarm_max_tracked),
            flarm_max_age: config.flarm_max_age.as_secs_f64(),
            per_device_data: vec![ NmeaInfo::new(); config.num_devices.max(1)],
            real_data: NmeaInfo::new(),
            simulator_data: NmeaInfo::new(),
            replay_data: NmeaInfo::new(),
            gps_info: NmeaInfo::new(),
            state_last: NmeaInfo::new(),
            calculated: DerivedInfo::new(),
            settings: config.computer.clone(),
            source: DataSource::Real,
            startup,
            last_location_available: Validity::invalid(),
            last_vario_available: Validity::invalid(),
            pending: PendingEvents::default(),
        };
        bb.merge();
        bb
    }

    pub fn with_triggers (mut self, triggers: Arc<dyn BlackboardTriggers>)->Self {
        self.triggers = triggers;
        self
    }

    pub fn with_name_resolver (mut self, name_resolver: Arc<dyn FlarmNameResolver>)->Self {
        self.name_resolver = name_resolver;
        self
    }

    pub fn with_flight_statistics (mut self, flight_statistics: Arc<FlightStatistics>)->Self {
        self.flight_statistics = flight_statistics;
        self
    }

    /* #region accessors ************************************************************************/

    /// the merged state
    #[inline] pub fn basic (&self)->&NmeaInfo { &self.gps_info }

    #[inline] pub fn calculated (&self)->&DerivedInfo { &self.calculated }

    /// merged state of all physical devices
    #[inline] pub fn real_state (&self)->&NmeaInfo { &self.real_data }

    #[inline] pub fn last_basic (&self)->&NmeaInfo { &self.state_last }

    #[inline] pub fn simulator_state (&self)->&NmeaInfo { &self.simulator_data }

    #[inline] pub fn replay_state (&self)->&NmeaInfo { &self.replay_data }

    #[inline] pub fn source (&self)->DataSource { self.source }

    #[inline] pub fn num_devices (&self)->usize { self.per_device_data.len() }

    pub fn device_state (&self, i: usize)->Option<&NmeaInfo> { self.per_device_data.get(i) }

    /// direct write access for a device driver. Changes become visible with the next `merge()`
    pub fn real_state_mut (&mut self, i: usize)->Result<&mut NmeaInfo> {
        self.per_device_data.get_mut(i).ok_or( XcsBlackboardError::InvalidDevice(i))
    }

    #[inline] pub fn settings (&self)->&ComputerSettings { &self.settings }

    pub fn set_settings (&mut self, settings: ComputerSettings) {
        self.settings = settings;
        self.merge();
    }

    /// take over derived state computed elsewhere
    pub fn set_calculated (&mut self, calculated: DerivedInfo) {
        self.calculated = calculated;
    }

    pub fn flight_statistics (&self)->Arc<FlightStatistics> { self.flight_statistics.clone() }

    pub fn flarm_calculations (&self)->&FlarmCalculations { &self.flarm_calculations }

    #[inline] pub fn now (&self)->f64 { self.clock.now() }

    /* #endregion accessors */

    /* #region merge ****************************************************************************/

    /// replace the snapshot of device `i` and re-merge
    pub fn set_device_data (&mut self, i: usize, info: NmeaInfo)->Result<()> {
        *self.real_state_mut(i)? = info;
        self.merge();
        Ok(())
    }

    /// rebuild the merged state from scratch: devices are complemented in slot order into `real_data`,
    /// then replay, simulator or real data is selected (in this priority) and completed by `BasicComputer::fill`
    pub fn merge (&mut self) {
        let now = self.clock.now();

        self.real_data.reset();
        self.real_data.update_clock( now);
        for dev in self.per_device_data.iter_mut() {
            if !dev.alive.is_valid() { continue }

            dev.update_clock( now);
            dev.expire();
            self.real_data.complement( dev);
        }

        if !self.real_data.location_available.is_valid() {
            if let Some((loc,alt)) = self.startup {
                self.real_data.set_fake_location( loc, alt);
            }
        }

        let source = if self.replay_data.alive.is_valid() {
            self.replay_data.expire();
            self.gps_info = self.replay_data.clone();
            DataSource::Replay

        } else if self.simulator_data.alive.is_valid() {
            self.simulator_data.update_clock( now);
            self.simulator_data.expire();
            self.gps_info = self.simulator_data.clone();
            DataSource::Simulator

        } else {
            self.gps_info = self.real_data.clone();
            DataSource::Real
        };

        // traffic is real even if our own position is simulated or replayed
        if source != DataSource::Real {
            self.gps_info.flarm.complement( &self.real_data.flarm);
        }

        if source != self.source {
            info!("data source changed from {:?} to {:?}", self.source, source);
            self.source = source;
        }

        BasicComputer::fill( &mut self.gps_info, &self.settings);
        self.check_edges();
    }

    fn check_edges (&mut self) {
        if self.gps_info.location_available != self.last_location_available {
            self.last_location_available = self.gps_info.location_available;
            self.pending.gps_update = true;
        }
        if self.gps_info.total_energy_vario_available != self.last_vario_available {
            self.last_vario_available = self.gps_info.total_energy_vario_available;
            self.pending.vario_update = true;
        }
    }

    /// events collected since the last call
    pub fn take_pending_events (&mut self)->PendingEvents {
        std::mem::take( &mut self.pending)
    }

    pub fn fire_pending_triggers (&mut self) {
        let pending = self.take_pending_events();
        pending.fire( self.triggers.as_ref());
    }

    /// expire all sources against the wall clock and re-merge. Returns true if we just lost the connection
    pub fn expire_wall_clock (&mut self)->bool {
        let now = self.clock.now();
        let was_connected = self.gps_info.connected();

        for dev in self.per_device_data.iter_mut() {
            dev.expire_wall_clock( now);
        }
        self.replay_data.expire_wall_clock( now);
        self.simulator_data.expire_wall_clock( now);

        self.merge();

        let lost = was_connected && !self.gps_info.connected();
        if lost {
            warn!("connection lost");
            self.pending.connection_lost = true;
        }
        lost
    }

    /* #endregion merge */

    /* #region simulator and replay *************************************************************/

    /// replay of a recorded position
    pub fn set_location (&mut self, location: GeoPoint, speed: Velocity, bearing: Angle, alt: Length, baro_alt: Length, t: f64) {
        let now = self.clock.now();
        let basic = &mut self.replay_data;

        basic.update_clock( now);
        basic.alive.update( now);
        basic.gps.replay = true;
        basic.gps.simulator = false;

        basic.provide_location( location);
        basic.provide_ground_speed( speed);
        basic.airspeed_available.clear();
        basic.provide_track( bearing);
        basic.provide_gps_altitude( alt);
        basic.provide_pressure_altitude( baro_alt);
        basic.provide_baro_altitude_true( baro_alt);
        basic.provide_time( t);

        self.merge();
    }

    pub fn stop_replay (&mut self) {
        if self.replay_data.alive.is_valid() {
            info!("replay stopped");
        }
        self.replay_data.reset();
        self.merge();
    }

    /// location to assume while no source has a fix. Ignored while flying
    pub fn set_startup_location (&mut self, location: GeoPoint, alt: Length) {
        if self.calculated.flying { return }

        self.startup = Some((location, alt));
        for dev in self.per_device_data.iter_mut() {
            if !dev.location_available.is_valid() {
                dev.set_fake_location( location, alt);
            }
        }
        if !self.simulator_data.location_available.is_valid() {
            self.simulator_data.set_fake_location( location, alt);
        }

        self.merge();
    }

    /// put the simulator at `location`. The simulator becomes active with the next `process_simulation()`
    pub fn init_simulator (&mut self, location: GeoPoint, alt: Length) {
        Simulator::init( &mut self.simulator_data, location, alt);
        info!("simulator initialized at {}", location);
    }

    pub fn process_simulation (&mut self) {
        if !self.simulator_data.gps.simulator {
            debug!("ignoring simulation step, simulator not initialized");
            return
        }
        Simulator::process( &mut self.simulator_data, self.clock.now());
        self.merge();
    }

    fn touch_simulator (&mut self) {
        let now = self.clock.now();
        Simulator::touch( &mut self.simulator_data, now);
    }

    /// ground speed and airspeed of the simulator
    pub fn set_speed (&mut self, speed: Velocity) {
        self.touch_simulator();
        let basic = &mut self.simulator_data;
        basic.ground_speed = speed;
        basic.provide_both_airspeeds( speed, speed);
        self.merge();
    }

    pub fn set_track_bearing (&mut self, track: Angle) {
        self.touch_simulator();
        self.simulator_data.track = track.as_bearing();
        self.merge();
    }

    /// GPS and baro altitude of the simulator
    pub fn set_altitude (&mut self, alt: Length) {
        self.touch_simulator();
        let basic = &mut self.simulator_data;
        basic.gps_altitude = alt;
        basic.provide_baro_altitude_true( alt);
        self.merge();
    }

    pub fn set_qnh (&mut self, qnh: AtmosphericPressure) {
        let now = self.clock.now();
        self.settings.qnh = Some(qnh);
        self.simulator_data.settings.provide_qnh( qnh, now);
        self.merge();
    }

    pub fn set_mc (&mut self, mc: Velocity) {
        let now = self.clock.now();
        self.settings.mac_cready = mc;
        self.simulator_data.settings.provide_mac_cready( mc, now);
        self.merge();
    }

    /* #endregion simulator and replay */

    /* #region tick *****************************************************************************/

    /// periodic update of derived data. Rates of change are only computed if GPS time advanced
    pub fn tick (&mut self) {
        let now = self.clock.now();
        self.gps_info.update_clock( now);
        self.gps_info.expire();

        self.process_flarm();

        if self.gps_info.time != self.state_last.time || self.gps_info.time_available.is_valid() != self.state_last.time_available.is_valid() {
            if self.gps_info.has_time_advanced_since( &self.state_last) {
                BasicComputer::compute( &mut self.gps_info, &self.state_last, &self.calculated, &self.settings);
                let changes = self.calculated.update( &self.gps_info, &self.state_last, &self.settings);
                self.update_flight_statistics( &changes);

                let n = self.flarm_calculations.cleanup( self.gps_info.time, self.flarm_max_age);
                if n > 0 { debug!("dropped {} stale FLARM climb averages", n) }
            }
            self.state_last = self.gps_info.clone();
        }
    }

    /// resolve names and turn relative FLARM positions into absolute ones. Motion values the device
    /// did not report are estimated from the previous snapshot
    pub fn process_flarm (&mut self) {
        let basic = &mut self.gps_info;
        if basic.flarm.traffic.is_empty() { return }

        let own_location = basic.location_available.is_valid().then_some( basic.location);
        let own_altitude = basic.gps_altitude_available.is_valid().then_some( basic.gps_altitude);
        let time = basic.time;

        // local degrees per meter
        let (north_scale, east_scale) = match own_location {
            Some(loc) => {
                let dn = to_meters( loc.distance( &loc.offset_degrees( 0.0, FLARM_SCALE_DELTA)));
                let de = to_meters( loc.distance( &loc.offset_degrees( FLARM_SCALE_DELTA, 0.0)));
                (flarm_scale( dn), flarm_scale( de))
            }
            None => (0.0, 0.0)
        };

        for traffic in basic.flarm.traffic.iter_mut() {
            if !traffic.has_name() {
                traffic.name = self.name_resolver.lookup( traffic.id).map( String::from);
            }

            let north = to_meters( traffic.relative_north);
            let east = to_meters( traffic.relative_east);
            traffic.distance = meters( north.hypot( east));

            if let Some(loc) = own_location {
                traffic.location = loc.offset_degrees( east * east_scale, north * north_scale);
                traffic.location_available = true;
            } else {
                traffic.location_available = false;
            }

            if let Some(alt) = own_altitude {
                traffic.altitude = traffic.relative_altitude + alt;
                traffic.altitude_available = true;
                let avg = self.flarm_calculations.average_30s( traffic.id, time, to_meters( traffic.altitude));
                traffic.climb_rate_avg30s = meters_per_second( avg);
                traffic.climb_rate_avg30s_available = true;
            } else {
                traffic.altitude_available = false;
                traffic.climb_rate_avg30s_available = false;
            }

            if !traffic.is_motion_incomplete() { continue }
            let Some(last) = self.state_last.flarm.find_traffic( traffic.id) else { continue };

            match traffic.valid.time_difference( &last.valid) {
                Some(dt) if dt > 0.0 => {
                    if !traffic.climb_rate_received && traffic.altitude_available && last.altitude_available {
                        traffic.climb_rate = meters_per_second( to_meters( traffic.altitude - last.altitude) / dt);
                    }
                    if !traffic.track_received && traffic.location_available && last.location_available {
                        traffic.track = last.location.bearing( &traffic.location);
                    }
                    if !traffic.turn_rate_received {
                        traffic.turn_rate = (traffic.track - last.track).as_delta().degrees() / dt;
                    }
                    if !traffic.speed_received && traffic.location_available && last.location_available {
                        traffic.speed = meters_per_second( to_meters( last.location.distance( &traffic.location)) / dt);
                    }
                }
                _ => { // same report as before, keep what we estimated last time
                    if !traffic.climb_rate_received { traffic.climb_rate = last.climb_rate }
                    if !traffic.track_received { traffic.track = last.track }
                    if !traffic.turn_rate_received { traffic.turn_rate = last.turn_rate }
                    if !traffic.speed_received { traffic.speed = last.speed }
                }
            }
        }
    }

    fn update_flight_statistics (&mut self, changes: &[PhaseChange]) {
        let basic = &self.gps_info;
        let stats = &self.flight_statistics;
        let alt = basic.nav_altitude.map( to_meters);

        for change in changes {
            match change {
                PhaseChange::Takeoff => stats.reset(),
                PhaseChange::CirclingStart => {
                    if let (Some(tflight), Some(alt)) = (self.calculated.flight_time( basic.time), alt) {
                        stats.add_climb_base( tflight, alt);
                    }
                }
                PhaseChange::CirclingEnd => {
                    if let Some(start) = self.calculated.climb_start.take() {
                        if let (Some(t0), Some(t1), Some(alt)) = (self.calculated.flight_time( start.time), self.calculated.flight_time( basic.time), alt) {
                            stats.add_climb_ceiling( t1, alt);
                            if t1 > t0 {
                                stats.add_thermal_average( t0, t1, (alt - start.altitude) / (t1 - t0));
                            }
                        }
                    }
                }
                PhaseChange::Landing => {}
            }
        }

        if !self.calculated.flying { return }
        if let Some(tflight) = self.calculated.flight_time( basic.time) {
            if let Some(alt) = alt {
                stats.add_altitude( tflight, alt, false);
            }
            if basic.brutto_vario_available.is_valid() {
                stats.add_climb_rate( tflight, to_meters_per_second( basic.brutto_vario), self.calculated.circling);
            }
        }
    }

    /* #endregion tick */
}

impl fmt::Debug for DeviceBlackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceBlackboard")
            .field("source", &self.source)
            .field("num_devices", &self.per_device_data.len())
            .field("connected", &self.gps_info.connected())
            .finish()
    }
}

fn flarm_scale (d: f64)->f64 {
    if d.is_finite() && d >= FLARM_MIN_SCALE_DISTANCE { FLARM_SCALE_DELTA / d } else { 0.0 }
}
