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

use std::{sync::{Arc,Mutex,RwLock}, thread::{self,JoinHandle}, time::{Duration,Instant}};
use kanal::{Sender,Receiver,ReceiveErrorTimeout};
use serde::Serialize;
use tracing::{debug,info,warn};
use uom::si::f64::{Length,Velocity};
use xcs_common::{angle::Angle, geo::GeoPoint};

use crate::{
    errors::{Result,XcsBlackboardError,send_error},
    config::{BlackboardConfig,ComputerSettings},
    blackboard::{DeviceBlackboard,DataSource}, nmea_info::NmeaInfo, derived::DerivedInfo,
    pressure::AtmosphericPressure,
};

/// everything that can change the blackboard
pub enum BlackboardMsg {
    DeviceData { device: usize, data: Box<NmeaInfo> },
    SetLocation { location: GeoPoint, speed: Velocity, bearing: Angle, alt: Length, baro_alt: Length, time: f64 },
    StopReplay,
    SetStartupLocation { location: GeoPoint, alt: Length },
    InitSimulator { location: GeoPoint, alt: Length },
    SetSpeed(Velocity),
    SetAltitude(Length),
    SetTrackBearing(Angle),
    SetQnh(AtmosphericPressure),
    SetMc(Velocity),
    Calculated(Box<DerivedInfo>),
    Settings(ComputerSettings),
    ProcessSimulation,
    Tick,
    ExpireWallClock(Option<Sender<bool>>), // optional reply: connection lost
    Terminate,
}

/// immutable copy of the blackboard state as seen by readers
#[derive(Clone,Debug,Serialize)]
pub struct BlackboardSnapshot {
    pub seq: u64,
    pub source: DataSource,
    pub basic: NmeaInfo,
    pub calculated: DerivedInfo,
    pub real: NmeaInfo,
}

impl BlackboardSnapshot {
    fn new (bb: &DeviceBlackboard, seq: u64)->Self {
        BlackboardSnapshot {
            seq,
            source: bb.source(),
            basic: bb.basic().clone(),
            calculated: bb.calculated().clone(),
            real: bb.real_state().clone(),
        }
    }
}

/* #region actor **********************************************************************************/

/// owns the `DeviceBlackboard` on a dedicated thread. This is the only writer, all other threads
/// send messages and read published snapshots
pub struct BlackboardActor {
    bb: DeviceBlackboard,
    rx: Receiver<BlackboardMsg>,
    snapshot: Arc<RwLock<BlackboardSnapshot>>,
    seq: u64,
    tick_interval: Duration,
    expire_interval: Duration,
}

impl BlackboardActor {
    pub fn spawn (bb: DeviceBlackboard, config: &BlackboardConfig)->Result<BlackboardHandle> {
        let (tx,rx) = kanal::bounded( config.channel_capacity.max(1));
        let snapshot = Arc::new( RwLock::new( BlackboardSnapshot::new( &bb, 0)));

        let actor = BlackboardActor {
            bb,
            rx,
            snapshot: snapshot.clone(),
            seq: 0,
            tick_interval: config.tick_interval,
            expire_interval: config.expire_interval,
        };

        let join = thread::Builder::new().name( "blackboard".to_string()).spawn( move || actor.run())?;

        Ok( BlackboardHandle { tx, snapshot, join: Arc::new( Mutex::new( Some(join))) } )
    }

    fn run (mut self) {
        info!("blackboard actor started");
        let mut next_tick = Instant::now() + self.tick_interval;
        let mut next_expire = Instant::now() + self.expire_interval;

        loop {
            let timeout = next_tick.saturating_duration_since( Instant::now());
            let mut reply = None;

            match self.rx.recv_timeout( timeout) {
                Ok(BlackboardMsg::Terminate) => break,
                Ok(msg) => reply = self.handle( msg),
                Err(ReceiveErrorTimeout::Timeout) => {}
                Err(e) => {
                    warn!("blackboard channel closed: {}", e);
                    break
                }
            }

            let now = Instant::now();
            if now >= next_tick {
                self.bb.tick();
                next_tick = now + self.tick_interval;
            }
            if now >= next_expire {
                self.bb.expire_wall_clock();
                next_expire = now + self.expire_interval;
            }

            self.publish();
            self.bb.fire_pending_triggers();

            if let Some((tx,lost)) = reply {
                if let Err(e) = tx.send( lost) { debug!("expire reply not delivered: {}", e) }
            }
        }

        info!("blackboard actor terminated");
    }

    fn handle (&mut self, msg: BlackboardMsg)->Option<(Sender<bool>,bool)> {
        use BlackboardMsg::*;
        let bb = &mut self.bb;

        match msg {
            DeviceData { device, data } => {
                if let Err(e) = bb.set_device_data( device, *data) { warn!("rejected device data: {}", e) }
            }
            SetLocation { location, speed, bearing, alt, baro_alt, time } => bb.set_location( location, speed, bearing, alt, baro_alt, time),
            StopReplay => bb.stop_replay(),
            SetStartupLocation { location, alt } => bb.set_startup_location( location, alt),
            InitSimulator { location, alt } => bb.init_simulator( location, alt),
            SetSpeed(v) => bb.set_speed(v),
            SetAltitude(alt) => bb.set_altitude(alt),
            SetTrackBearing(track) => bb.set_track_bearing(track),
            SetQnh(qnh) => bb.set_qnh(qnh),
            SetMc(mc) => bb.set_mc(mc),
            Calculated(calculated) => bb.set_calculated( *calculated),
            Settings(settings) => bb.set_settings( settings),
            ProcessSimulation => bb.process_simulation(),
            Tick => bb.tick(),
            ExpireWallClock(reply) => {
                let lost = bb.expire_wall_clock();
                return reply.map( |tx| (tx,lost))
            }
            Terminate => {} // handled by run loop
        }
        None
    }

    fn publish (&mut self) {
        self.seq += 1;
        let snapshot = BlackboardSnapshot::new( &self.bb, self.seq);
        let mut lock = self.snapshot.write().unwrap_or_else( |e| e.into_inner());
        *lock = snapshot;
    }
}

/* #endregion actor */

/* #region handle *********************************************************************************/

/// cloneable access to a running `BlackboardActor`
#[derive(Clone)]
pub struct BlackboardHandle {
    tx: Sender<BlackboardMsg>,
    snapshot: Arc<RwLock<BlackboardSnapshot>>,
    join: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl BlackboardHandle {
    /// blocks if the actor queue is full
    pub fn send (&self, msg: BlackboardMsg)->Result<()> {
        self.tx.send( msg).map_err( send_error)
    }

    /// returns false if the actor queue is full
    pub fn try_send (&self, msg: BlackboardMsg)->Result<bool> {
        self.tx.try_send( msg).map_err( send_error)
    }

    pub fn sender (&self)->Sender<BlackboardMsg> { self.tx.clone() }

    /// execute closure with the last published snapshot
    pub fn read<F,R> (&self, f: F)->R where F: FnOnce(&BlackboardSnapshot)->R {
        let lock = self.snapshot.read().unwrap_or_else( |e| e.into_inner());
        f(&lock)
    }

    pub fn snapshot (&self)->BlackboardSnapshot { self.read( |s| s.clone()) }

    /// request wall clock expiration and wait for the result. All messages sent before are processed
    /// and published when this returns
    pub fn expire_wall_clock (&self)->Result<bool> {
        let (tx,rx) = kanal::bounded(1);
        self.send( BlackboardMsg::ExpireWallClock( Some(tx)))?;
        rx.recv().map_err( send_error)
    }

    /// stop the actor and wait for its thread to finish
    pub fn terminate (&self)->Result<()> {
        let join = self.join.lock().unwrap_or_else( |e| e.into_inner()).take();
        if let Some(join) = join {
            self.send( BlackboardMsg::Terminate)?;
            join.join().map_err( |_| XcsBlackboardError::ThreadError( "blackboard thread panicked".to_string()))?;
        }
        Ok(())
    }
}

/* #endregion handle */
