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

//! run the blackboard actor with the simulator and a synthetic FLARM device, printing periodic JSON
//! summaries of the merged state

use std::{sync::{Arc,atomic::{AtomicBool,Ordering}}, thread, time::Duration};
use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::{info,Level};
use uom::si::f64::Length;
use xcs_common::{
    angle::Angle, clock::{Clock,MonotonicClock,secs}, geo::GeoPoint,
    units::{meters, kilometers_per_hour, to_meters, to_meters_per_second}
};
use xcs_blackboard::{
    load_config, BlackboardConfig, BlackboardActor, BlackboardMsg, BlackboardSnapshot, NmeaInfo, DeviceBlackboard,
    flarm::{FlarmId,FlarmTraffic}, triggers::{BlackboardEvent,ChannelTriggers}
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "simulate a flight and feed it through the device blackboard")]
pub struct Args {
    /// RON config file (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<String>,

    /// simulation duration in seconds
    #[arg(short,long, default_value_t = 60)]
    pub duration: u64,

    /// number of device slots (overrides config)
    #[arg(long)]
    pub devices: Option<usize>,

    /// enable debug output
    #[arg(short,long)]
    pub verbose: bool,
}

const FLARM_DEVICE: usize = 0;

fn main()->Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt().with_max_level( Level::DEBUG).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let mut config = match &args.config {
        Some(path) => load_config( path)?,
        None => BlackboardConfig::default()
    };
    if let Some(n) = args.devices { config.num_devices = n }
    config.check()?;

    let startup = config.startup_location.unwrap_or( GeoPoint::from_lon_lat_degrees( -121.7, 37.3));
    let clock: Arc<dyn Clock> = Arc::new( MonotonicClock::new());

    let (event_tx, event_rx) = kanal::bounded::<BlackboardEvent>(64);
    let bb = DeviceBlackboard::new( &config, clock.clone()).with_triggers( Arc::new( ChannelTriggers::new( event_tx)));
    let flight_statistics = bb.flight_statistics();
    let handle = BlackboardActor::spawn( bb, &config)?;

    handle.send( BlackboardMsg::InitSimulator { location: startup, alt: config.startup_altitude })?;
    handle.send( BlackboardMsg::SetAltitude( meters(1200.0)))?;
    handle.send( BlackboardMsg::SetSpeed( kilometers_per_hour(110.0)))?;
    handle.send( BlackboardMsg::SetTrackBearing( Angle::from_degrees(90.0)))?;

    let running = Arc::new( AtomicBool::new(true));
    let flarm_device = spawn_flarm_device( handle.sender(), clock.clone(), running.clone());

    for i in 0..args.duration {
        // fly a 20 sec circle every minute
        let track = if (i % 60) < 20 { Angle::from_degrees( 90.0 + (i % 60) as f64 * 18.0) } else { Angle::from_degrees(90.0) };
        handle.send( BlackboardMsg::SetTrackBearing( track))?;
        handle.send( BlackboardMsg::ProcessSimulation)?;
        thread::sleep( secs(1));

        while let Ok(Some(event)) = event_rx.try_recv() {
            info!("event: {:?}", event);
        }

        if i % 5 == 0 {
            println!("{}", handle.read( summary));
        }
    }

    running.store( false, Ordering::Relaxed);
    if flarm_device.join().is_err() { info!("FLARM device thread panicked") }
    handle.terminate()?;

    if let Some(baro) = flight_statistics.barograph_summary() {
        println!("{}", json!({ "barograph": baro }));
    }
    Ok(())
}

fn summary (s: &BlackboardSnapshot)->String {
    let basic = &s.basic;
    let traffic: Vec<_> = basic.flarm.traffic.iter().map( |t| json!({
        "id": t.id.to_string(),
        "name": t.name,
        "distance": to_meters( t.distance).round(),
        "climb_avg30s": to_meters_per_second( t.climb_rate_avg30s),
    })).collect();

    json!({
        "seq": s.seq,
        "source": s.source,
        "connected": basic.connected(),
        "time": basic.time,
        "location": basic.location_available.is_valid().then_some( basic.location),
        "nav_altitude": basic.nav_altitude.map( to_meters),
        "track": basic.track.degrees().round(),
        "flying": s.calculated.flying,
        "circling": s.calculated.circling,
        "turn_rate": s.calculated.turn_rate,
        "traffic": traffic,
    }).to_string()
}

/// a FLARM that reports one glider circling 500m north of us
fn spawn_flarm_device (tx: kanal::Sender<BlackboardMsg>, clock: Arc<dyn Clock>, running: Arc<AtomicBool>)->thread::JoinHandle<()> {
    thread::spawn( move || {
        let id = FlarmId::new( 0xDD8F12);
        let mut i = 0;

        while running.load( Ordering::Relaxed) {
            let now = clock.now();
            let a = i as f64 * 0.3;

            let mut info = NmeaInfo::new();
            info.update_clock( now);
            info.alive.update( now);
            info.flarm.available.update( now);
            info.flarm.add_traffic( FlarmTraffic::with_relative_position( id, meters( 500.0 + 100.0 * a.cos()), meters( 100.0 * a.sin()), meters( 50.0 + i as f64), now));

            if tx.send( BlackboardMsg::DeviceData { device: FLARM_DEVICE, data: Box::new(info) }).is_err() { break }
            i += 1;
            thread::sleep( secs(1));
        }
    })
}
