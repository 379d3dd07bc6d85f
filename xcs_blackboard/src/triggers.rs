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
use tracing::warn;

/// notifications about edge transitions of the merged state. Implementations must not call back into
/// the blackboard
pub trait BlackboardTriggers: Send + Sync {
    /// a new GPS fix arrived (location timestamp changed) or the location expired
    fn gps_update (&self) {}

    /// a new total energy vario value arrived or the vario expired
    fn vario_update (&self) {}

    /// all sources stopped sending data
    fn connection_lost (&self) {}
}

pub struct NoTriggers;

impl BlackboardTriggers for NoTriggers {}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum BlackboardEvent {
    GpsUpdate,
    VarioUpdate,
    ConnectionLost,
}

/// forwards triggers as events to a channel. Events are dropped if the receiver does not keep up
pub struct ChannelTriggers {
    tx: kanal::Sender<BlackboardEvent>,
}

impl ChannelTriggers {
    pub fn new (tx: kanal::Sender<BlackboardEvent>)->Self { ChannelTriggers { tx } }

    fn post (&self, event: BlackboardEvent) {
        match self.tx.try_send( event) {
            Ok(true) => {}
            Ok(false) => warn!("event queue full, dropped {:?}", event),
            Err(e) => warn!("event queue closed, dropped {:?}: {}", event, e)
        }
    }
}

impl BlackboardTriggers for ChannelTriggers {
    fn gps_update (&self) { self.post( BlackboardEvent::GpsUpdate) }
    fn vario_update (&self) { self.post( BlackboardEvent::VarioUpdate) }
    fn connection_lost (&self) { self.post( BlackboardEvent::ConnectionLost) }
}

/// edge events collected while the blackboard state is updated, fired after the new state is published
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub struct PendingEvents {
    pub gps_update: bool,
    pub vario_update: bool,
    pub connection_lost: bool,
}

impl PendingEvents {
    pub fn is_empty (&self)->bool { !(self.gps_update || self.vario_update || self.connection_lost) }

    pub fn fire (&self, triggers: &dyn BlackboardTriggers) {
        if self.gps_update { triggers.gps_update() }
        if self.vario_update { triggers.vario_update() }
        if self.connection_lost { triggers.connection_lost() }
    }
}
