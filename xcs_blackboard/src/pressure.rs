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

//! ISA pressure/altitude conversions

use std::fmt;
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use uom::si::{f64::{Length,Pressure}, length::meter, pressure::hectopascal};
use xcs_common::units::meters;

const K1: f64 = 0.190263;
const K2: f64 = 8.417286e-5;
const INV_K1: f64 = 1.0 / K1;

pub const STANDARD_HPA: f64 = 1013.25;

/// sea level density of the standard atmosphere [kg/m³]
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225;

#[derive(Clone,Copy,PartialEq,PartialOrd)]
pub struct AtmosphericPressure(Pressure);

impl AtmosphericPressure {
    pub fn hectopascal (hpa: f64)->Self { AtmosphericPressure( Pressure::new::<hectopascal>(hpa)) }

    pub fn standard ()->Self { AtmosphericPressure::hectopascal( STANDARD_HPA) }

    pub fn from_pressure (p: Pressure)->Self { AtmosphericPressure(p) }

    #[inline] pub fn get_hectopascal (&self)->f64 { self.0.get::<hectopascal>() }
    #[inline] pub fn pressure (&self)->Pressure { self.0 }

    pub fn is_plausible (&self)->bool {
        let hpa = self.get_hectopascal();
        hpa > 100.0 && hpa < 1200.0
    }

    /// altitude over the QNH (self) reference for a given static pressure
    pub fn static_pressure_to_qnh_altitude (&self, ps: AtmosphericPressure)->Length {
        meters( (self.get_hectopascal().powf(K1) - ps.get_hectopascal().powf(K1)) / K2)
    }

    /// static pressure at a given altitude over the QNH (self) reference
    pub fn qnh_altitude_to_static_pressure (&self, alt: Length)->AtmosphericPressure {
        let x = self.get_hectopascal().powf(K1) - K2 * alt.get::<meter>();
        AtmosphericPressure::hectopascal( x.max(0.0).powf(INV_K1))
    }

    pub fn pressure_altitude_to_static_pressure (alt: Length)->AtmosphericPressure {
        AtmosphericPressure::standard().qnh_altitude_to_static_pressure(alt)
    }

    pub fn static_pressure_to_pressure_altitude (ps: AtmosphericPressure)->Length {
        AtmosphericPressure::standard().static_pressure_to_qnh_altitude(ps)
    }

    pub fn qnh_altitude_to_pressure_altitude (&self, alt: Length)->Length {
        AtmosphericPressure::static_pressure_to_pressure_altitude( self.qnh_altitude_to_static_pressure(alt))
    }

    pub fn pressure_altitude_to_qnh_altitude (&self, alt: Length)->Length {
        self.static_pressure_to_qnh_altitude( AtmosphericPressure::pressure_altitude_to_static_pressure(alt))
    }

    /// the QNH that yields `alt_known` for static pressure `ps`
    pub fn find_qnh_from_pressure (ps: AtmosphericPressure, alt_known: Length)->AtmosphericPressure {
        let x = ps.get_hectopascal().powf(K1) + K2 * alt_known.get::<meter>();
        AtmosphericPressure::hectopascal( x.powf(INV_K1))
    }
}

/// ISA air density [kg/m³] at the given altitude
pub fn air_density (alt: Length)->f64 {
    ((44330.8 - alt.get::<meter>()) / 42266.5).max(0.0).powf( 1.0 / 0.234969)
}

/// true airspeed over indicated airspeed at the given altitude
pub fn air_density_ratio (alt: Length)->f64 {
    let rho = air_density(alt);
    if rho > 0.0 { (ISA_SEA_LEVEL_DENSITY / rho).sqrt() } else { 1.0 }
}

impl Default for AtmosphericPressure {
    fn default()->Self { AtmosphericPressure::standard() }
}

impl fmt::Display for AtmosphericPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:.2}hPa", self.get_hectopascal()) }
}

impl fmt::Debug for AtmosphericPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AtmosphericPressure({}hPa)", self.get_hectopascal()) }
}

// config files and snapshots use hPa
impl Serialize for AtmosphericPressure {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64( self.get_hectopascal())
    }
}

impl<'de> Deserialize<'de> for AtmosphericPressure {
    fn deserialize<D>(deserializer: D) -> Result<AtmosphericPressure, D::Error> where D: Deserializer<'de> {
        let hpa = f64::deserialize(deserializer)?;
        Ok( AtmosphericPressure::hectopascal(hpa))
    }
}
