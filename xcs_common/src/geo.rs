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

use std::fmt;
use serde::{Serialize,Deserialize};
use serde::ser::{Serializer, SerializeStruct};
use geo::{Bearing, Destination, Distance, Haversine};
use geo_types::Point;
use uom::si::{f64::Length, length::meter};

use crate::angle::{Angle, normalize_180};

/* #region GeoPoint ***********************************************************************************************/

/// geographic lon/lat position in degrees. Distances and bearings are spherical (haversine)
#[derive(Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64)->Self {
        GeoPoint( Point::new( normalize_180(lon), lat.clamp(-90.0, 90.0)))
    }

    pub fn from_lon_lat (lon: Angle, lat: Angle)->Self {
        GeoPoint::from_lon_lat_degrees( lon.degrees(), lat.degrees())
    }

    #[inline] pub fn longitude (&self)->Angle { Angle::from_degrees( self.0.x()) }
    #[inline] pub fn latitude (&self)->Angle { Angle::from_degrees( self.0.y()) }

    #[inline] pub fn lon_degrees (&self)->f64 { self.0.x() }
    #[inline] pub fn lat_degrees (&self)->f64 { self.0.y() }

    pub fn point (&self)->&Point { &self.0 }

    pub fn is_valid (&self)->bool {
        self.0.x().is_finite() && self.0.y().is_finite()
    }

    pub fn distance (&self, other: &GeoPoint)->Length {
        Length::new::<meter>( Haversine.distance( self.0, other.0))
    }

    /// initial great circle bearing towards `other`
    pub fn bearing (&self, other: &GeoPoint)->Angle {
        Angle::from_degrees( Haversine.bearing( self.0, other.0)).as_bearing()
    }

    pub fn distance_bearing (&self, other: &GeoPoint)->GeoVector {
        GeoVector { distance: self.distance(other), bearing: self.bearing(other) }
    }

    pub fn destination (&self, bearing: Angle, distance: Length)->GeoPoint {
        let p = Haversine.destination( self.0, bearing.as_bearing().degrees(), distance.get::<meter>());
        GeoPoint::from_lon_lat_degrees( p.x(), p.y())
    }

    /// plain degree offset without any projection
    pub fn offset_degrees (&self, dlon: f64, dlat: f64)->GeoPoint {
        GeoPoint::from_lon_lat_degrees( self.0.x() + dlon, self.0.y() + dlat)
    }
}

impl Default for GeoPoint {
    fn default()->Self { GeoPoint( Point::new( 0.0, 0.0)) }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "[{:.5},{:.5}]", self.0.x(), self.0.y())
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "GeoPoint(lon:{},lat:{})", self.0.x(), self.0.y())
    }
}

impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lon", &self.0.x())?;
        state.serialize_field("lat", &self.0.y())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct LonLat { lon: f64, lat: f64 }

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<GeoPoint, D::Error> where D: serde::Deserializer<'de> {
        let ll = LonLat::deserialize(deserializer)?;
        Ok( GeoPoint::from_lon_lat_degrees( ll.lon, ll.lat))
    }
}

/* #endregion GeoPoint */

/// distance and initial bearing between two points
#[derive(Clone,Copy,Debug,PartialEq,Serialize,Deserialize)]
pub struct GeoVector {
    pub distance: Length,
    pub bearing: Angle,
}

impl GeoVector {
    pub fn new (distance: Length, bearing: Angle)->Self { GeoVector { distance, bearing } }

    pub fn end_point (&self, start: &GeoPoint)->GeoPoint {
        start.destination( self.bearing, self.distance)
    }
}
