//! CCSDS Orbit Ephemeris Message (XML flavour) as published for the ISS.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ephemeris::{
    RawStateVector, Series, StateRecord, DEFAULT_POSITION_UNITS, DEFAULT_VELOCITY_UNITS,
};

use super::error::FeedError;

#[derive(Debug, Deserialize)]
struct Ndm {
    oem: Oem,
}

#[derive(Debug, Deserialize)]
struct Oem {
    #[serde(default)]
    header: BTreeMap<String, String>,
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    segment: Segment,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    metadata: BTreeMap<String, String>,
    data: Data,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "COMMENT", default)]
    comment: Vec<String>,
    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<XmlStateVector>,
}

#[derive(Debug, Deserialize)]
struct XmlStateVector {
    #[serde(rename = "EPOCH")]
    epoch: String,
    #[serde(rename = "X")]
    x: Component,
    #[serde(rename = "Y")]
    y: Component,
    #[serde(rename = "Z")]
    z: Component,
    #[serde(rename = "X_DOT")]
    x_dot: Component,
    #[serde(rename = "Y_DOT")]
    y_dot: Component,
    #[serde(rename = "Z_DOT")]
    z_dot: Component,
}

#[derive(Debug, Deserialize)]
struct Component {
    #[serde(rename = "@units", default)]
    units: Option<String>,
    #[serde(rename = "$text", default)]
    value: String,
}

impl From<XmlStateVector> for RawStateVector {
    fn from(sv: XmlStateVector) -> Self {
        RawStateVector {
            epoch: sv.epoch,
            x: sv.x.value,
            y: sv.y.value,
            z: sv.z.value,
            x_dot: sv.x_dot.value,
            y_dot: sv.y_dot.value,
            z_dot: sv.z_dot.value,
        }
    }
}

/// Series-level pass-through data, served verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Ancillary {
    pub comment: Vec<String>,
    pub header: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub series: Series,
    pub ancillary: Ancillary,
}

/// Decode an OEM document. Any non-numeric component fails the whole document.
pub fn parse_oem(xml: &str) -> Result<FeedDocument, FeedError> {
    let ndm: Ndm = quick_xml::de::from_str(xml)?;
    let Oem { header, body } = ndm.oem;
    let Segment { metadata, data } = body.segment;

    let (position_units, velocity_units) = data
        .state_vectors
        .first()
        .map(|sv| (sv.x.units.clone(), sv.x_dot.units.clone()))
        .unwrap_or_default();

    let records = data
        .state_vectors
        .into_iter()
        .map(|sv| StateRecord::try_from(&RawStateVector::from(sv)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeedDocument {
        series: Series::new(
            position_units.unwrap_or_else(|| DEFAULT_POSITION_UNITS.to_string()),
            velocity_units.unwrap_or_else(|| DEFAULT_VELOCITY_UNITS.to_string()),
            records,
        ),
        ancillary: Ancillary {
            comment: data.comment,
            header,
            metadata,
        },
    })
}
