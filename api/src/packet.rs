//! Per packet decode state shared by every decoder in the chain.
//!
//! We do not keep packet bytes here, decoders are handed the buffer they work on.
//! What lives here is what decoders leave behind for each other and for the
//! detection pipeline: decoded layers, the encapsulation depth, VLAN ids and
//! anomaly events.

use std::ops::Range;

use serde::Serialize;
use tinyvec::{ArrayVec, TinyVec};

/// Max VLAN tags a single packet may carry
pub const MAX_VLANS: usize = 2;

/// Max anomaly events recorded on a single packet, later ones are dropped
pub const MAX_EVENTS: usize = 15;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
/// Protocol collection, 1 byte
pub enum Protocol {
    // Data link layer protocols
    ETHERNET,
    ARP,
    PPP,
    MPLS,
    PPPOE,

    // Tunnel protocols
    ERSPAN,

    // Network layer protocols
    IPV4,
    IPV6,
    VLAN,

    // Unknown protocol
    UNKNOWN,
}

impl Default for Protocol {
    #[inline]
    fn default() -> Self {
        Protocol::UNKNOWN
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Packet protocol layer
pub struct Layer {
    pub protocol: Protocol,
    /// layer's position in the outermost decoded buffer
    pub range: Range<usize>,
}

impl Layer {
    #[inline]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Layers {
    layers: TinyVec<[Layer; 8]>,
    /// Number of encapsulation layers decoded so far
    depth: u8,
    /// Protocol the pipeline should continue with once the decode chain returns
    pub next: Option<Protocol>,
}

impl Layers {
    /// Record a decoded layer of `len` bytes right after the previous one
    pub fn push(&mut self, protocol: Protocol, len: usize) {
        let start = self.layers.last().map(|l| l.range.end).unwrap_or(0);
        self.layers.push(Layer {
            protocol,
            range: Range {
                start,
                end: start + len,
            },
        });
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Account for one more encapsulation layer
    ///
    /// Returns false, leaving the counter untouched, once the counter would reach `max`
    #[inline]
    pub fn increase_check(&mut self, max: u8) -> bool {
        if self.depth.saturating_add(1) >= max {
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Layer] {
        self.layers.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Get the outer most layer of the given protocol
    pub fn find(&self, protocol: Protocol) -> Option<&Layer> {
        self.layers.iter().find(|l| l.protocol == protocol)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// VLAN ids in the order they were decoded, outer most first
pub struct Vlans(ArrayVec<[u16; MAX_VLANS]>);

impl Vlans {
    /// Append a VLAN id
    ///
    /// Returns the id back if the storage is already full, storage is not modified
    #[inline]
    pub fn push(&mut self, id: u16) -> Result<(), u16> {
        match self.0.try_push(id) {
            None => Ok(()),
            Some(id) => Err(id),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_VLANS
    }

    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        self.0.as_slice()
    }
}

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, strum::AsRefStr, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "shouty_snake_case")]
/// Protocol conformance violations, consumed by detection and alerting
pub enum Event {
    EthernetPktTooSmall,
    VlanHeaderTooSmall,
    VlanHeaderTooManyLayers,
    ErspanHeaderTooSmall,
    ErspanUnsupportedVersion,
    ErspanTooManyVlanLayers,
    /// Raised by the encapsulation depth guard, shared by all protocols
    TooManyLayers,
}

pub trait Packet: Send {
    fn layers(&self) -> &Layers;
    fn layers_mut(&mut self) -> &mut Layers;

    fn vlans(&self) -> &Vlans;
    fn vlans_mut(&mut self) -> &mut Vlans;

    fn events(&self) -> &[Event];
    fn events_mut(&mut self) -> &mut Vec<Event>;

    /// Record an anomaly event on this packet
    #[inline]
    fn set_event(&mut self, event: Event) {
        let events = self.events_mut();
        if events.len() < MAX_EVENTS {
            events.push(event);
        }
    }

    /// Account for one more encapsulation layer, raise TOO_MANY_LAYERS when over `max`
    #[inline]
    fn increase_check_layers(&mut self, max: u8) -> bool {
        if self.layers_mut().increase_check(max) {
            return true;
        }
        self.set_event(Event::TooManyLayers);
        false
    }
}
