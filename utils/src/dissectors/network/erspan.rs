//! ERSPAN Type I and Type II
//!
//! Type I has no header of its own, the mirrored ethernet frame directly follows the
//! outer encapsulation. Nothing in the bytes tells it apart from any other traffic, so
//! it is only decoded when [`DecoderConfig::erspan_type1_enabled`] is set.
//!
//! Type II puts an 8 bytes header in front of the mirrored frame:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Ver  |          VLAN         | COS | En|T|    Session ID     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      Reserved         |                  Index                |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! [`DecoderConfig::erspan_type1_enabled`]: crate::dissectors::DecoderConfig::erspan_type1_enabled

use nom::number::complete::{be_u16, be_u32};
use nom::IResult;

use erspan_api as api;
use api::packet::{Event, Packet, Protocol};
use api::stats::Counter;

use crate::dissectors::{Decoder, Error};

pub const HEADER_LEN: usize = 8;

/// Only version 1 has been seen in the wild, anything else is rejected
pub const SUPPORTED_VERSION: u8 = 1;

/// Type II header fields
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    /// 0 means untagged
    pub vlan: u16,
    pub cos: u8,
    pub encap_type: u8,
    pub truncated: bool,
    pub session_id: u16,
    pub index: u32,
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "version {} vlan {} cos {} encap {} truncated {} session {} index {}",
            self.version,
            self.vlan,
            self.cos,
            self.encap_type,
            self.truncated,
            self.session_id,
            self.index
        )
    }
}

pub fn dissect(data: &[u8]) -> IResult<&[u8], Header, Error> {
    let (remain, ver_vlan) = be_u16(data)?;
    let (remain, flags_session) = be_u16(remain)?;
    let (remain, reserved_index) = be_u32(remain)?;

    let hdr = Header {
        version: (ver_vlan >> 12) as u8,
        vlan: ver_vlan & 0x0fff,
        cos: (flags_session >> 13) as u8,
        encap_type: ((flags_session >> 11) & 0x03) as u8,
        truncated: flags_session & 0x0400 != 0,
        session_id: flags_session & 0x03ff,
        index: reserved_index & 0x000f_ffff,
    };

    Ok((remain, hdr))
}

impl Decoder {
    /// Decode an ERSPAN Type I payload, which is a bare ethernet frame
    pub fn decode_erspan_type1(&mut self, pkt: &mut dyn Packet, data: &[u8]) -> Result<(), Error> {
        if !self.config.erspan_type1_enabled {
            return Err(Error::Disabled("ERSPAN Type I"));
        }

        self.stats.incr(Counter::Erspan);

        self.decode_ethernet(pkt, data)
    }

    /// Decode an ERSPAN Type II header and the ethernet frame behind it
    pub fn decode_erspan_type2(&mut self, pkt: &mut dyn Packet, data: &[u8]) -> Result<(), Error> {
        self.stats.incr(Counter::Erspan);

        if data.len() < HEADER_LEN {
            pkt.set_event(Event::ErspanHeaderTooSmall);
            return Err(Error::CorruptPacket("ERSPAN header too short"));
        }

        if !pkt.increase_check_layers(self.config.max_layers) {
            return Err(Error::TooManyLayers);
        }

        let (remain, hdr) = dissect(data)?;
        log::debug!("ERSPAN: {}", hdr);

        if hdr.version != SUPPORTED_VERSION {
            pkt.set_event(Event::ErspanUnsupportedVersion);
            return Err(Error::UnsupportVersion(hdr.version));
        }

        if hdr.vlan > 0 && pkt.vlans_mut().push(hdr.vlan).is_err() {
            pkt.set_event(Event::ErspanTooManyVlanLayers);
            return Err(Error::TooManyVlans);
        }
        pkt.layers_mut().push(Protocol::ERSPAN, HEADER_LEN);

        self.decode_ethernet(pkt, remain)
    }
}
