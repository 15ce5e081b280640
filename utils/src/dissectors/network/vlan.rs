use nom::number::complete::be_u16;
use nom::IResult;

use erspan_api as api;
use api::packet::{Event, Packet, Protocol};
use api::stats::Counter;

use crate::dissectors::{Decoder, Error};

/// TCI + ether type
pub const HEADER_LEN: usize = 4;

/// Get the VLAN id and the inner ether type
pub fn dissect(data: &[u8]) -> IResult<&[u8], (u16, u16), Error> {
    let (remain, tci) = be_u16(data)?;
    let (remain, etype) = be_u16(remain)?;
    Ok((remain, (tci & 0x0fff, etype)))
}

impl Decoder {
    pub fn decode_vlan(&mut self, pkt: &mut dyn Packet, data: &[u8]) -> Result<(), Error> {
        self.stats.incr(Counter::Vlan);

        if data.len() < HEADER_LEN {
            pkt.set_event(Event::VlanHeaderTooSmall);
            return Err(Error::CorruptPacket("VLAN header too short"));
        }

        if !pkt.increase_check_layers(self.config.max_layers) {
            return Err(Error::TooManyLayers);
        }

        let (remain, (vlan, etype)) = dissect(data)?;
        log::trace!("VLAN: id {} etype 0x{:04x}", vlan, etype);

        if pkt.vlans_mut().push(vlan).is_err() {
            pkt.set_event(Event::VlanHeaderTooManyLayers);
            return Err(Error::TooManyVlans);
        }
        pkt.layers_mut().push(Protocol::VLAN, HEADER_LEN);

        self.decode_etype(pkt, etype, remain)
    }
}
