use nom::bytes::complete::take;
use nom::number::complete::be_u16;
use nom::IResult;

use erspan_api as api;
use api::packet::{Event, Packet, Protocol};
use api::stats::Counter;

use crate::dissectors::{Decoder, Error};

/// Destination MAC + Source MAC + ether type
pub const HEADER_LEN: usize = 6 + 6 + 2;

/// Split an ethernet frame into its ether type and payload
pub fn dissect(data: &[u8]) -> IResult<&[u8], u16, Error> {
    let (remain, data) = take(HEADER_LEN)(data)?;
    let (_, etype) = be_u16(&data[12..])?;
    Ok((remain, etype))
}

impl Decoder {
    /// Decode an ethernet frame and whatever it carries that this decoder knows about
    pub fn decode_ethernet(&mut self, pkt: &mut dyn Packet, data: &[u8]) -> Result<(), Error> {
        self.stats.incr(Counter::Ethernet);

        if data.len() < HEADER_LEN {
            log::debug!("Ethernet frame too small: {} bytes", data.len());
            pkt.set_event(Event::EthernetPktTooSmall);
            return Err(Error::CorruptPacket("Ethernet packet too short"));
        }

        if !pkt.increase_check_layers(self.config.max_layers) {
            return Err(Error::TooManyLayers);
        }

        let (remain, etype) = dissect(data)?;
        pkt.layers_mut().push(Protocol::ETHERNET, HEADER_LEN);

        self.decode_etype(pkt, etype, remain)
    }
}

#[cfg(test)]
mod tests {
    use erspan_api::utils::packet::Packet;

    use super::*;
    use crate::dissectors::DecoderConfig;

    #[test]
    fn ok() {
        let buf = [
            0x01, 0x80, 0xc2, 0x00, 0x00, 0x00, 0xcc, 0x04, 0x0d, 0x5c, 0xf0, 0x00, 0x08, 0x00,
            0x45, 0x00,
        ];
        let (remain, etype) = dissect(&buf).unwrap();
        assert_eq!(etype, 0x0800);
        assert_eq!(remain, &[0x45, 0x00]);

        let mut decoder = Decoder::default();
        let mut pkt = Packet::default();
        assert_eq!(decoder.decode_ethernet(&mut pkt, &buf), Ok(()));
        assert_eq!(pkt.layers.next, Some(Protocol::IPV4));
        assert_eq!(pkt.layers.as_slice()[0].range, 0..14);
        assert_eq!(pkt.layers.depth(), 1);
        assert_eq!(decoder.stats().ethernet, 1);
    }

    #[test]
    fn pkt_too_short() {
        let buf = [
            0x01, 0x80, 0xc2, 0x00, 0x00, 0x00, 0xcc, 0x04, 0x0d, 0x5c, 0xf0, 0x00,
        ];
        assert!(matches!(dissect(&buf), Err(nom::Err::Error(_))));

        let mut decoder = Decoder::default();
        let mut pkt = Packet::default();
        assert!(matches!(
            decoder.decode_ethernet(&mut pkt, &buf),
            Err(Error::CorruptPacket(_))
        ));
        assert_eq!(pkt.events, vec![Event::EthernetPktTooSmall]);
        assert!(pkt.layers.is_empty());
        assert_eq!(decoder.stats().ethernet, 1);
    }

    #[test]
    fn unknown_etype() {
        let buf = [
            0x01, 0x80, 0xc2, 0x00, 0x00, 0x00, 0xcc, 0x04, 0x0d, 0x5c, 0xf0, 0x00, 0x06, 0x00,
        ];
        let mut decoder = Decoder::default();
        let mut pkt = Packet::default();
        assert_eq!(decoder.decode_ethernet(&mut pkt, &buf), Ok(()));
        assert_eq!(pkt.layers.next, Some(Protocol::UNKNOWN));
        assert!(pkt.events.is_empty());
    }

    #[test]
    fn depth_limit() {
        let buf = [
            0x01, 0x80, 0xc2, 0x00, 0x00, 0x00, 0xcc, 0x04, 0x0d, 0x5c, 0xf0, 0x00, 0x86, 0xdd,
        ];
        let mut decoder = Decoder::new(DecoderConfig {
            max_layers: 3,
            ..Default::default()
        });
        let mut pkt = Packet::default();
        pkt.layers.increase_check(u8::MAX);
        pkt.layers.increase_check(u8::MAX);

        assert_eq!(decoder.decode_ethernet(&mut pkt, &buf), Err(Error::TooManyLayers));
        assert_eq!(pkt.events, vec![Event::TooManyLayers]);
        assert_eq!(pkt.layers.next, None);
    }
}
