use std::fmt::{Display, Formatter};

use nom::error::{ErrorKind, ParseError};
use num_traits::FromPrimitive;

use erspan_api as api;
use api::config::Config;
use api::packet::{Packet, Protocol};
use api::stats::Stats;

mod etype;
pub mod link;
pub mod network;

pub use etype::EtherType;

/// Config key toggling ERSPAN Type I decoding
pub const ERSPAN_TYPE1_ENABLED: &str = "decoder.erspan.typeI.enabled";
/// Config key of the encapsulation depth ceiling
pub const MAX_LAYERS: &str = "decoder.max-layers";

pub const DEFAULT_MAX_LAYERS: u8 = 16;
const MIN_MAX_LAYERS: u8 = 3;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Decoding of this protocol is turned off by configuration
    Disabled(&'static str),
    CorruptPacket(&'static str),
    UnsupportVersion(u8),
    /// No room left for another VLAN tag on this packet
    TooManyVlans,
    /// Encapsulation depth ceiling reached
    TooManyLayers,
    Nom(ErrorKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Disabled(s) => write!(f, "{} decoding disabled", s),
            Error::CorruptPacket(s) => write!(f, "{}", s),
            Error::UnsupportVersion(v) => write!(f, "Unsupport version({})", v),
            Error::TooManyVlans => write!(f, "Too many VLAN layers"),
            Error::TooManyLayers => write!(f, "Too many encapsulation layers"),
            Error::Nom(_) => write!(f, "Nom parse error"),
        }
    }
}

impl<I> ParseError<I> for Error {
    fn from_error_kind(_: I, kind: ErrorKind) -> Self {
        Error::Nom(kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<nom::Err<Error>> for Error {
    fn from(e: nom::Err<Error>) -> Self {
        match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => Error::Nom(ErrorKind::Eof),
        }
    }
}

impl std::error::Error for Error {}

/// Decoder settings
///
/// Built once before any decoding starts and handed to every worker's [`Decoder`] by value.
/// Decoders never write it, reconfiguring means building new decoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// ERSPAN Type I has no header of its own, it is only decoded when asked to
    pub erspan_type1_enabled: bool,
    /// Max encapsulation layers a single packet may be decoded through
    pub max_layers: u8,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            erspan_type1_enabled: false,
            max_layers: DEFAULT_MAX_LAYERS,
        }
    }
}

impl DecoderConfig {
    /// Apply decoder options found in `config`
    ///
    /// Missing or bad options keep their current value. A present Type I option is
    /// true for `1`, `yes`, `true` or `on` in any case, false for anything else.
    pub fn load(&mut self, config: &Config) {
        if let Ok(enabled) = config.get_boolean_without_default(ERSPAN_TYPE1_ENABLED) {
            self.erspan_type1_enabled = enabled;
        }
        log::debug!(
            "ERSPAN Type I decode support {}",
            if self.erspan_type1_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        self.max_layers = config.get_integer(
            MAX_LAYERS,
            self.max_layers as i64,
            MIN_MAX_LAYERS as i64,
            u8::MAX as i64,
        ) as u8;
    }
}

/// Link layer decoder, one per worker thread
///
/// Each decode method works on the buffer it is given and records what it finds
/// on the packet. A failed call only stops decoding at that layer, dropping the
/// packet is up to the caller.
#[derive(Debug, Default)]
pub struct Decoder {
    config: DecoderConfig,
    stats: Stats,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            stats: Stats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Continue with the layer an ether type points to
    fn decode_etype(
        &mut self,
        pkt: &mut dyn Packet,
        etype: u16,
        data: &[u8],
    ) -> Result<(), Error> {
        match EtherType::from_u16(etype) {
            Some(EtherType::VLAN) | Some(EtherType::QINQ) => self.decode_vlan(pkt, data),
            Some(EtherType::ERSPAN) => self.decode_erspan_type2(pkt, data),
            Some(etype) => {
                let protocol: Protocol = etype.into();
                log::trace!("Next layer: {:?}", protocol);
                pkt.layers_mut().next = Some(protocol);
                Ok(())
            }
            None => {
                log::trace!("Unknown etype: 0x{:04x}", etype);
                pkt.layers_mut().next = Some(Protocol::UNKNOWN);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn default_config() {
        let config = DecoderConfig::default();
        assert!(!config.erspan_type1_enabled);
        assert_eq!(config.max_layers, DEFAULT_MAX_LAYERS);
    }

    #[test]
    fn load_config() -> Result<()> {
        let mut config = DecoderConfig::default();
        config.load(&Config::from_str(
            "decoder.erspan.typeI.enabled: true\ndecoder.max-layers: 8\n",
        )?);
        assert!(config.erspan_type1_enabled);
        assert_eq!(config.max_layers, 8);
        Ok(())
    }

    #[test]
    fn missing_option_keeps_value() -> Result<()> {
        let mut config = DecoderConfig::default();
        config.erspan_type1_enabled = true;
        config.max_layers = 5;
        config.load(&Config::from_str("node: sensor-1\n")?);
        assert!(config.erspan_type1_enabled);
        assert_eq!(config.max_layers, 5);
        Ok(())
    }

    #[test]
    fn bad_option_keeps_value() -> Result<()> {
        let mut config = DecoderConfig::default();
        config.erspan_type1_enabled = true;
        config.load(&Config::from_str("decoder.max-layers: 1000\n")?);
        assert!(config.erspan_type1_enabled);
        assert_eq!(config.max_layers, DEFAULT_MAX_LAYERS);
        Ok(())
    }

    #[test]
    fn yes_on_one_enable_type1() -> Result<()> {
        for value in &["yes", "on", "1", "YES", "True"] {
            let mut config = DecoderConfig::default();
            config.load(&Config::from_str(&format!(
                "decoder.erspan.typeI.enabled: {}\n",
                value
            ))?);
            assert!(config.erspan_type1_enabled, "{} should enable", value);
        }
        Ok(())
    }

    #[test]
    fn no_disables_type1() -> Result<()> {
        for value in &["no", "off", "0", "yes please"] {
            let mut config = DecoderConfig::default();
            config.erspan_type1_enabled = true;
            config.load(&Config::from_str(&format!(
                "decoder.erspan.typeI.enabled: {}\n",
                value
            ))?);
            assert!(!config.erspan_type1_enabled, "{} should disable", value);
        }
        Ok(())
    }

    #[test]
    fn last_load_wins() -> Result<()> {
        let mut config = DecoderConfig::default();
        config.load(&Config::from_str("decoder.erspan.typeI.enabled: true\n")?);
        config.load(&Config::from_str("decoder.erspan.typeI.enabled: true\n")?);
        assert!(config.erspan_type1_enabled);
        config.load(&Config::from_str("decoder.erspan.typeI.enabled: false\n")?);
        assert!(!config.erspan_type1_enabled);
        Ok(())
    }

    #[test]
    fn error_from_nom() {
        let e: Error = nom::Err::Incomplete(nom::Needed::Unknown).into();
        assert_eq!(e, Error::Nom(ErrorKind::Eof));
        let e: Error = nom::Err::Error(Error::TooManyVlans).into();
        assert_eq!(e, Error::TooManyVlans);
        assert_eq!(Error::UnsupportVersion(2).to_string(), "Unsupport version(2)");
    }
}
