use super::Protocol;

/// ETHER TYPES
///
/// From Wireshark's etypes.h
/// https://github.com/wireshark/wireshark/blob/master/epan/etypes.h
#[derive(Clone, Copy, Debug, PartialEq, Eq, Primitive)]
#[repr(u16)]
pub enum EtherType {
    IPV4 = 0x0800,
    ARP = 0x0806,
    VLAN = 0x8100,
    IPV6 = 0x86DD,
    /// Point-to-Point Protocol (PPP)
    PPP = 0x880B,
    MPLSUC = 0x8847,
    PPPOES = 0x8864,
    /// IEEE 802.1ad Provider Bridge; Q-in-Q
    QINQ = 0x88A8,
    /// ERSPAN Type II
    ERSPAN = 0x88BE,
}

impl From<EtherType> for Protocol {
    fn from(etype: EtherType) -> Self {
        match etype {
            EtherType::IPV4 => Protocol::IPV4,
            EtherType::ARP => Protocol::ARP,
            EtherType::VLAN | EtherType::QINQ => Protocol::VLAN,
            EtherType::IPV6 => Protocol::IPV6,
            EtherType::PPP => Protocol::PPP,
            EtherType::MPLSUC => Protocol::MPLS,
            EtherType::PPPOES => Protocol::PPPOE,
            EtherType::ERSPAN => Protocol::ERSPAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use num_traits::FromPrimitive;

    use super::*;

    #[test]
    fn from_u16() {
        assert_eq!(EtherType::from_u16(0x88be), Some(EtherType::ERSPAN));
        assert_eq!(EtherType::from_u16(0x88a8), Some(EtherType::QINQ));
        assert_eq!(EtherType::from_u16(0x0600), None);
    }

    #[test]
    fn into_protocol() {
        assert_eq!(Protocol::from(EtherType::MPLSUC), Protocol::MPLS);
        assert_eq!(Protocol::from(EtherType::QINQ), Protocol::VLAN);
    }
}
