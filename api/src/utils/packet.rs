use crate::packet::{Event, Layers, Packet as PacketTrait, Vlans};

/// Decode state of a single packet
///
/// Owned by the worker thread decoding the packet, never shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Packet {
    /// protocol layers
    pub layers: Layers,
    pub vlans: Vlans,
    /// anomaly events
    pub events: Vec<Event>,
}

impl PacketTrait for Packet {
    fn layers(&self) -> &Layers {
        &self.layers
    }

    fn layers_mut(&mut self) -> &mut Layers {
        &mut self.layers
    }

    fn vlans(&self) -> &Vlans {
        &self.vlans
    }

    fn vlans_mut(&mut self) -> &mut Vlans {
        &mut self.vlans
    }

    fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }
}
