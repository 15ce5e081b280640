pub mod erspan;
pub mod vlan;
