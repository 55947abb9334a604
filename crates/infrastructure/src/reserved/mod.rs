//! Special-purpose address tables behind [`ReservedAddressLookup`].
//!
//! Two interchangeable backends carry the same ranges: a CIDR list built on
//! `ipnetwork` (default) and precomputed integer ranges (`range-lookup`
//! feature). [`DefaultReservedLookup`] names whichever one the build selected.

mod cidr_table;
mod range_table;

pub use cidr_table::CidrTableLookup;
pub use range_table::RangeTableLookup;

pub use ferrous_dnswire_domain::ReservedAddressLookup;

#[cfg(not(feature = "range-lookup"))]
pub type DefaultReservedLookup = CidrTableLookup;

#[cfg(feature = "range-lookup")]
pub type DefaultReservedLookup = RangeTableLookup;
