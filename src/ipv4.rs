use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::AddressError;

const LOOPBACK: u32 = 127;
const ALL_ONES: u32 = 255;

/// Classful network category, decided by the first octet.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum NetworkClass {
    A,
    B,
    C,
}

impl NetworkClass {
    /// Every class, in report order.
    pub const ALL: [NetworkClass; 3] = [NetworkClass::A, NetworkClass::B, NetworkClass::C];

    pub fn from_first_octet(octet: u8) -> Option<Self> {
        match octet {
            0..=127 => Some(NetworkClass::A),
            128..=191 => Some(NetworkClass::B),
            192..=223 => Some(NetworkClass::C),
            _ => None,
        }
    }

    /// Number of trailing octets that identify the host.
    pub fn host_octets(self) -> usize {
        match self {
            NetworkClass::A => 3,
            NetworkClass::B => 2,
            NetworkClass::C => 1,
        }
    }
}

impl Display for NetworkClass {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let name = match self {
            NetworkClass::A => "A",
            NetworkClass::B => "B",
            NetworkClass::C => "C",
        };
        f.write_str(name)
    }
}

/// A validated host address.
///
/// Keeps the text exactly as it was entered; equality, ordering and hashing
/// all go through that text, so `"010.1.1.1"` and `"10.1.1.1"` are distinct.
#[derive(Clone, Debug)]
pub struct Address {
    text: String,
    octets: [u8; 4],
}

impl Address {
    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    pub fn first_octet(&self) -> u8 {
        self.octets[0]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state)
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_str(&self.text)
    }
}

impl FromStr for Address {
    type Err = AddressError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<&Address> for Ipv4Addr {
    fn from(address: &Address) -> Self {
        Ipv4Addr::from(address.octets)
    }
}

fn octet_value(segment: &str) -> Option<u32> {
    lazy_static! {
        static ref DIGITS: Regex = Regex::new(r"^[0-9]+$").expect("Not possible");
    }
    if DIGITS.is_match(segment) {
        segment.parse::<u32>().ok()
    } else {
        None
    }
}

/// Parses and validates a dotted quad.
///
/// Rules run in a fixed order, and the first one that fails decides the
/// error: segment count, loopback, class broadcast, all-zero host, and
/// finally the range and format of every octet.
pub fn parse(text: &str) -> Result<Address, AddressError> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"^([^.]*)\.([^.]*)\.([^.]*)\.([^.]*)$").expect("Not possible");
    }
    let caps = RE.captures(text).ok_or(AddressError::MalformedAddress)?;
    let mut values = [None; 4];
    for (i, value) in values.iter_mut().enumerate() {
        *value = caps.get(i + 1).and_then(|m| octet_value(m.as_str()));
    }

    if values[0] == Some(LOOPBACK) {
        return Err(AddressError::LoopbackNotAllowed);
    }
    let first = values[0].ok_or(AddressError::MalformedAddress)?;

    // The broadcast host part depends on the class; the all-zero host
    // part is always the last three octets.
    if let Some(class) = u8::try_from(first)
        .ok()
        .and_then(NetworkClass::from_first_octet)
    {
        let host = &values[4 - class.host_octets()..];
        if host.iter().all(|v| *v == Some(ALL_ONES)) {
            return Err(AddressError::BroadcastNotAllowed);
        }
    }
    if values[1..].iter().all(|v| *v == Some(0)) {
        return Err(AddressError::HostAllZero);
    }

    let mut octets = [0u8; 4];
    for (octet, value) in octets.iter_mut().zip(values.iter()) {
        *octet = value
            .and_then(|v| u8::try_from(v).ok())
            .ok_or(AddressError::MalformedAddress)?;
    }
    Ok(Address {
        text: text.to_owned(),
        octets,
    })
}

pub fn classify(address: &Address) -> Result<NetworkClass, AddressError> {
    NetworkClass::from_first_octet(address.first_octet()).ok_or(AddressError::Unclassifiable)
}
