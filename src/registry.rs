use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use tracing::debug;

use crate::error::AddressError;
use crate::ipv4::{self, Address, NetworkClass};

/// Accepted addresses, grouped by network class.
///
/// Each class keeps its own set, so the same text may not appear twice in
/// one class.
pub struct Registry {
    inner: BTreeMap<NetworkClass, BTreeSet<Address>>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            inner: NetworkClass::ALL
                .iter()
                .map(|&class| (class, BTreeSet::new()))
                .collect(),
        }
    }

    pub fn add(&mut self, class: NetworkClass, address: Address) -> Result<(), AddressError> {
        let set = self.inner.entry(class).or_insert_with(BTreeSet::new);
        if !set.insert(address.clone()) {
            return Err(AddressError::DuplicateAddress);
        }
        debug!(%address, %class, "address stored");
        Ok(())
    }

    /// Stores a validated address under the class of its first octet.
    pub fn insert(&mut self, address: Address) -> Result<NetworkClass, AddressError> {
        let class = ipv4::classify(&address)?;
        self.add(class, address)?;
        Ok(class)
    }

    /// Runs raw input through parsing, classification and storage.
    pub fn submit(&mut self, text: &str) -> Result<NetworkClass, AddressError> {
        self.insert(ipv4::parse(text)?)
    }

    pub fn contains(&self, class: NetworkClass, address: &Address) -> bool {
        self.inner
            .get(&class)
            .map(|set| set.contains(address))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn report(&self) -> Report {
        let groups = NetworkClass::ALL
            .iter()
            .map(|class| {
                let addresses: Vec<String> = self
                    .inner
                    .get(class)
                    .map(|set| set.iter().map(|a| a.to_string()).collect())
                    .unwrap_or_default();
                (*class, addresses)
            })
            .collect();
        Report { groups }
    }
}

/// Snapshot of the registry, one sorted list per class in A, B, C order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    groups: Vec<(NetworkClass, Vec<String>)>,
}

impl Report {
    pub fn iter(&self) -> impl Iterator<Item = (NetworkClass, &[String])> {
        self.groups
            .iter()
            .map(|(class, addresses)| (*class, addresses.as_slice()))
    }

    pub fn addresses(&self, class: NetworkClass) -> &[String] {
        self.iter()
            .find(|(c, _)| *c == class)
            .map(|(_, addresses)| addresses)
            .unwrap_or(&[])
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "\n== Results ==\n")?;
        for (class, addresses) in self.iter() {
            write!(f, "Network {}\n", class)?;
            for address in addresses {
                write!(f, "- {}\n", address)?;
            }
        }
        Ok(())
    }
}
