use thiserror::Error;

/// Reasons an input is refused on its way into the registry.
///
/// The `Display` text is what the console shows for the rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("That does not look like a valid IP address")]
    MalformedAddress,
    #[error("The network ID cannot start with 127")]
    LoopbackNotAllowed,
    #[error("The host ID numbers cannot all be 255")]
    BroadcastNotAllowed,
    #[error("The host ID numbers cannot all be 0")]
    HostAllZero,
    #[error("The address does not belong to class A, B or C")]
    Unclassifiable,
    #[error("That IP address was already assigned")]
    DuplicateAddress,
}
