//! Link endpoints and canonical link identity.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

/// One end of a network link: a device identifier plus an optional
/// interface identifier.
///
/// Device identifiers are opaque strings in whatever namespace the caller
/// has normalized to (IS-IS system IDs once the identity map has been
/// applied). Interface identifiers distinguish parallel links between the
/// same device pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Device identifier.
    pub device: String,
    /// Interface identifier, when the source reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

impl Endpoint {
    /// Create a device-level endpoint.
    pub fn new(device: impl Into<String>) -> Result<Self, ParseError> {
        let device = device.into();
        if device.is_empty() {
            return Err(ParseError::EmptyDevice);
        }
        Ok(Self {
            device,
            interface: None,
        })
    }

    /// Create an endpoint with an interface identifier.
    pub fn with_interface(
        device: impl Into<String>,
        interface: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let mut ep = Self::new(device)?;
        let interface = interface.into();
        if !interface.is_empty() {
            ep.interface = Some(interface);
        }
        Ok(ep)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.interface {
            Some(iface) => write!(f, "{}:{}", self.device, iface),
            None => write!(f, "{}", self.device),
        }
    }
}

/// Canonical, direction-independent identity for a network link.
///
/// Built from an unordered endpoint pair: the endpoints are sorted
/// lexicographically by (device, interface), so `normalize(A, B)` and
/// `normalize(B, A)` produce the same key. When either endpoint carries an
/// interface identifier, the interface pairing becomes part of the key, so
/// two parallel links between the same devices stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkKey {
    /// Lexicographically first endpoint device.
    pub a: String,
    /// Lexicographically second endpoint device.
    pub b: String,
    /// Interface-pair discriminator, aligned with the (a, b) order.
    pub discriminator: Option<String>,
    /// Instance/VRF discriminator, when the source scopes links per VRF.
    pub instance: Option<String>,
}

impl LinkKey {
    /// Canonicalize an unordered endpoint pair into a link key.
    ///
    /// Commutative in the two endpoints: `normalize(a, b, i) ==
    /// normalize(b, a, i)` for all endpoint pairs.
    pub fn normalize(a: &Endpoint, b: &Endpoint, instance: Option<&str>) -> Self {
        let (first, second) = if (a.device.as_str(), a.interface.as_deref())
            <= (b.device.as_str(), b.interface.as_deref())
        {
            (a, b)
        } else {
            (b, a)
        };

        let discriminator = if first.interface.is_some() || second.interface.is_some() {
            Some(format!(
                "{}|{}",
                first.interface.as_deref().unwrap_or(""),
                second.interface.as_deref().unwrap_or("")
            ))
        } else {
            None
        };

        Self {
            a: first.device.clone(),
            b: second.device.clone(),
            discriminator,
            instance: instance.filter(|i| !i.is_empty()).map(str::to_string),
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.a, self.b)?;
        if let Some(disc) = &self.discriminator {
            write!(f, "#{}", disc)?;
        }
        if let Some(instance) = &self.instance {
            write!(f, "@{}", instance)?;
        }
        Ok(())
    }
}

impl Serialize for LinkKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LinkKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // "a<->b[#disc][@instance]"
        let (rest, instance) = match s.split_once('@') {
            Some((head, inst)) => (head, Some(inst.to_string())),
            None => (s.as_str(), None),
        };
        let (pair, discriminator) = match rest.split_once('#') {
            Some((head, disc)) => (head, Some(disc.to_string())),
            None => (rest, None),
        };
        let (a, b) = pair
            .split_once("<->")
            .ok_or_else(|| serde::de::Error::custom(format!("invalid link key: {}", s)))?;
        Ok(Self {
            a: a.to_string(),
            b: b.to_string(),
            discriminator,
            instance,
        })
    }
}
