//! Bind dispatch
//!
//! Decides whether the active receiver configuration can take a bind phrase
//! and hands the phrase to whichever collaborator is registered for it. The
//! configuration is passed in on every call and never cached, so a change of
//! receiver provider is picked up by the next lookup.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use core::fmt;

use tracing::debug;

use crate::error::{Error, Result};

/// Receiver input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RxProvider {
    None,
    ParallelPwm,
    Ppm,
    #[default]
    Serial,
    Msp,
    Spi,
    Udp,
}

impl RxProvider {
    pub const ALL: [RxProvider; 7] = [
        RxProvider::None,
        RxProvider::ParallelPwm,
        RxProvider::Ppm,
        RxProvider::Serial,
        RxProvider::Msp,
        RxProvider::Spi,
        RxProvider::Udp,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            RxProvider::None => "none",
            RxProvider::ParallelPwm => "parallel_pwm",
            RxProvider::Ppm => "ppm",
            RxProvider::Serial => "serial",
            RxProvider::Msp => "msp",
            RxProvider::Spi => "spi",
            RxProvider::Udp => "udp",
        }
    }
}

/// Protocol spoken by a serial receiver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SerialRxProvider {
    Spektrum1024,
    Spektrum2048,
    Sbus,
    Sumd,
    Sumh,
    XbusModeB,
    XbusModeBRj01,
    Ibus,
    JetiExBus,
    #[default]
    Crsf,
    Srxl,
    TargetCustom,
    Fport,
    Srxl2,
    Ghst,
    SpektrumSrxl,
    Mavlink,
}

impl SerialRxProvider {
    pub const ALL: [SerialRxProvider; 17] = [
        SerialRxProvider::Spektrum1024,
        SerialRxProvider::Spektrum2048,
        SerialRxProvider::Sbus,
        SerialRxProvider::Sumd,
        SerialRxProvider::Sumh,
        SerialRxProvider::XbusModeB,
        SerialRxProvider::XbusModeBRj01,
        SerialRxProvider::Ibus,
        SerialRxProvider::JetiExBus,
        SerialRxProvider::Crsf,
        SerialRxProvider::Srxl,
        SerialRxProvider::TargetCustom,
        SerialRxProvider::Fport,
        SerialRxProvider::Srxl2,
        SerialRxProvider::Ghst,
        SerialRxProvider::SpektrumSrxl,
        SerialRxProvider::Mavlink,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            SerialRxProvider::Spektrum1024 => "spektrum1024",
            SerialRxProvider::Spektrum2048 => "spektrum2048",
            SerialRxProvider::Sbus => "sbus",
            SerialRxProvider::Sumd => "sumd",
            SerialRxProvider::Sumh => "sumh",
            SerialRxProvider::XbusModeB => "xbus_mode_b",
            SerialRxProvider::XbusModeBRj01 => "xbus_mode_b_rj01",
            SerialRxProvider::Ibus => "ibus",
            SerialRxProvider::JetiExBus => "jeti_ex_bus",
            SerialRxProvider::Crsf => "crsf",
            SerialRxProvider::Srxl => "srxl",
            SerialRxProvider::TargetCustom => "target_custom",
            SerialRxProvider::Fport => "fport",
            SerialRxProvider::Srxl2 => "srxl2",
            SerialRxProvider::Ghst => "ghst",
            SerialRxProvider::SpektrumSrxl => "spektrum_srxl",
            SerialRxProvider::Mavlink => "mavlink",
        }
    }
}

/// Active receiver configuration, owned by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProviderConfig {
    pub rx_provider: RxProvider,
    /// Only meaningful when `rx_provider` is [`RxProvider::Serial`]
    pub serial_provider: SerialRxProvider,
}

impl ProviderConfig {
    pub fn new(rx_provider: RxProvider, serial_provider: SerialRxProvider) -> Self {
        Self {
            rx_provider,
            serial_provider,
        }
    }

    /// Registry key for this configuration
    pub fn target(&self) -> BindTarget {
        match self.rx_provider {
            RxProvider::Serial => BindTarget::Serial(self.serial_provider),
            other => BindTarget::Provider(other),
        }
    }
}

/// Provider identity a bind capability is registered under
///
/// Serial receivers are keyed by their protocol; every other provider by
/// itself, since a stale serial setting must not make it bindable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindTarget {
    Provider(RxProvider),
    Serial(SerialRxProvider),
}

impl BindTarget {
    /// The one combination currently wired to a bind implementation
    pub const CRSF: BindTarget = BindTarget::Serial(SerialRxProvider::Crsf);
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindTarget::Provider(provider) => f.write_str(provider.name()),
            BindTarget::Serial(serial) => write!(f, "serial/{}", serial.name()),
        }
    }
}

/// Something that can apply a bind phrase to a receiver
///
/// Implementations own the outcome of the bind; the dispatcher only reports
/// that the phrase was handed over.
pub trait PhraseBinder: Send + Sync {
    fn bind_with_phrase(&self, phrase: &str);
}

impl<F> PhraseBinder for F
where
    F: Fn(&str) + Send + Sync,
{
    fn bind_with_phrase(&self, phrase: &str) {
        self(phrase)
    }
}

/// Bind capabilities keyed by provider identity
#[derive(Default)]
pub struct BindRegistry {
    binders: BTreeMap<BindTarget, Box<dyn PhraseBinder>>,
}

impl BindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a single CRSF collaborator
    pub fn crsf(binder: impl PhraseBinder + 'static) -> Self {
        Self::new().with(BindTarget::CRSF, binder)
    }

    /// Register `binder` for `target`, returning the one it replaced
    pub fn register(
        &mut self,
        target: BindTarget,
        binder: impl PhraseBinder + 'static,
    ) -> Option<Box<dyn PhraseBinder>> {
        self.binders.insert(target, Box::new(binder))
    }

    pub fn with(mut self, target: BindTarget, binder: impl PhraseBinder + 'static) -> Self {
        self.register(target, binder);
        self
    }

    pub fn get(&self, target: BindTarget) -> Option<&dyn PhraseBinder> {
        self.binders.get(&target).map(|binder| &**binder)
    }

    pub fn contains(&self, target: BindTarget) -> bool {
        self.binders.contains_key(&target)
    }

    pub fn targets(&self) -> impl Iterator<Item = BindTarget> + '_ {
        self.binders.keys().copied()
    }
}

impl fmt::Debug for BindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.binders.keys()).finish()
    }
}

/// Routes bind phrases to registered collaborators
#[derive(Debug, Default)]
pub struct BindDispatcher {
    registry: BindRegistry,
}

impl BindDispatcher {
    pub fn new(registry: BindRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BindRegistry {
        &self.registry
    }

    /// Whether the configured provider has a bind capability
    pub fn is_bind_supported(&self, config: &ProviderConfig) -> bool {
        self.registry.contains(config.target())
    }

    /// Hand `phrase` to the configured provider's collaborator
    ///
    /// `Ok` means the phrase was dispatched, not that the receiver bound.
    pub fn dispatch(&self, config: &ProviderConfig, phrase: &str) -> Result<()> {
        if phrase.is_empty() {
            return Err(Error::EmptyPhrase);
        }

        let target = config.target();
        let binder = self
            .registry
            .get(target)
            .ok_or(Error::UnsupportedProvider { target })?;

        debug!(%target, "dispatching bind phrase");
        binder.bind_with_phrase(phrase);
        Ok(())
    }

    /// Boolean form of [`BindDispatcher::dispatch`]
    ///
    /// `false` means nothing was attempted.
    pub fn start_bind(&self, config: &ProviderConfig, phrase: &str) -> bool {
        match self.dispatch(config, phrase) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "bind not started");
                false
            }
        }
    }
}
