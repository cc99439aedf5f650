//! Modulation capability table
//!
//! One row per scheme: raw request length and which keyword parameters
//! the sweep may vary. Read by the sweep controller and the acquisition
//! adapter; nothing else branches on modulation names.

use std::ops::RangeInclusive;

use phy_modem::{AlphabetFamily, Scheme};

/// Raw source length requested for most schemes
pub const DEFAULT_REQUEST_LEN: usize = 10_000;

/// Static capabilities of one modulation scheme
#[derive(Debug, Clone, PartialEq)]
pub struct ModulationSpec {
    pub scheme: Scheme,
    /// Source items requested per realization
    pub min_request_len: usize,
    /// Symbol-rate draw range, `None` when the scheme takes no symbol rate
    pub sps_range: Option<RangeInclusive<usize>>,
    /// Whether the scheme takes an excess bandwidth (Gaussian BT for GFSK)
    pub accepts_ebw: bool,
}

/// Sweep order: discrete family first, then continuous
pub static MODULATIONS: [ModulationSpec; 11] = [
    ModulationSpec {
        scheme: Scheme::Bpsk,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: Some(1..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Qpsk,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: Some(1..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Psk8,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: Some(1..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Pam4,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: Some(1..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Qam16,
        min_request_len: 20_000,
        sps_range: Some(1..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Qam64,
        min_request_len: 30_000,
        sps_range: Some(1..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Gfsk,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: Some(2..=15),
        accepts_ebw: true,
    },
    ModulationSpec {
        scheme: Scheme::Cpfsk,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: Some(1..=15),
        accepts_ebw: false,
    },
    ModulationSpec {
        scheme: Scheme::Wbfm,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: None,
        accepts_ebw: false,
    },
    ModulationSpec {
        scheme: Scheme::AmDsb,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: None,
        accepts_ebw: false,
    },
    ModulationSpec {
        scheme: Scheme::AmSsb,
        min_request_len: DEFAULT_REQUEST_LEN,
        sps_range: None,
        accepts_ebw: false,
    },
];

impl ModulationSpec {
    /// Table row for a scheme
    pub fn for_scheme(scheme: Scheme) -> &'static ModulationSpec {
        let row = match scheme {
            Scheme::Bpsk => 0,
            Scheme::Qpsk => 1,
            Scheme::Psk8 => 2,
            Scheme::Pam4 => 3,
            Scheme::Qam16 => 4,
            Scheme::Qam64 => 5,
            Scheme::Gfsk => 6,
            Scheme::Cpfsk => 7,
            Scheme::Wbfm => 8,
            Scheme::AmDsb => 9,
            Scheme::AmSsb => 10,
        };
        &MODULATIONS[row]
    }

    /// Case-insensitive lookup by dataset label
    pub fn by_name(name: &str) -> Option<&'static ModulationSpec> {
        Scheme::from_name(name).map(Self::for_scheme)
    }

    pub fn name(&self) -> &'static str {
        self.scheme.name()
    }

    pub fn family(&self) -> AlphabetFamily {
        self.scheme.family()
    }

    pub fn accepts_sps(&self) -> bool {
        self.sps_range.is_some()
    }
}
