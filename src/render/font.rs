use std::cell::{Cell, RefCell};

use tracing::{debug, trace, warn};

use crate::error::ChartResult;

/// A loaded font resource the SVG backend can embed with `@font-face`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    /// `data:` URL or any URL the host document can resolve.
    pub source_url: String,
}

impl FontFace {
    #[must_use]
    pub fn new(family: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            source_url: source_url.into(),
        }
    }
}

/// Host-provided loader for the hand-drawn font.
pub trait FontLoader {
    fn load(&self) -> ChartResult<FontFace>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FontState {
    Unregistered,
    Pending,
    Registered(FontFace),
}

/// Proof that the caller owns the one in-flight registration.
#[derive(Debug)]
#[must_use = "an unused ticket leaves the registry pending forever"]
pub struct RegistrationTicket {
    _private: (),
}

/// Tracks whether the hand-drawn font has been registered with the host.
///
/// Single-threaded: share it between charts with `Rc<FontRegistry>`.
#[derive(Debug)]
pub struct FontRegistry {
    state: RefCell<FontState>,
    registrations: Cell<usize>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FontState::Unregistered),
            registrations: Cell::new(0),
        }
    }

    /// Claims the registration slot. Returns `None` when a registration is
    /// already pending or done.
    pub fn begin_registration(&self) -> Option<RegistrationTicket> {
        let mut state = self.state.borrow_mut();
        if *state != FontState::Unregistered {
            trace!("font registration already claimed");
            return None;
        }
        *state = FontState::Pending;
        debug!("font registration started");
        Some(RegistrationTicket { _private: () })
    }

    pub fn complete_registration(&self, ticket: RegistrationTicket, face: FontFace) {
        let RegistrationTicket { .. } = ticket;
        debug!(family = %face.family, "font registered");
        *self.state.borrow_mut() = FontState::Registered(face);
        self.registrations.set(self.registrations.get() + 1);
    }

    /// Releases the slot after a failed load so a later attempt can retry.
    pub fn abandon_registration(&self, ticket: RegistrationTicket) {
        let RegistrationTicket { .. } = ticket;
        warn!("font registration abandoned");
        *self.state.borrow_mut() = FontState::Unregistered;
    }

    /// Loads and registers the font once; later calls are no-ops.
    ///
    /// Returns `true` when this call performed the registration.
    pub fn ensure_registered(&self, loader: &dyn FontLoader) -> ChartResult<bool> {
        let Some(ticket) = self.begin_registration() else {
            return Ok(false);
        };
        match loader.load() {
            Ok(face) => {
                self.complete_registration(ticket, face);
                Ok(true)
            }
            Err(err) => {
                self.abandon_registration(ticket);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        *self.state.borrow() == FontState::Pending
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(*self.state.borrow(), FontState::Registered(_))
    }

    #[must_use]
    pub fn registered_face(&self) -> Option<FontFace> {
        match &*self.state.borrow() {
            FontState::Registered(face) => Some(face.clone()),
            _ => None,
        }
    }

    /// How many registrations completed; never exceeds one.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registrations.get()
    }
}
